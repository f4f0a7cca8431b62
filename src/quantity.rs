#[macro_use]
pub mod macros;

pub mod co2;
pub mod energy;
pub mod power;
pub mod price;
pub mod time;
mod zero;

pub use self::zero::Zero;
