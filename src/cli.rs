mod burrow;
mod publish;
mod snapshot;

use clap::{Parser, Subcommand};

pub use self::{burrow::BurrowArgs, publish::PublishArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: derive the green share, blended tariffs, and the adjusted solar forecast.
    #[clap(name = "publish")]
    Publish(Box<PublishArgs>),

    /// Development tools.
    #[clap(name = "burrow")]
    Burrow(Box<BurrowArgs>),
}
