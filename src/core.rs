pub mod forecast;
pub mod green_share;
pub mod interval;
pub mod metrics;
pub mod point;
pub mod series;
pub mod site;
pub mod tariff;
