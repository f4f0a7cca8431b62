use serde::Serialize;
use serde_json::{Map, Value};

use crate::prelude::*;

/// Published metric names.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, derive_more::Display)]
pub enum Key {
    #[display("greenShareHome")]
    GreenShareHome,

    #[display("greenShareLoadpoints")]
    GreenShareLoadpoints,

    #[display("tariffGrid")]
    TariffGrid,

    #[display("tariffFeedIn")]
    TariffFeedIn,

    #[display("tariffCo2")]
    TariffCo2,

    #[display("tariffSolar")]
    TariffSolar,

    #[display("tariffPriceHome")]
    TariffPriceHome,

    #[display("tariffCo2Home")]
    TariffCo2Home,

    #[display("tariffPriceLoadpoints")]
    TariffPriceLoadpoints,

    #[display("tariffCo2Loadpoints")]
    TariffCo2Loadpoints,

    #[display("forecast")]
    Forecast,
}

/// Sink for the derived metrics.
pub trait Publish {
    fn publish(&mut self, key: Key, value: impl Serialize);
}

impl Publish for Map<String, Value> {
    fn publish(&mut self, key: Key, value: impl Serialize) {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.insert(key.to_string(), value);
            }
            Err(error) => {
                warn!(%key, "failed to serialize the value: {error:#}");
            }
        }
    }
}
