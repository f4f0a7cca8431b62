use chrono::{DateTime, Local};
use serde::Serialize;

/// A time series sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, derive_more::Constructor, Serialize)]
pub struct Point<V> {
    #[serde(rename = "ts")]
    pub time: DateTime<Local>,

    #[serde(rename = "val")]
    pub value: V,
}

impl<V> Point<V> {
    pub fn map<T>(self, f: impl FnOnce(V) -> T) -> Point<T> {
        Point::new(self.time, f(self.value))
    }
}
