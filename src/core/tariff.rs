use std::ops::{Add, Mul};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::{
    core::interval::Interval,
    quantity::{Zero, co2::GramsPerKilowattHour, power::Kilowatts, price::KilowattHourPrice},
};

/// Tariff value over a time slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate<V> {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub value: V,
}

impl<V> Rate<V> {
    pub const fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }
}

/// Tariff slots ordered by their start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Rate<V>>")]
#[serde(bound(deserialize = "V: Deserialize<'de>"))]
pub struct Rates<V>(Vec<Rate<V>>);

impl<V> Default for Rates<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V> From<Vec<Rate<V>>> for Rates<V> {
    fn from(mut rates: Vec<Rate<V>>) -> Self {
        rates.sort_by_key(|rate| rate.start);
        Self(rates)
    }
}

impl<V> Rates<V> {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rate<V>> {
        self.0.iter()
    }

    /// Value of the slot which is active at the moment.
    #[must_use]
    pub fn at(&self, now: DateTime<Local>) -> Option<V>
    where
        V: Copy,
    {
        self.0.iter().find(|rate| rate.interval().contains(now)).map(|rate| rate.value)
    }
}

/// Tariff collaborators of the site, any of them may be missing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Tariffs {
    #[serde(default)]
    pub grid: Option<Rates<KilowattHourPrice>>,

    #[serde(default)]
    pub feed_in: Option<Rates<KilowattHourPrice>>,

    #[serde(default)]
    pub co2: Option<Rates<GramsPerKilowattHour>>,

    /// Solar production forecast.
    #[serde(default)]
    pub solar: Option<Rates<Kilowatts>>,
}

impl Tariffs {
    #[must_use]
    pub fn quote(&self, now: DateTime<Local>) -> TariffQuote {
        TariffQuote {
            grid: self.grid.as_ref().and_then(|rates| rates.at(now)),
            feed_in: self.feed_in.as_ref().and_then(|rates| rates.at(now)),
            co2: self.co2.as_ref().and_then(|rates| rates.at(now)),
            solar: self.solar.as_ref().and_then(|rates| rates.at(now)),
        }
    }
}

/// Current tariff values.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TariffQuote {
    pub grid: Option<KilowattHourPrice>,
    pub feed_in: Option<KilowattHourPrice>,
    pub co2: Option<GramsPerKilowattHour>,
    pub solar: Option<Kilowatts>,
}

impl TariffQuote {
    /// Blend the grid and feed-in prices by the green share.
    ///
    /// The green part is valued at the feed-in price which is missed by consuming it,
    /// a missing feed-in tariff counts as free.
    #[must_use]
    pub fn effective_price(&self, green_share: f64) -> Option<KilowattHourPrice> {
        let grid = self.grid?;
        let feed_in = self.feed_in.unwrap_or(KilowattHourPrice::ZERO);
        Some(blend(grid, feed_in, green_share))
    }

    /// Only the grid-imported part emits CO₂.
    #[must_use]
    pub fn effective_co2(&self, green_share: f64) -> Option<GramsPerKilowattHour> {
        Some(blend(self.co2?, GramsPerKilowattHour::ZERO, green_share))
    }
}

fn blend<V>(grid: V, green: V, green_share: f64) -> V
where
    V: Add<Output = V> + Mul<f64, Output = V>,
{
    grid * (1.0 - green_share) + green * green_share
}
