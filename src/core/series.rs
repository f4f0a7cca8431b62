mod energy;

use std::ops::Mul;

use itertools::Itertools;
use serde::Serialize;

use crate::{
    core::{point::Point, tariff::Rates},
    prelude::*,
};

/// Piecewise-linear function of time given by its samples.
///
/// Timestamps are non-decreasing, the spacing between them is arbitrary.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
#[must_use]
pub struct Series<V>(Vec<Point<V>>);

impl<V> Default for Series<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V> TryFrom<Vec<Point<V>>> for Series<V> {
    type Error = Error;

    fn try_from(points: Vec<Point<V>>) -> Result<Self> {
        if let Some((previous, next)) =
            points.iter().tuple_windows().find(|(previous, next)| previous.time > next.time)
        {
            bail!("the series goes back in time: {} > {}", previous.time, next.time);
        }
        Ok(Self(points))
    }
}

impl<V: Copy> From<&Rates<V>> for Series<V> {
    /// Sample each tariff slot at its start.
    fn from(rates: &Rates<V>) -> Self {
        Self(rates.iter().map(|rate| Point::new(rate.start, rate.value)).collect())
    }
}

impl<V> Series<V> {
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point<V>> {
        self.0.iter()
    }

    /// Multiply every value by the factor, keeping the timestamps.
    pub fn scaled(&self, factor: f64) -> Self
    where
        V: Copy + Mul<f64, Output = V>,
    {
        Self(self.0.iter().map(|point| point.map(|value| value * factor)).collect())
    }
}
