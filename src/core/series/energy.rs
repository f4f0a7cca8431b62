use std::ops::{Add, AddAssign, Div, Mul};

use crate::{
    core::{interval::Interval, point::Point, series::Series},
    quantity::{Zero, time::Hours},
};

impl<V> Series<V> {
    /// Integrate the series over the interval with the trapezoidal rule.
    ///
    /// Only the samples inside the interval and the last sample before its start contribute.
    /// Nothing is accumulated before the first sample, and a reversed interval yields zero.
    pub fn accumulated<E>(&self, interval: Interval) -> E
    where
        V: Copy + Add<Output = V> + Div<f64, Output = V> + Mul<Hours, Output = E>,
        E: Zero + AddAssign,
    {
        let mut accumulated = E::ZERO;
        if interval.start >= interval.end {
            return accumulated;
        }

        let mut previous: Option<&Point<V>> = None;
        for point in &self.0 {
            if point.time <= interval.start {
                previous = Some(point);
                continue;
            }
            if let Some(previous) = previous {
                let start = previous.time.max(interval.start);
                let end = point.time.min(interval.end);
                accumulated += (point.value + previous.value) / 2.0 * Hours::from(end - start);
            }
            if point.time >= interval.end {
                break;
            }
            previous = Some(point);
        }
        accumulated
    }
}
