use std::fmt::{Debug, Formatter};

use chrono::{DateTime, Local, NaiveTime, TimeDelta, TimeZone};

use crate::prelude::*;

#[derive(Copy, Clone, Eq, PartialEq)]
#[must_use]
pub struct Interval {
    /// Inclusive.
    pub start: DateTime<Local>,

    /// Exclusive.
    pub end: DateTime<Local>,
}

impl Debug for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl Interval {
    pub const fn new(start: DateTime<Local>, end: DateTime<Local>) -> Self {
        Self { start, end }
    }

    pub fn try_new(start: DateTime<Local>, end: DateTime<Local>) -> Result<Self> {
        ensure!(start <= end, "the interval starts after it ends: {start} > {end}");
        Ok(Self { start, end })
    }

    /// Since the local midnight until `now`.
    ///
    /// Falls back to the empty `now..now` when the day start cannot be resolved
    /// in the local time zone.
    pub fn today_until(now: DateTime<Local>) -> Self {
        Self::new(start_of_day(&now).unwrap_or(now), now)
    }

    #[must_use]
    pub fn duration(self) -> TimeDelta {
        self.end - self.start
    }

    #[must_use]
    pub fn contains(self, other: DateTime<Local>) -> bool {
        (self.start <= other) && (other < self.end)
    }
}

/// Midnight of the same day, the earlier one if it is repeated, [`None`] if it is skipped.
fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    now.with_time(NaiveTime::MIN).earliest()
}
