use serde::{Deserialize, Serialize};

use crate::quantity::{Zero, power::Kilowatts};

/// Instantaneous site power readings.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, bon::Builder)]
pub struct PowerReadings {
    /// PV production.
    #[serde(default)]
    #[builder(default)]
    pub pv: Kilowatts,

    /// Battery power, positive when discharging.
    #[serde(default)]
    #[builder(default)]
    pub battery: Kilowatts,

    /// Household consumption without the loadpoints.
    #[serde(default)]
    #[builder(default)]
    pub home: Kilowatts,

    /// Total charging power of the loadpoints.
    #[serde(default)]
    #[builder(default)]
    pub loadpoints: Kilowatts,
}

/// Part of the consumption, stacked on top of the consumption below `from`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConsumptionBand {
    pub from: Kilowatts,
    pub to: Kilowatts,
}

impl PowerReadings {
    /// Only generation and battery discharge count as green.
    #[must_use]
    pub fn green_power(self) -> Kilowatts {
        self.pv.max(Kilowatts::ZERO) + self.battery.max(Kilowatts::ZERO)
    }

    /// The household band: `0..home`.
    #[must_use]
    pub const fn home_band(self) -> ConsumptionBand {
        ConsumptionBand { from: Kilowatts::ZERO, to: self.home }
    }

    /// The loadpoints band, stacked on top of the household: `home..home+loadpoints`.
    #[must_use]
    pub fn loadpoints_band(self) -> ConsumptionBand {
        ConsumptionBand { from: self.home, to: self.home + self.loadpoints }
    }

    /// Fraction of the band consumption covered by green power.
    ///
    /// The consumption below the band takes the green power first, the band only gets the rest.
    /// An empty (or reversed) band is fully green as soon as any green power is left for it,
    /// and not green otherwise.
    #[must_use]
    pub fn green_share(self, band: ConsumptionBand) -> f64 {
        let available = (self.green_power() - band.from).max(Kilowatts::ZERO);
        let width = band.to - band.from;
        if width <= Kilowatts::ZERO {
            return if available > Kilowatts::ZERO { 1.0 } else { 0.0 };
        }
        (available.min(width) / width).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn readings(pv: f64, battery: f64) -> PowerReadings {
        PowerReadings::builder().pv(Kilowatts(pv)).battery(Kilowatts(battery)).build()
    }

    fn band(from: f64, to: f64) -> ConsumptionBand {
        ConsumptionBand { from: Kilowatts(from), to: Kilowatts(to) }
    }

    #[test]
    fn test_half_green() {
        assert_abs_diff_eq!(readings(1.0, 0.0).green_share(band(0.0, 2.0)), 0.5);
    }

    #[test]
    fn test_green_power_goes_below_band_first() {
        assert_abs_diff_eq!(readings(1.5, 0.0).green_share(band(1.0, 2.0)), 0.5);
        assert_abs_diff_eq!(readings(0.8, 0.0).green_share(band(1.0, 2.0)), 0.0);
    }

    #[test]
    fn test_battery_discharge_is_green() {
        assert_abs_diff_eq!(readings(0.5, 0.5).green_share(band(0.0, 2.0)), 0.5);
        assert_abs_diff_eq!(readings(0.0, 3.0).green_share(band(0.0, 2.0)), 1.0);
    }

    #[test]
    fn test_charging_and_import_do_not_count() {
        assert_abs_diff_eq!(readings(1.0, -2.0).green_share(band(0.0, 2.0)), 0.5);
        assert_abs_diff_eq!(readings(-0.1, 0.0).green_share(band(0.0, 2.0)), 0.0);
    }

    #[test]
    fn test_empty_band() {
        assert_abs_diff_eq!(readings(2.0, 0.0).green_share(band(1.0, 1.0)), 1.0);
        assert_abs_diff_eq!(readings(1.0, 0.0).green_share(band(1.0, 1.0)), 0.0);
        assert_abs_diff_eq!(readings(0.0, 0.0).green_share(band(0.0, 0.0)), 0.0);
        assert_abs_diff_eq!(readings(0.4, 0.7).green_share(band(1.0, 1.0)), 1.0);
    }

    #[test]
    fn test_reversed_band() {
        assert_abs_diff_eq!(readings(0.0, 0.0).green_share(band(2.0, 1.0)), 0.0);
        assert_abs_diff_eq!(readings(1.5, 0.0).green_share(band(2.0, 1.0)), 0.0);
        assert_abs_diff_eq!(readings(3.0, 0.0).green_share(band(2.0, 1.0)), 1.0);
    }

    #[test]
    fn test_bounded_and_monotonic() {
        for (from, to) in [(0.0, 0.5), (0.3, 2.0), (1.0, 4.0), (2.5, 2.6)] {
            let band = band(from, to);
            let mut last_share = 0.0;
            for step in 0..=40 {
                let pv = f64::from(step) * 0.125;
                let share = readings(pv, 0.0).green_share(band);
                assert!((0.0..=1.0).contains(&share), "{share} is out of range");
                assert!(share >= last_share, "{share} < {last_share}");
                last_share = share;

                let with_battery = readings(pv, 0.25).green_share(band);
                assert!(with_battery >= share);
            }
        }
    }

    #[test]
    fn test_site_bands() {
        let readings = PowerReadings::builder()
            .pv(Kilowatts(3.0))
            .home(Kilowatts(1.0))
            .loadpoints(Kilowatts(4.0))
            .build();
        assert_abs_diff_eq!(readings.green_share(readings.home_band()), 1.0);
        assert_abs_diff_eq!(readings.green_share(readings.loadpoints_band()), 0.5);
    }
}
