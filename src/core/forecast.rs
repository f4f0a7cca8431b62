use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::{
    core::{interval::Interval, series::Series, tariff::Rates},
    prelude::*,
    quantity::{
        Zero,
        co2::GramsPerKilowattHour,
        energy::KilowattHours,
        power::Kilowatts,
        price::KilowattHourPrice,
    },
};

/// Solar forecast rescaled by the actual yield so far.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarAdjustment {
    /// Adjusted forecast.
    pub solar: Series<Kilowatts>,

    /// Forecasted energy since the start of the day until now.
    pub forecasted_today: KilowattHours,

    /// Measured energy since the start of the day until now.
    pub yield_today: KilowattHours,

    pub scale: f64,
}

impl SolarAdjustment {
    /// Scale the forecast by the ratio of the measured and the forecasted yield for `today`.
    ///
    /// The ratio is assumed to hold for the rest of the day. Returns [`None`] when either yield is
    /// not positive, or below `min_energy` when the threshold is set.
    pub fn try_new(
        forecast: &Series<Kilowatts>,
        today: Interval,
        yield_today: KilowattHours,
        min_energy: Option<KilowattHours>,
    ) -> Option<Self> {
        if forecast.is_empty() {
            return None;
        }
        let forecasted_today: KilowattHours = forecast.accumulated(today);
        if forecasted_today <= KilowattHours::ZERO || yield_today <= KilowattHours::ZERO {
            debug!(?forecasted_today, ?yield_today, "not enough energy to adjust the forecast");
            return None;
        }
        if let Some(min_energy) = min_energy
            && (forecasted_today < min_energy || yield_today < min_energy)
        {
            debug!(?forecasted_today, ?yield_today, ?min_energy, "below the adjustment threshold");
            return None;
        }
        let scale = yield_today / forecasted_today;
        info!(?forecasted_today, ?yield_today, scale, "adjusted the solar forecast");
        Some(Self { solar: forecast.scaled(scale), forecasted_today, yield_today, scale })
    }
}

/// Raw tariff forecasts together with the adjusted solar forecast.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize)]
pub struct ForecastPayload {
    #[serde(skip_serializing_if = "Rates::is_empty")]
    pub co2: Rates<GramsPerKilowattHour>,

    #[serde(rename = "feedin", skip_serializing_if = "Rates::is_empty")]
    pub feed_in: Rates<KilowattHourPrice>,

    #[serde(skip_serializing_if = "Rates::is_empty")]
    pub grid: Rates<KilowattHourPrice>,

    #[serde(skip_serializing_if = "Series::is_empty")]
    pub solar: Series<Kilowatts>,

    pub adjusted: Option<SolarAdjustment>,
}
