use chrono::{DateTime, Local};

use crate::{
    core::{
        forecast::{ForecastPayload, SolarAdjustment},
        interval::Interval,
        series::Series,
        site::SiteSnapshot,
        tariff::TariffQuote,
    },
    fmt::FormattedPercentage,
    prelude::*,
    publish::{Key, Publish},
    quantity::{co2::GramsPerKilowattHour, energy::KilowattHours, price::KilowattHourPrice},
};

/// Everything derived from a site snapshot in one cycle.
#[must_use]
pub struct Metrics {
    pub green_share_home: f64,
    pub green_share_loadpoints: f64,
    pub quote: TariffQuote,
    pub price_home: Option<KilowattHourPrice>,
    pub co2_home: Option<GramsPerKilowattHour>,
    pub price_loadpoints: Option<KilowattHourPrice>,
    pub co2_loadpoints: Option<GramsPerKilowattHour>,
    pub forecast: ForecastPayload,
}

impl Metrics {
    #[instrument(skip_all, fields(now = %now))]
    pub fn collect(
        snapshot: &SiteSnapshot,
        now: DateTime<Local>,
        min_adjustment_energy: Option<KilowattHours>,
    ) -> Self {
        let power = snapshot.power;
        let green_share_home = power.green_share(power.home_band());
        let green_share_loadpoints = power.green_share(power.loadpoints_band());
        info!(
            home = ?FormattedPercentage(green_share_home),
            loadpoints = ?FormattedPercentage(green_share_loadpoints),
            "green share",
        );

        let quote = snapshot.tariffs.quote(now);
        debug!(?quote, "current tariffs");

        let tariffs = &snapshot.tariffs;
        let solar: Series<_> = tariffs.solar.as_ref().map(Series::from).unwrap_or_default();
        let adjusted = SolarAdjustment::try_new(
            &solar,
            Interval::today_until(now),
            snapshot.pv_energy_today,
            min_adjustment_energy,
        );
        let forecast = ForecastPayload {
            co2: tariffs.co2.clone().unwrap_or_default(),
            feed_in: tariffs.feed_in.clone().unwrap_or_default(),
            grid: tariffs.grid.clone().unwrap_or_default(),
            solar,
            adjusted,
        };

        Self {
            green_share_home,
            green_share_loadpoints,
            quote,
            price_home: quote.effective_price(green_share_home),
            co2_home: quote.effective_co2(green_share_home),
            price_loadpoints: quote.effective_price(green_share_loadpoints),
            co2_loadpoints: quote.effective_co2(green_share_loadpoints),
            forecast,
        }
    }

    /// Publish every available value, the missing ones are skipped.
    pub fn publish(&self, sink: &mut impl Publish) {
        sink.publish(Key::GreenShareHome, self.green_share_home);
        sink.publish(Key::GreenShareLoadpoints, self.green_share_loadpoints);

        publish_some(sink, Key::TariffGrid, self.quote.grid);
        publish_some(sink, Key::TariffFeedIn, self.quote.feed_in);
        publish_some(sink, Key::TariffCo2, self.quote.co2);
        publish_some(sink, Key::TariffSolar, self.quote.solar);
        publish_some(sink, Key::TariffPriceHome, self.price_home);
        publish_some(sink, Key::TariffCo2Home, self.co2_home);
        publish_some(sink, Key::TariffPriceLoadpoints, self.price_loadpoints);
        publish_some(sink, Key::TariffCo2Loadpoints, self.co2_loadpoints);

        sink.publish(Key::Forecast, &self.forecast);
    }
}

fn publish_some<T: serde::Serialize>(sink: &mut impl Publish, key: Key, value: Option<T>) {
    if let Some(value) = value {
        sink.publish(key, value);
    }
}

#[cfg(test)]
mod tests {
    use std::ops::Range;

    use approx::assert_abs_diff_eq;
    use chrono::{TimeDelta, TimeZone};
    use serde_json::{Map, Value};

    use super::*;
    use crate::{
        core::{
            green_share::PowerReadings,
            tariff::{Rate, Rates, Tariffs},
        },
        quantity::{Zero, power::Kilowatts},
    };

    fn at(hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 7, 1, hour, 0, 0).unwrap()
    }

    fn hourly<V>(hours: Range<u32>, value: impl Fn(u32) -> V) -> Rates<V> {
        hours
            .map(|hour| Rate {
                start: at(hour),
                end: at(hour) + TimeDelta::hours(1),
                value: value(hour),
            })
            .collect::<Vec<_>>()
            .into()
    }

    fn snapshot() -> SiteSnapshot {
        SiteSnapshot::builder()
            .power(
                PowerReadings::builder()
                    .pv(Kilowatts(2.0))
                    .home(Kilowatts(1.0))
                    .loadpoints(Kilowatts(2.0))
                    .build(),
            )
            .pv_energy_today(KilowattHours(8.0))
            .tariffs(Tariffs {
                grid: Some(hourly(0..24, |_| KilowattHourPrice(0.30))),
                feed_in: Some(hourly(0..24, |_| KilowattHourPrice(0.05))),
                co2: Some(hourly(0..24, |_| GramsPerKilowattHour(400.0))),
                solar: Some(hourly(6..18, |_| Kilowatts(2.0))),
            })
            .build()
    }

    #[test]
    fn test_collect() {
        let metrics = Metrics::collect(&snapshot(), at(11), None);
        assert_abs_diff_eq!(metrics.green_share_home, 1.0);
        assert_abs_diff_eq!(metrics.green_share_loadpoints, 0.5);
        assert_abs_diff_eq!(metrics.price_home.unwrap().0, 0.05);
        assert_abs_diff_eq!(metrics.price_loadpoints.unwrap().0, 0.175, epsilon = 1e-12);
        assert_abs_diff_eq!(metrics.co2_home.unwrap().0, 0.0);
        assert_abs_diff_eq!(metrics.co2_loadpoints.unwrap().0, 200.0);

        let adjusted = metrics.forecast.adjusted.unwrap();
        assert_abs_diff_eq!(adjusted.forecasted_today.0, 10.0);
        assert_abs_diff_eq!(adjusted.scale, 0.8);
        assert_eq!(adjusted.solar.len(), 12);
    }

    #[test]
    fn test_publish() {
        let metrics = Metrics::collect(&snapshot(), at(11) + TimeDelta::minutes(30), None);
        let mut published = Map::new();
        metrics.publish(&mut published);
        assert_eq!(published.len(), 11);
        assert_eq!(published["greenShareHome"], 1.0);
        assert_eq!(published["tariffGrid"], 0.3);
        assert_eq!(published["tariffSolar"], 2.0);
        assert_eq!(published["tariffCo2Loadpoints"], 200.0);
        assert_eq!(published["forecast"]["adjusted"]["yieldToday"], 8.0);
        assert_eq!(published["forecast"]["feedin"].as_array().map(Vec::len), Some(24));
    }

    #[test]
    fn test_last_slot_of_the_day() {
        let metrics = Metrics::collect(&snapshot(), at(23) + TimeDelta::minutes(30), None);
        assert_eq!(metrics.quote.grid, Some(KilowattHourPrice(0.30)));
        assert_eq!(metrics.quote.co2, Some(GramsPerKilowattHour(400.0)));
        assert_eq!(metrics.quote.solar, None);
    }

    #[test]
    fn test_publish_without_tariffs() {
        let snapshot = SiteSnapshot::builder()
            .power(PowerReadings::builder().pv(Kilowatts(1.0)).home(Kilowatts(2.0)).build())
            .pv_energy_today(KilowattHours(3.0))
            .build();
        let mut published = Map::new();
        Metrics::collect(&snapshot, at(12), None).publish(&mut published);
        assert_eq!(published.len(), 3);
        assert_eq!(published["greenShareHome"], 0.5);
        assert_eq!(published["greenShareLoadpoints"], 0.0);
        assert_eq!(published["forecast"], Value::Object(Map::new()));
    }

    #[test]
    fn test_forecast_without_yield() {
        let snapshot = SiteSnapshot { pv_energy_today: KilowattHours::ZERO, ..snapshot() };
        let metrics = Metrics::collect(&snapshot, at(11), None);
        assert!(metrics.forecast.adjusted.is_none());
        assert_eq!(metrics.forecast.solar.len(), 12);
    }

    #[test]
    fn test_forecast_before_sunrise() {
        let metrics = Metrics::collect(&snapshot(), at(5), None);
        assert!(metrics.forecast.adjusted.is_none());
        assert_eq!(metrics.forecast.solar.len(), 12);
    }
}
