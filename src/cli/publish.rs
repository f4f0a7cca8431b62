use clap::{Parser, ValueEnum};
use serde_json::Map;

use crate::{
    cli::snapshot::SnapshotArgs,
    core::metrics::Metrics,
    prelude::*,
    quantity::energy::KilowattHours,
    tables::{build_metrics_table, build_solar_forecast_table},
};

#[derive(Copy, Clone, ValueEnum)]
pub enum Format {
    /// Published keys and values as a JSON object.
    Json,

    /// Human-readable tables.
    Table,
}

#[derive(Parser)]
pub struct PublishArgs {
    #[clap(flatten)]
    snapshot: SnapshotArgs,

    #[clap(long, value_enum, default_value = "json", env = "FORMAT")]
    format: Format,

    /// Do not adjust the solar forecast until both the forecasted and the measured yield reach
    /// this energy in kilowatt-hours. Disabled by default.
    #[clap(long = "min-adjustment-energy-kwh", env = "MIN_ADJUSTMENT_ENERGY_KWH")]
    min_adjustment_energy: Option<KilowattHours>,
}

impl PublishArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let snapshot = self.snapshot.read()?;
        let now = self.snapshot.now();
        let metrics = Metrics::collect(&snapshot, now, self.min_adjustment_energy);

        match self.format {
            Format::Json => {
                let mut published = Map::new();
                metrics.publish(&mut published);
                info!(n_keys = published.len(), "published");
                println!("{}", serde_json::to_string_pretty(&published)?);
            }
            Format::Table => {
                println!("{}", build_metrics_table(&metrics));
                if !metrics.forecast.solar.is_empty() {
                    println!("{}", build_solar_forecast_table(&metrics));
                }
            }
        }
        Ok(())
    }
}
