use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};

use crate::{
    cli::snapshot::SnapshotArgs,
    core::{interval::Interval, series::Series},
    prelude::*,
    quantity::{energy::KilowattHours, time::Hours},
};

#[derive(Parser)]
pub struct BurrowArgs {
    #[command(subcommand)]
    command: BurrowCommand,
}

impl BurrowArgs {
    pub fn run(self) -> Result {
        match self.command {
            BurrowCommand::Energy(args) => args.run(),
        }
    }
}

#[derive(Subcommand)]
pub enum BurrowCommand {
    /// Integrate the solar forecast over an interval.
    Energy(BurrowEnergyArgs),
}

#[derive(Parser)]
pub struct BurrowEnergyArgs {
    #[clap(flatten)]
    snapshot: SnapshotArgs,

    /// Interval start, defaults to the local midnight.
    #[clap(long)]
    from: Option<DateTime<Local>>,

    /// Interval end, defaults to now.
    #[clap(long)]
    to: Option<DateTime<Local>>,
}

impl BurrowEnergyArgs {
    #[instrument(skip_all)]
    fn run(self) -> Result {
        let snapshot = self.snapshot.read()?;
        let today = Interval::today_until(self.snapshot.now());
        let interval =
            Interval::try_new(self.from.unwrap_or(today.start), self.to.unwrap_or(today.end))?;

        let forecast =
            snapshot.tariffs.solar.as_ref().context("the snapshot has no solar forecast")?;
        let series = Series::from(forecast);
        let energy: KilowattHours = series.accumulated(interval);
        info!(
            ?interval,
            duration = ?Hours::from(interval.duration()),
            n_points = series.len(),
            ?energy,
            "integrated",
        );
        println!("{energy}");
        Ok(())
    }
}
