use std::path::PathBuf;

use chrono::{DateTime, Local};
use clap::Parser;

use crate::{core::site::SiteSnapshot, prelude::*};

#[derive(Parser)]
pub struct SnapshotArgs {
    /// TOML file with the site power readings, today's solar yield, and the tariffs.
    #[clap(long = "snapshot", env = "SITE_SNAPSHOT", default_value = "site.toml")]
    pub path: PathBuf,

    /// Evaluate at the given time instead of the current one.
    ///
    /// For example: `2025-07-01T14:00:00+02:00`.
    #[clap(long, env = "NOW")]
    pub now: Option<DateTime<Local>>,
}

impl SnapshotArgs {
    pub fn now(&self) -> DateTime<Local> {
        self.now.unwrap_or_else(Local::now)
    }

    pub fn read(&self) -> Result<SiteSnapshot> {
        SiteSnapshot::read_from(&self.path)
    }
}
