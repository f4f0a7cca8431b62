use std::{fmt::Debug, fs, path::Path};

use serde::Deserialize;

use crate::{
    core::{green_share::PowerReadings, tariff::Tariffs},
    prelude::*,
    quantity::energy::KilowattHours,
};

/// Consistent site state for one publishing cycle.
#[derive(Clone, Debug, Default, Deserialize, bon::Builder)]
pub struct SiteSnapshot {
    #[serde(default)]
    #[builder(default)]
    pub power: PowerReadings,

    /// Solar energy measured since the start of the local day.
    #[serde(default, rename = "pv_energy_today_kwh")]
    #[builder(default)]
    pub pv_energy_today: KilowattHours,

    #[serde(default)]
    #[builder(default)]
    pub tariffs: Tariffs,
}

impl SiteSnapshot {
    #[instrument(name = "reading the snapshot…")]
    pub fn read_from<P: AsRef<Path> + Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            fs::read(path).with_context(|| format!("failed to read `{}`", path.display()))?;
        toml::from_slice(&contents).with_context(|| format!("failed to parse `{}`", path.display()))
    }
}
