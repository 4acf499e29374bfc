use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::strategies::StrategyKind;

/// Settings for an unattended self-play batch.
///
/// Every field has a default so a config file may specify any subset;
/// command-line flags override whatever the file provides.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SelfplayConfig {
    #[serde(default = "defaults::games")]
    pub games: u32,

    /// Master seed; per-game seeds derive from it. Random if omitted.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub strategy: StrategyKind,
}

impl Default for SelfplayConfig {
    fn default() -> Self {
        Self {
            games: defaults::games(),
            seed: None,
            strategy: StrategyKind::default(),
        }
    }
}

impl SelfplayConfig {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Layer command-line overrides on top of file or default values.
    pub fn with_overrides(
        mut self,
        games: Option<u32>,
        seed: Option<u64>,
        strategy: Option<StrategyKind>,
    ) -> Self {
        if let Some(games) = games {
            self.games = games;
        }
        if let Some(seed) = seed {
            self.seed = Some(seed);
        }
        if let Some(strategy) = strategy {
            self.strategy = strategy;
        }
        self
    }
}

mod defaults {
    pub fn games() -> u32 {
        100
    }
}
