/// Generator configuration
///
/// Every knob of a run lives here and is handed to the generator at
/// construction. Values can come from defaults, a JSON file, or command line
/// overrides applied on top of either.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_TOTAL_EVENTS: u64 = 2_000_000;
pub const DEFAULT_PRESEED_COUNT: u64 = 50_000;
pub const DEFAULT_ADD_RATIO: f64 = 0.55;
pub const DEFAULT_OUTPUT: &str = "market_data_large.csv";
pub const DEFAULT_PRICE_MEAN: f64 = 10_000.0;
pub const DEFAULT_PRICE_STDDEV: f64 = 25.0;
pub const DEFAULT_PROGRESS_STEPS: u32 = 10;

/// Output destination meaning "write to stdout"
pub const STDOUT_TARGET: &str = "-";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of main-phase events (adds and cancels)
    pub total_events: u64,
    /// Number of adds emitted before the main phase
    pub preseed_count: u64,
    /// Probability that a main-phase event is an add
    pub add_ratio: f64,
    pub price_mean: f64,
    pub price_stddev: f64,
    /// Output file path, or "-" for stdout
    pub output: PathBuf,
    /// Seed for the random source; `None` draws one from OS entropy
    pub seed: Option<u64>,
    /// Number of progress reports over the main phase; 0 disables them
    pub progress_steps: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            total_events: DEFAULT_TOTAL_EVENTS,
            preseed_count: DEFAULT_PRESEED_COUNT,
            add_ratio: DEFAULT_ADD_RATIO,
            price_mean: DEFAULT_PRICE_MEAN,
            price_stddev: DEFAULT_PRICE_STDDEV,
            output: PathBuf::from(DEFAULT_OUTPUT),
            seed: None,
            progress_steps: DEFAULT_PROGRESS_STEPS,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a JSON file; missing fields take defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            source: e,
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.add_ratio) {
            return Err(ConfigError::InvalidAddRatio(self.add_ratio));
        }
        if !self.price_mean.is_finite() || !self.price_stddev.is_finite() || self.price_stddev < 0.0
        {
            return Err(ConfigError::InvalidPriceDistribution {
                mean: self.price_mean,
                stddev: self.price_stddev,
            });
        }
        Ok(())
    }

    pub fn writes_to_stdout(&self) -> bool {
        self.output.as_os_str() == STDOUT_TARGET
    }

    /// Total number of records a run emits
    pub fn record_count(&self) -> u64 {
        self.preseed_count.saturating_add(self.total_events)
    }
}
