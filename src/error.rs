/// Error types for configuration and generation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("add_ratio must be within [0, 1], got {0}")]
    InvalidAddRatio(f64),

    #[error("invalid price distribution: mean {mean}, stddev {stddev}")]
    InvalidPriceDistribution { mean: f64, stddev: f64 },

    #[error("invalid value for {flag}: {value}")]
    InvalidArgument { flag: String, value: String },
}

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("output sink failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A cancel was attempted with no live orders. The empty-pool guard in
    /// the main phase makes this unreachable.
    #[error("cancel attempted on an empty live-order pool")]
    EmptyPool,
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
