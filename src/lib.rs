/// Market Data Generator - Synthetic Order Flow
///
/// Generates a stream of add/cancel order events for a liquid market and
/// writes it as comma-separated records, for feeding order book benchmarks
/// and replay harnesses. Features include:
/// - Two-phase generation (book pre-seed, then mixed add/cancel flow)
/// - Cancels that always target a live order
/// - Normally distributed prices around a fixed midpoint
/// - Seedable random source for reproducible runs
/// - JSON configuration with command line overrides
/// - Record reader for consuming generated files

pub mod config;
pub mod error;
pub mod event;
pub mod generator;
pub mod pool;
pub mod price;
pub mod record;
pub mod sink;
pub mod stats;

pub use config::GeneratorConfig;
pub use error::{ConfigError, GeneratorError, Result};
pub use event::{Action, Event, Side};
pub use generator::{generate, EventGenerator, Phase};
pub use pool::LiveOrderPool;
pub use price::PriceModel;
pub use record::{RecordError, RecordReader};
pub use sink::{CsvSink, EventSink};
pub use stats::{GenerationStats, Progress};
