/// Order flow generator
///
/// Produces the event stream in two phases:
///
/// 1. **Pre-seed**: `preseed_count` adds to give the book resting liquidity.
/// 2. **Main**: `total_events` events, each an add with probability
///    `add_ratio`, otherwise a cancel of a uniformly chosen live order. An
///    empty pool always forces an add.
///
/// Every add takes the next id from a counter starting at 1 and enters the
/// live pool; every cancel removes its id from the pool. A cancel therefore
/// always refers to an order that was added earlier and is still live.

use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, Result};
use crate::event::{Event, Side, MAX_QUANTITY, MIN_QUANTITY};
use crate::pool::LiveOrderPool;
use crate::price::PriceModel;
use crate::sink::{CsvSink, EventSink};
use crate::stats::{GenerationStats, Progress};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Upper bound on the live pool's up-front reservation; larger runs grow it
const MAX_POOL_RESERVE: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Preseed,
    Main,
    Done,
}

pub struct EventGenerator<R: Rng = StdRng> {
    config: GeneratorConfig,
    price_model: PriceModel,
    rng: R,
    pool: LiveOrderPool,
    next_order_id: u64,
    preseed_emitted: u64,
    main_emitted: u64,
    progress: Progress,
    stats: GenerationStats,
}

impl EventGenerator<StdRng> {
    /// Build a generator seeded from `config.seed`, or from OS entropy if unset
    pub fn from_config(config: GeneratorConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);
        debug!(seed, "seeding random source");
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> EventGenerator<R> {
    pub fn with_rng(config: GeneratorConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let price_model = PriceModel::new(config.price_mean, config.price_stddev)?;
        let progress = Progress::new(config.total_events, config.progress_steps);
        let capacity = usize::try_from(config.preseed_count)
            .unwrap_or(usize::MAX)
            .min(MAX_POOL_RESERVE);

        Ok(EventGenerator {
            price_model,
            rng,
            pool: LiveOrderPool::with_capacity(capacity),
            next_order_id: 1,
            preseed_emitted: 0,
            main_emitted: 0,
            progress,
            stats: GenerationStats::new(),
            config,
        })
    }

    pub fn phase(&self) -> Phase {
        if self.preseed_emitted < self.config.preseed_count {
            Phase::Preseed
        } else if self.main_emitted < self.config.total_events {
            Phase::Main
        } else {
            Phase::Done
        }
    }

    /// Produce the next event, or `None` once both phases are complete
    pub fn next_event(&mut self) -> Result<Option<Event>> {
        let event = match self.phase() {
            Phase::Preseed => {
                let event = self.add_order();
                self.stats.record_preseed_add(event.order_id(), price_of(&event));
                self.preseed_emitted += 1;
                if self.preseed_emitted == self.config.preseed_count {
                    debug!(live = self.pool.len(), "pre-seed complete");
                }
                event
            }
            Phase::Main => {
                self.progress.report(self.main_emitted);

                // Drawn every iteration so the random stream does not depend
                // on pool state
                let roll: f64 = self.rng.gen();
                let event = if roll < self.config.add_ratio || self.pool.is_empty() {
                    let forced = roll >= self.config.add_ratio;
                    let event = self.add_order();
                    self.stats
                        .record_main_add(event.order_id(), price_of(&event), forced);
                    event
                } else {
                    let event = self.cancel_order()?;
                    self.stats.record_cancel();
                    event
                };
                self.main_emitted += 1;
                event
            }
            Phase::Done => return Ok(None),
        };

        self.stats.observe_live(self.pool.len());
        Ok(Some(event))
    }

    fn add_order(&mut self) -> Event {
        let side = if self.rng.gen::<bool>() {
            Side::Buy
        } else {
            Side::Sell
        };
        let price = self.price_model.next_price(&mut self.rng);
        let quantity = self.rng.gen_range(MIN_QUANTITY..=MAX_QUANTITY);

        let order_id = self.next_order_id;
        self.next_order_id += 1;
        self.pool.insert(order_id);

        Event::Add {
            side,
            order_id,
            price,
            quantity,
        }
    }

    fn cancel_order(&mut self) -> Result<Event> {
        let order_id = self
            .pool
            .take_random(&mut self.rng)
            .ok_or(GeneratorError::EmptyPool)?;
        Ok(Event::Cancel { order_id })
    }

    /// Drive the generator to completion, emitting every event into `sink`
    pub fn run<S: EventSink + ?Sized>(&mut self, sink: &mut S) -> Result<GenerationStats> {
        info!(
            preseed = self.config.preseed_count,
            events = self.config.total_events,
            records = self.config.record_count(),
            add_ratio = self.config.add_ratio,
            price_mean = self.price_model.mean(),
            price_stddev = self.price_model.stddev(),
            "generating order flow"
        );
        self.stats.start();

        while let Some(event) = self.next_event()? {
            sink.emit(&event)?;
        }
        sink.finish()?;

        self.stats.finish();
        self.stats.log_summary();
        Ok(self.stats.clone())
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn live_orders(&self) -> &LiveOrderPool {
        &self.pool
    }

    /// Id the next add will receive
    pub fn next_order_id(&self) -> u64 {
        self.next_order_id
    }

    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }
}

impl<R: Rng> Iterator for EventGenerator<R> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event().transpose()
    }
}

fn price_of(event: &Event) -> i64 {
    match *event {
        Event::Add { price, .. } => price,
        Event::Cancel { .. } => 0,
    }
}

/// Generate a full run into the configured output (file or stdout)
///
/// The output handle is scoped to this call and released on every return
/// path.
pub fn generate(config: GeneratorConfig) -> Result<GenerationStats> {
    let mut generator = EventGenerator::from_config(config)?;
    info!(output = %generator.config().output.display(), "writing records");
    let mut sink = CsvSink::for_config(generator.config())?;
    generator.run(&mut sink)
}
