/// Generation statistics and progress reporting
///
/// Counts what a run emitted and how fast. Nothing here feeds back into the
/// event stream.

use std::time::{Duration, Instant};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct GenerationStats {
    start_time: Option<Instant>,
    elapsed: Option<Duration>,

    preseed_adds: u64,
    main_adds: u64,
    // Adds taken only because the pool was empty
    forced_adds: u64,
    cancels: u64,

    peak_live: usize,
    final_live: usize,
    last_order_id: u64,

    min_price: Option<i64>,
    max_price: Option<i64>,
}

impl GenerationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        if self.start_time.is_none() {
            self.start_time = Some(Instant::now());
        }
    }

    pub fn record_preseed_add(&mut self, order_id: u64, price: i64) {
        self.start();
        self.preseed_adds += 1;
        self.record_add(order_id, price);
    }

    pub fn record_main_add(&mut self, order_id: u64, price: i64, forced: bool) {
        self.start();
        self.main_adds += 1;
        if forced {
            self.forced_adds += 1;
        }
        self.record_add(order_id, price);
    }

    fn record_add(&mut self, order_id: u64, price: i64) {
        self.last_order_id = order_id;
        self.min_price = Some(self.min_price.map_or(price, |p| p.min(price)));
        self.max_price = Some(self.max_price.map_or(price, |p| p.max(price)));
    }

    pub fn record_cancel(&mut self) {
        self.start();
        self.cancels += 1;
    }

    pub fn observe_live(&mut self, live: usize) {
        self.peak_live = self.peak_live.max(live);
        self.final_live = live;
    }

    /// Freeze elapsed time at the end of a run
    pub fn finish(&mut self) {
        self.elapsed = self.start_time.map(|st| st.elapsed());
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed.or_else(|| self.start_time.map(|st| st.elapsed()))
    }

    pub fn events_per_sec(&self) -> f64 {
        match self.elapsed() {
            Some(elapsed) if elapsed.as_secs_f64() > 0.0 => {
                self.total_events() as f64 / elapsed.as_secs_f64()
            }
            _ => 0.0,
        }
    }

    pub fn total_events(&self) -> u64 {
        self.total_adds() + self.cancels
    }

    pub fn total_adds(&self) -> u64 {
        self.preseed_adds + self.main_adds
    }

    pub fn preseed_adds(&self) -> u64 {
        self.preseed_adds
    }

    pub fn main_adds(&self) -> u64 {
        self.main_adds
    }

    pub fn forced_adds(&self) -> u64 {
        self.forced_adds
    }

    pub fn cancels(&self) -> u64 {
        self.cancels
    }

    pub fn peak_live(&self) -> usize {
        self.peak_live
    }

    pub fn final_live(&self) -> usize {
        self.final_live
    }

    /// Highest order id assigned, which is also the number of orders created
    pub fn last_order_id(&self) -> u64 {
        self.last_order_id
    }

    pub fn price_range(&self) -> Option<(i64, i64)> {
        self.min_price.zip(self.max_price)
    }

    pub fn log_summary(&self) {
        info!(
            events = self.total_events(),
            adds = self.total_adds(),
            cancels = self.cancels,
            orders = self.last_order_id,
            "generation finished"
        );
        info!(
            preseed = self.preseed_adds,
            main = self.main_adds,
            forced = self.forced_adds,
            "add breakdown"
        );
        info!(peak = self.peak_live, last = self.final_live, "live orders");
        if let Some((min, max)) = self.price_range() {
            info!(min, max, "price range");
        }
        info!(
            elapsed = ?self.elapsed(),
            events_per_sec = self.events_per_sec() as u64,
            "throughput"
        );
    }
}

/// Reports main-phase progress at evenly spaced points
///
/// Iteration `i` falls in step `i * steps / total`; a report fires on the
/// first iteration of each step, so a run reports at most `steps` times
/// whether or not `total` divides evenly.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    total: u64,
    steps: u32,
}

impl Progress {
    /// `steps` reports over `total` iterations; 0 steps disables reporting
    pub fn new(total: u64, steps: u32) -> Self {
        Progress { total, steps }
    }

    fn step_at(&self, i: u64) -> u64 {
        // u128 keeps i * steps exact for any u64 total
        (i as u128 * self.steps as u128 / self.total as u128) as u64
    }

    /// Percentage to report before running iteration `i`, if any
    pub fn checkpoint(&self, i: u64) -> Option<u64> {
        if self.steps == 0 || i >= self.total {
            return None;
        }
        let step = self.step_at(i);
        if i > 0 && step == self.step_at(i - 1) {
            return None;
        }
        Some(step * 100 / self.steps as u64)
    }

    pub fn report(&self, i: u64) {
        if let Some(pct) = self.checkpoint(i) {
            info!("... {}% complete", pct);
        }
    }
}
