/// Price model for a tight, liquid market
///
/// Each call draws once from a normal distribution centred on the midpoint and
/// truncates toward zero. Tails are not clamped: at the default spread a price
/// below zero sits hundreds of standard deviations out.

use crate::error::ConfigError;
use rand::Rng;
use rand_distr::{Distribution, Normal};

#[derive(Debug, Clone, Copy)]
pub struct PriceModel {
    dist: Normal<f64>,
    mean: f64,
    stddev: f64,
}

impl PriceModel {
    pub fn new(mean: f64, stddev: f64) -> Result<Self, ConfigError> {
        if !mean.is_finite() || !stddev.is_finite() || stddev < 0.0 {
            return Err(ConfigError::InvalidPriceDistribution { mean, stddev });
        }
        let dist = Normal::new(mean, stddev)
            .map_err(|_| ConfigError::InvalidPriceDistribution { mean, stddev })?;
        Ok(PriceModel { dist, mean, stddev })
    }

    pub fn next_price<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        self.dist.sample(rng) as i64
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn stddev(&self) -> f64 {
        self.stddev
    }
}
