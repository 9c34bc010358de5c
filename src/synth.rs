//! Price series sources.
//!
//! `RandomWalkSource` synthesizes a compounded random walk; `FixtureSource`
//! replays fixed closes so scans can be reproduced exactly.

use crate::config::ScannerConfig;
use crate::error::{Result, ScanError};
use crate::types::{PricePoint, PriceSeries, Timeframe};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::ThreadRng;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::collections::HashMap;
use tracing::debug;

pub trait PriceSource {
    fn load(&mut self, symbol: &str, timeframe: Timeframe) -> Result<PriceSeries>;
}

pub struct RandomWalkSource<R = ThreadRng> {
    rng: R,
    returns: Normal<f64>,
    lookback: Duration,
    initial_price: f64,
}

impl RandomWalkSource<ThreadRng> {
    pub fn new(config: &ScannerConfig) -> Result<Self> {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> RandomWalkSource<R> {
    pub fn with_rng(config: &ScannerConfig, rng: R) -> Result<Self> {
        // Normal::new accepts a negative std dev, so check both parameters here
        if !config.return_mean.is_finite() {
            return Err(ScanError::Distribution(format!("mean {} is not finite", config.return_mean)));
        }
        if !(config.return_std_dev >= 0.0 && config.return_std_dev.is_finite()) {
            return Err(ScanError::Distribution(format!(
                "std dev {} must be finite and non-negative",
                config.return_std_dev
            )));
        }
        let returns = Normal::new(config.return_mean, config.return_std_dev)
            .map_err(|e| ScanError::Distribution(e.to_string()))?;
        Ok(Self { rng, returns, lookback: config.lookback, initial_price: config.initial_price })
    }

    /// Series over `[end - lookback, end]`, both ends included.
    pub fn generate(&mut self, timeframe: Timeframe, end: DateTime<Utc>) -> Result<PriceSeries> {
        let bar = timeframe.bar_duration();
        let start = end - self.lookback;
        let count = (self.lookback.num_seconds() / bar.num_seconds()) as usize + 1;

        let mut price = self.initial_price;
        let points: Vec<PricePoint> = (0..count)
            .map(|i| {
                price *= 1.0 + self.returns.sample(&mut self.rng);
                PricePoint { timestamp: start + bar * i as i32, price }
            })
            .collect();

        PriceSeries::new(points)
    }
}

impl<R: Rng> PriceSource for RandomWalkSource<R> {
    fn load(&mut self, symbol: &str, timeframe: Timeframe) -> Result<PriceSeries> {
        let series = self.generate(timeframe, Utc::now())?;
        debug!("{} {}: synthesized {} bars", symbol, timeframe, series.len());
        Ok(series)
    }
}

/// Replays registered closes, stamped one bar apart and ending at `end`.
pub struct FixtureSource {
    end: DateTime<Utc>,
    closes: HashMap<(String, Timeframe), Vec<f64>>,
}

impl FixtureSource {
    pub fn new(end: DateTime<Utc>) -> Self {
        Self { end, closes: HashMap::new() }
    }

    pub fn with_closes(mut self, symbol: &str, timeframe: Timeframe, closes: Vec<f64>) -> Self {
        self.closes.insert((symbol.to_string(), timeframe), closes);
        self
    }

    /// Registers the same closes for every timeframe.
    pub fn with_all_timeframes(mut self, symbol: &str, closes: Vec<f64>) -> Self {
        for tf in Timeframe::ALL {
            self.closes.insert((symbol.to_string(), tf), closes.clone());
        }
        self
    }
}

impl PriceSource for FixtureSource {
    fn load(&mut self, symbol: &str, timeframe: Timeframe) -> Result<PriceSeries> {
        self.closes
            .get(&(symbol.to_string(), timeframe))
            .map(|closes| PriceSeries::from_closes(closes, self.end, timeframe))
            .ok_or_else(|| ScanError::MissingFixture { symbol: symbol.to_string(), timeframe })
    }
}
