use crate::types::Timeframe;
use chrono::Duration;
use std::path::PathBuf;

pub const DEFAULT_SYMBOLS: &[&str] = &["BTC/USDT"];
pub const DEFAULT_OUTPUT_DIR: &str = "crypto_reports";
pub const LOOKBACK_DAYS: i64 = 30;
pub const INITIAL_PRICE: f64 = 30_000.0;
pub const RETURN_MEAN: f64 = 0.001;
pub const RETURN_STD_DEV: f64 = 0.02;

/// Fixed scan parameters. Not read from the environment or command line.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub symbols: Vec<String>,
    pub timeframes: Vec<Timeframe>,
    pub output_dir: PathBuf,
    pub lookback: Duration,
    pub initial_price: f64,
    pub return_mean: f64,
    pub return_std_dev: f64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            timeframes: Timeframe::ALL.to_vec(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            lookback: Duration::days(LOOKBACK_DAYS),
            initial_price: INITIAL_PRICE,
            return_mean: RETURN_MEAN,
            return_std_dev: RETURN_STD_DEV,
        }
    }
}

impl ScannerConfig {
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }
}
