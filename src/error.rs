use crate::types::Timeframe;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Insufficient data for {detector}: need {need} bars, got {got}")]
    InsufficientData { detector: &'static str, need: usize, got: usize },

    #[error("Price series timestamps not strictly increasing at index {index}")]
    UnorderedSeries { index: usize },

    #[error("Invalid return distribution: {0}")]
    Distribution(String),

    #[error("No fixture registered for {symbol} {timeframe}")]
    MissingFixture { symbol: String, timeframe: Timeframe },

    #[error("Failed to write console output: {0}")]
    Console(#[source] std::io::Error),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
