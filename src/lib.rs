pub mod config;
pub mod detectors;
pub mod error;
pub mod html;
pub mod report;
pub mod runner;
pub mod scanner;
pub mod synth;
pub mod tracker;
pub mod types;

// Re-export for tests
pub use error::{Result, ScanError};
pub use runner::Runner;
pub use scanner::MarketScanner;
