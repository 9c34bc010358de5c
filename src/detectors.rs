use crate::error::{Result, ScanError};
use crate::types::PriceSeries;

/// Bars in the expansion window
pub const EXPANSION_WINDOW: usize = 5;
/// Range / min above which the window counts as expanding
pub const EXPANSION_THRESHOLD: f64 = 0.15;

/// Bars required by TC20 (the far lookback)
pub const TC20_WINDOW: usize = 10;
pub const TC20_NEAR_OFFSET: usize = 5;
pub const TC20_NEAR_GAIN: f64 = 1.05;
pub const TC20_FAR_GAIN: f64 = 1.1;

fn require(series: &PriceSeries, detector: &'static str, need: usize) -> Result<Vec<f64>> {
    if series.len() < need {
        return Err(ScanError::InsufficientData { detector, need, got: series.len() });
    }
    Ok(series.closes())
}

/// True when the last five closes span more than 15% of their minimum.
pub fn detect_expansion(series: &PriceSeries) -> Result<bool> {
    let closes = require(series, "expansion", EXPANSION_WINDOW)?;
    let window = &closes[closes.len() - EXPANSION_WINDOW..];

    let (min, max) = window
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &c| (lo.min(c), hi.max(c)));

    Ok((max - min) / min > EXPANSION_THRESHOLD)
}

/// True when the last close beats the 5th-from-last by more than 5% and the
/// 10th-from-last by more than 10%. Both comparisons are strict.
pub fn detect_tc20(series: &PriceSeries) -> Result<bool> {
    let closes = require(series, "tc20", TC20_WINDOW)?;
    let n = closes.len();
    let last = closes[n - 1];
    let near = closes[n - TC20_NEAR_OFFSET];
    let far = closes[n - TC20_WINDOW];

    Ok(last > near * TC20_NEAR_GAIN && last > far * TC20_FAR_GAIN)
}
