use crate::error::{Result, ScanError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "15m")]
    M15,
    #[serde(rename = "1h")]
    H1,
    #[serde(rename = "4h")]
    H4,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Self::M15, Self::H1, Self::H4];

    pub fn as_str(self) -> &'static str {
        match self { Self::M15 => "15m", Self::H1 => "1h", Self::H4 => "4h" }
    }

    /// Length of one bar at this granularity
    pub fn bar_duration(self) -> Duration {
        match self {
            Self::M15 => Duration::minutes(15),
            Self::H1 => Duration::hours(1),
            Self::H4 => Duration::hours(4),
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalType { Expansion, Tc20 }

impl SignalType {
    /// Uppercase form used in the console summary
    pub fn label(self) -> &'static str {
        match self { Self::Expansion => "EXPANSION", Self::Tc20 => "TC20" }
    }
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self { Self::Expansion => "expansion", Self::Tc20 => "tc20" })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint { pub timestamp: DateTime<Utc>, pub price: f64 }

/// Time-ordered close prices for one symbol/timeframe pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Result<Self> {
        if let Some(index) = points.windows(2).position(|w| w[1].timestamp <= w[0].timestamp) {
            return Err(ScanError::UnorderedSeries { index: index + 1 });
        }
        Ok(Self { points })
    }

    /// Stamps `prices` one bar apart so the last one lands on `end`.
    pub fn from_closes(prices: &[f64], end: DateTime<Utc>, timeframe: Timeframe) -> Self {
        let bar = timeframe.bar_duration();
        let n = prices.len() as i32;
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| PricePoint { timestamp: end - bar * (n - 1 - i as i32), price })
            .collect();
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn last_price(&self) -> Option<f64> {
        self.points.last().map(|p| p.price)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeframeResult { pub timeframe: Timeframe, pub expansion: bool, pub tc20: bool, pub last_price: f64 }

impl TimeframeResult {
    /// Expansion wins when both detectors fire.
    pub fn signal_type(&self) -> Option<SignalType> {
        if self.expansion {
            Some(SignalType::Expansion)
        } else if self.tc20 {
            Some(SignalType::Tc20)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal { pub timeframe: Timeframe, pub signal_type: SignalType, pub timestamp: DateTime<Utc> }

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolState { pub last_scan: Option<DateTime<Utc>>, pub signals: Vec<Signal> }
