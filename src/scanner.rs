use crate::detectors::{detect_expansion, detect_tc20};
use crate::error::Result;
use crate::synth::PriceSource;
use crate::types::{Timeframe, TimeframeResult};
use tracing::debug;

pub struct MarketScanner<S> {
    source: S,
    timeframes: Vec<Timeframe>,
}

impl<S: PriceSource> MarketScanner<S> {
    pub fn new(source: S) -> Self {
        Self::with_timeframes(source, Timeframe::ALL.to_vec())
    }

    pub fn with_timeframes(source: S, timeframes: Vec<Timeframe>) -> Self {
        Self { source, timeframes }
    }

    /// One result per timeframe, in timeframe order. The first detector
    /// failure aborts the whole analysis.
    pub fn analyze_symbol(&mut self, symbol: &str) -> Result<Vec<TimeframeResult>> {
        self.timeframes
            .iter()
            .map(|&timeframe| {
                let series = self.source.load(symbol, timeframe)?;
                let expansion = detect_expansion(&series)?;
                let tc20 = detect_tc20(&series)?;
                let last_price = series.last_price().unwrap_or_default();

                debug!(
                    "{} {}: expansion={} tc20={} last={:.2}",
                    symbol, timeframe, expansion, tc20, last_price
                );
                Ok(TimeframeResult { timeframe, expansion, tc20, last_price })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use crate::synth::FixtureSource;
    use chrono::Utc;

    const FLAT: [f64; 10] = [100.0; 10];

    #[test]
    fn test_results_follow_timeframe_order() {
        let source = FixtureSource::new(Utc::now())
            .with_closes("BTC/USDT", Timeframe::M15, vec![100.0, 100.0, 100.0, 100.0, 100.0, 101.0, 99.0, 99.0, 115.0, 116.0])
            .with_closes("BTC/USDT", Timeframe::H1, FLAT.to_vec())
            .with_closes("BTC/USDT", Timeframe::H4, vec![100.0, 100.0, 100.0, 100.0, 100.0, 104.0, 104.0, 104.0, 104.0, 112.0]);
        let mut scanner = MarketScanner::new(source);

        let results = scanner.analyze_symbol("BTC/USDT").unwrap();
        let timeframes: Vec<Timeframe> = results.iter().map(|r| r.timeframe).collect();
        assert_eq!(timeframes, Timeframe::ALL);

        assert!(results[0].expansion);
        assert!(!results[1].expansion && !results[1].tc20);
        assert!(results[2].tc20);
        assert_eq!(results[0].last_price, 116.0);
        assert_eq!(results[2].last_price, 112.0);
    }

    #[test]
    fn test_short_series_aborts_analysis() {
        let source = FixtureSource::new(Utc::now())
            .with_closes("BTC/USDT", Timeframe::M15, FLAT.to_vec())
            .with_closes("BTC/USDT", Timeframe::H1, vec![100.0; 7])
            .with_closes("BTC/USDT", Timeframe::H4, FLAT.to_vec());
        let mut scanner = MarketScanner::new(source);

        let err = scanner.analyze_symbol("BTC/USDT").unwrap_err();
        assert!(matches!(err, ScanError::InsufficientData { detector: "tc20", need: 10, got: 7 }));
    }

    #[test]
    fn test_custom_timeframes() {
        let source = FixtureSource::new(Utc::now()).with_closes("ETH/USDT", Timeframe::H4, FLAT.to_vec());
        let mut scanner = MarketScanner::with_timeframes(source, vec![Timeframe::H4]);
        assert_eq!(scanner.analyze_symbol("ETH/USDT").unwrap().len(), 1);
    }
}
