use chrono::Utc;
use crypto_scanner::{
    config::ScannerConfig,
    detectors::{detect_expansion, detect_tc20},
    report::render_report,
    synth::{FixtureSource, RandomWalkSource},
    types::{PriceSeries, SignalType, Timeframe},
    MarketScanner, Runner,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;

fn padded(tail: &[f64]) -> Vec<f64> {
    let mut closes = vec![100.0; 20];
    closes.extend_from_slice(tail);
    closes
}

#[test]
fn test_btc_expansion_scenario() {
    let closes = padded(&[100.0, 101.0, 99.0, 115.0, 116.0]);
    let series = PriceSeries::from_closes(&closes, Utc::now(), Timeframe::M15);
    assert!(detect_expansion(&series).unwrap());
}

#[test]
fn test_tc20_exact_far_threshold_scenario() {
    // close[-10] = 100, close[-5] = 104, close[-1] = 110
    let closes = vec![100.0, 100.0, 100.0, 100.0, 100.0, 104.0, 104.0, 104.0, 104.0, 110.0];
    let series = PriceSeries::from_closes(&closes, Utc::now(), Timeframe::H1);
    assert!(!detect_tc20(&series).unwrap());
}

#[test]
fn test_random_walk_scan_end_to_end() {
    let config = ScannerConfig::default();
    let source = RandomWalkSource::with_rng(&config, StdRng::seed_from_u64(2024)).unwrap();
    let mut scanner = MarketScanner::new(source);

    let results = scanner.analyze_symbol("BTC/USDT").unwrap();
    assert_eq!(results.len(), 3);
    for (result, tf) in results.iter().zip(Timeframe::ALL) {
        assert_eq!(result.timeframe, tf);
        assert!(result.last_price > 0.0);
    }
}

#[test]
fn test_last_price_matches_series_tail() {
    let closes = padded(&[100.0, 101.0, 102.0, 103.0, 123.45]);
    let source = FixtureSource::new(Utc::now()).with_all_timeframes("SOL/USDT", closes);
    let mut scanner = MarketScanner::new(source);

    for result in scanner.analyze_symbol("SOL/USDT").unwrap() {
        assert_eq!(result.last_price, 123.45);
    }
}

#[test]
fn test_full_pass_writes_report_and_tracks_signals() {
    let tmp = tempfile::tempdir().unwrap();
    let closes = padded(&[100.0, 101.0, 99.0, 115.0, 116.0]);
    let source = FixtureSource::new(Utc::now()).with_all_timeframes("BTC/USDT", closes);
    let config = ScannerConfig::default().with_output_dir(tmp.path().join("crypto_reports"));
    let mut runner = Runner::new(config, source);

    let mut out = Vec::new();
    let summary = runner.run_once(&mut out).unwrap();
    let console = String::from_utf8(out).unwrap();

    let report_path = tmp.path().join("crypto_reports").join("BTC_USDT.html");
    assert_eq!(summary.scans[0].report_path, report_path);

    let html = fs::read_to_string(&report_path).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("BTC/USDT Market Analysis"));
    assert_eq!(html.matches("class=\"timeframe\"").count(), 3);
    assert!(html.contains("Last Price: $116.00"));

    for tf in ["15m", "1h", "4h"] {
        assert!(console.contains(&format!("- {}: EXPANSION SIGNAL", tf)));
    }

    let state = runner.tracker().get("BTC/USDT").unwrap();
    assert!(state.last_scan.is_some());
    assert!(state.signals.iter().all(|s| s.signal_type == SignalType::Expansion));
}

#[test]
fn test_render_differs_only_in_timestamp() {
    let closes = padded(&[100.0, 100.0, 100.0, 100.0, 100.0]);
    let source = FixtureSource::new(Utc::now()).with_all_timeframes("BTC/USDT", closes);
    let results = MarketScanner::new(source).analyze_symbol("BTC/USDT").unwrap();

    let a = chrono::Local::now();
    let b = a + chrono::Duration::seconds(61);
    let first = render_report("BTC/USDT", &results, a);
    let second = render_report("BTC/USDT", &results, b);

    let strip = |html: &str| -> Vec<String> {
        html.lines().filter(|l| !l.contains("Last updated:")).map(str::to_string).collect()
    };
    assert_ne!(first, second);
    assert_eq!(strip(&first), strip(&second));
}
