//! One scan pass over the configured symbols.

use crate::config::ScannerConfig;
use crate::error::{Result, ScanError};
use crate::report::{render_report, write_report};
use crate::scanner::MarketScanner;
use crate::synth::{PriceSource, RandomWalkSource};
use crate::tracker::SignalTracker;
use crate::types::{Signal, TimeframeResult};
use chrono::{Local, Utc};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const SEPARATOR_WIDTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Scanning(String),
    Reporting(String),
    Summarizing,
}

#[derive(Debug, Clone)]
pub struct SymbolScan {
    pub symbol: String,
    pub results: Vec<TimeframeResult>,
    pub new_signals: Vec<Signal>,
    pub report_path: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub scans: Vec<SymbolScan>,
}

impl RunSummary {
    pub fn new_signal_count(&self) -> usize {
        self.scans.iter().map(|s| s.new_signals.len()).sum()
    }
}

pub struct Runner<S> {
    config: ScannerConfig,
    scanner: MarketScanner<S>,
    tracker: SignalTracker,
    phase: RunPhase,
}

impl Runner<RandomWalkSource> {
    pub fn from_config(config: ScannerConfig) -> Result<Self> {
        let source = RandomWalkSource::new(&config)?;
        Ok(Self::new(config, source))
    }
}

impl<S: PriceSource> Runner<S> {
    pub fn new(config: ScannerConfig, source: S) -> Self {
        let scanner = MarketScanner::with_timeframes(source, config.timeframes.clone());
        Self { config, scanner, tracker: SignalTracker::new(), phase: RunPhase::Idle }
    }

    pub fn tracker(&self) -> &SignalTracker {
        &self.tracker
    }

    pub fn phase(&self) -> &RunPhase {
        &self.phase
    }

    pub fn status(&self) -> serde_json::Value {
        self.tracker.status()
    }

    fn enter(&mut self, phase: RunPhase) {
        debug!("phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// Scans every configured symbol once, writing the console summary to
    /// `out`. The first error aborts the remaining symbols.
    pub fn run_once<W: Write>(&mut self, out: &mut W) -> Result<RunSummary> {
        let separator = "=".repeat(SEPARATOR_WIDTH);
        writeln!(out, "Starting crypto scanner at {}", Local::now().format("%Y-%m-%d %H:%M:%S%.6f"))
            .and_then(|_| writeln!(out, "{}", separator))
            .map_err(ScanError::Console)?;

        let mut summary = RunSummary::default();
        for symbol in self.config.symbols.clone() {
            let scan = self.scan_symbol(&symbol)?;
            write_symbol_summary(out, &scan, &separator)?;
            summary.scans.push(scan);
        }

        self.enter(RunPhase::Summarizing);
        info!(
            "Scan complete: {} symbol(s), {} new signal(s), status {}",
            summary.scans.len(),
            summary.new_signal_count(),
            self.status()
        );
        self.enter(RunPhase::Idle);
        Ok(summary)
    }

    fn scan_symbol(&mut self, symbol: &str) -> Result<SymbolScan> {
        self.tracker.ensure(symbol);

        self.enter(RunPhase::Scanning(symbol.to_string()));
        let results = self.scanner.analyze_symbol(symbol)?;

        self.enter(RunPhase::Reporting(symbol.to_string()));
        let document = render_report(symbol, &results, Local::now());
        let report_path = write_report(&self.config.output_dir, symbol, &document)?;

        let new_signals = self.tracker.record(symbol, &results, Utc::now());
        Ok(SymbolScan { symbol: symbol.to_string(), results, new_signals, report_path })
    }
}

fn file_uri(path: &Path) -> String {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", absolute.display())
}

fn write_symbol_summary<W: Write>(out: &mut W, scan: &SymbolScan, separator: &str) -> Result<()> {
    let mut write = || -> std::io::Result<()> {
        if scan.new_signals.is_empty() {
            writeln!(out, "\nNo new signals for {}", scan.symbol)?;
        } else {
            writeln!(out, "\nNEW SIGNALS FOR {}:", scan.symbol)?;
            for signal in &scan.new_signals {
                writeln!(out, "- {}: {} SIGNAL", signal.timeframe, signal.signal_type.label())?;
            }
            writeln!(out, "Full report: {}", file_uri(&scan.report_path))?;
        }
        writeln!(out, "{}", separator)
    };
    write().map_err(ScanError::Console)
}
