use crate::types::{Signal, SymbolState, TimeframeResult};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::HashMap;
use tracing::info;

/// In-memory signal history per symbol. Lives for one process run.
#[derive(Debug, Default)]
pub struct SignalTracker {
    /// Map of symbol -> state for that symbol
    states: HashMap<String, SymbolState>,
}

impl SignalTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the state for a symbol
    pub fn ensure(&mut self, symbol: &str) -> &mut SymbolState {
        self.states.entry(symbol.to_string()).or_default()
    }

    /// Append a signal for every result where a detector fired and stamp the
    /// scan time. Returns the newly added signals.
    pub fn record(&mut self, symbol: &str, results: &[TimeframeResult], now: DateTime<Utc>) -> Vec<Signal> {
        let new_signals: Vec<Signal> = results
            .iter()
            .filter_map(|r| {
                r.signal_type().map(|signal_type| Signal { timeframe: r.timeframe, signal_type, timestamp: now })
            })
            .collect();

        let state = self.ensure(symbol);
        state.last_scan = Some(now);
        state.signals.extend(new_signals.iter().cloned());

        if !new_signals.is_empty() {
            info!(
                "[Tracker] {}: {} new signal(s) (total: {})",
                symbol,
                new_signals.len(),
                state.signals.len()
            );
        }

        new_signals
    }

    pub fn get(&self, symbol: &str) -> Option<&SymbolState> {
        self.states.get(symbol)
    }

    /// Get total count of signals across all symbols
    pub fn total_signals(&self) -> usize {
        self.states.values().map(|s| s.signals.len()).sum()
    }

    /// Get count of signals per symbol
    pub fn signals_by_symbol(&self) -> HashMap<String, usize> {
        self.states
            .iter()
            .map(|(k, v)| (k.clone(), v.signals.len()))
            .collect()
    }

    pub fn status(&self) -> serde_json::Value {
        let last_scans: HashMap<&str, Option<String>> = self
            .states
            .iter()
            .map(|(k, v)| (k.as_str(), v.last_scan.map(|t| t.to_rfc3339())))
            .collect();

        json!({
            "symbolsTracked": self.states.len(),
            "signals": {
                "total": self.total_signals(),
                "bySymbol": self.signals_by_symbol(),
            },
            "lastScan": last_scans,
        })
    }
}
