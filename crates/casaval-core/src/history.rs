//! History ledger: append-only in-process log of served predictions
//!
//! Process-lifetime only. All access goes through one mutex so an append is
//! atomic: concurrent readers see either the whole entry or nothing. The
//! ledger is unbounded by default; deployments that run long can inject a
//! capacity bound, which evicts oldest-first.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::features::RawInput;

/// One served prediction. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Wall-clock time the prediction was served (`%Y-%m-%d %H:%M:%S`, UTC).
    pub timestamp: String,
    /// The raw input record as the caller supplied it.
    pub input: RawInput,
    /// Dollar price, rounded to cents.
    pub prediction: f64,
    /// Raw regressor output at full precision.
    pub price_value: f64,
}

pub struct HistoryLedger {
    entries: Mutex<Vec<HistoryEntry>>,
    capacity: Option<usize>,
}

impl Default for HistoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLedger {
    /// Unbounded ledger (grows for the life of the process).
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            capacity: None,
        }
    }

    /// Ledger bounded to the most recent `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            capacity: Some(capacity),
        }
    }

    /// Append an entry. Never fails; evicts the oldest entry only when a
    /// capacity bound is configured.
    pub fn append(&self, entry: HistoryEntry) {
        let mut entries = self.entries.lock().expect("history mutex poisoned");
        entries.push(entry);
        if let Some(cap) = self.capacity {
            if entries.len() > cap {
                let excess = entries.len() - cap;
                entries.drain(..excess);
            }
        }
    }

    /// The last `n` entries in insertion order; the whole ledger if shorter.
    pub fn recent(&self, n: usize) -> Vec<HistoryEntry> {
        let entries = self.entries.lock().expect("history mutex poisoned");
        let start = entries.len().saturating_sub(n);
        entries[start..].to_vec()
    }

    /// Mean of the recorded prices, or `None` on an empty ledger.
    pub fn average_price(&self) -> Option<f64> {
        let entries = self.entries.lock().expect("history mutex poisoned");
        if entries.is_empty() {
            return None;
        }
        let sum: f64 = entries.iter().map(|e| e.prediction).sum();
        Some(sum / entries.len() as f64)
    }

    /// Full, irreversible reset.
    pub fn clear(&self) {
        self.entries.lock().expect("history mutex poisoned").clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("history mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A copy of the whole ledger in insertion order, for exports.
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries.lock().expect("history mutex poisoned").clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn entry(price: f64) -> HistoryEntry {
        HistoryEntry {
            timestamp: "2025-06-01 12:00:00".to_string(),
            input: RawInput::new(),
            prediction: price,
            price_value: price / 100_000.0,
        }
    }

    #[test]
    fn test_append_and_recent_preserve_order() {
        let ledger = HistoryLedger::new();
        for price in [1.0, 2.0, 3.0] {
            ledger.append(entry(price));
        }
        let recent = ledger.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].prediction, 2.0);
        assert_eq!(recent[1].prediction, 3.0);
    }

    #[test]
    fn test_recent_on_short_ledger_returns_all() {
        let ledger = HistoryLedger::new();
        ledger.append(entry(1.0));
        assert_eq!(ledger.recent(10).len(), 1);
    }

    #[test]
    fn test_average_price_empty_is_none() {
        let ledger = HistoryLedger::new();
        assert!(ledger.average_price().is_none());
    }

    #[test]
    fn test_average_price() {
        let ledger = HistoryLedger::new();
        ledger.append(entry(100_000.0));
        ledger.append(entry(300_000.0));
        assert_eq!(ledger.average_price(), Some(200_000.0));
    }

    #[test]
    fn test_clear_resets_everything() {
        let ledger = HistoryLedger::new();
        ledger.append(entry(1.0));
        ledger.clear();
        assert!(ledger.recent(10).is_empty());
        assert!(ledger.average_price().is_none());
        assert_eq!(ledger.len(), 0);
    }

    #[test]
    fn test_capacity_bound_evicts_oldest() {
        let ledger = HistoryLedger::with_capacity(2);
        for price in [1.0, 2.0, 3.0] {
            ledger.append(entry(price));
        }
        let all = ledger.snapshot();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].prediction, 2.0);
        assert_eq!(all[1].prediction, 3.0);
    }

    #[test]
    fn test_unbounded_ledger_never_evicts() {
        let ledger = HistoryLedger::new();
        for i in 0..1000 {
            ledger.append(entry(i as f64));
        }
        assert_eq!(ledger.len(), 1000);
    }

    #[test]
    fn test_concurrent_append_and_read() {
        let ledger = Arc::new(HistoryLedger::new());
        let writer = {
            let ledger = Arc::clone(&ledger);
            std::thread::spawn(move || {
                for i in 0..500 {
                    ledger.append(entry(i as f64));
                }
            })
        };

        // Length never decreases and entries stay in insertion order
        let mut last_len = 0;
        while last_len < 500 {
            let snap = ledger.recent(500);
            assert!(snap.len() >= last_len);
            for pair in snap.windows(2) {
                assert!(pair[0].prediction < pair[1].prediction);
            }
            last_len = snap.len();
        }
        writer.join().unwrap();
        assert_eq!(ledger.len(), 500);
    }
}
