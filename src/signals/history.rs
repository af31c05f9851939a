//! Rolling record of emitted signals

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};

use crate::models::signal::Signal;

/// Append-only signal log, pruned by age.
///
/// Only the owning analyzer mutates it. Retained entries keep their
/// insertion order; pruning removes entries without reordering the rest.
/// A signal is recorded once: re-analysing an overlapping candle window
/// yields the same (pattern type, timestamp, direction) and is ignored.
#[derive(Debug, Clone)]
pub struct SignalHistory {
    entries: VecDeque<Signal>,
    retention: Duration,
}

impl SignalHistory {
    pub fn new(retention: Duration) -> Self {
        Self {
            entries: VecDeque::new(),
            retention,
        }
    }

    pub fn retention(&self) -> Duration {
        self.retention
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Signal> {
        self.entries.iter()
    }

    /// Most recently appended entry
    pub fn latest(&self) -> Option<&Signal> {
        self.entries.back()
    }

    /// True when an entry for the same pattern, bar and direction is retained
    pub fn contains(&self, signal: &Signal) -> bool {
        self.entries.iter().any(|entry| same_event(entry, signal))
    }

    /// Append the signals not yet recorded, in order, then prune.
    ///
    /// Returns the newly recorded signals and the number pruned.
    pub(crate) fn append(&mut self, signals: &[Signal], now: DateTime<Utc>) -> (Vec<Signal>, usize) {
        let mut recorded = Vec::new();
        for signal in signals {
            if self.contains(signal) {
                continue;
            }
            self.entries.push_back(signal.clone());
            recorded.push(signal.clone());
        }
        let pruned = self.prune(now);
        if let Some(cutoff) = now.checked_sub_signed(self.retention) {
            recorded.retain(|s| s.timestamp >= cutoff);
        }
        (recorded, pruned)
    }

    /// Drop entries whose timestamp is older than `now - retention`
    pub(crate) fn prune(&mut self, now: DateTime<Utc>) -> usize {
        let Some(cutoff) = now.checked_sub_signed(self.retention) else {
            return 0;
        };
        let before = self.entries.len();
        self.entries.retain(|s| s.timestamp >= cutoff);
        before - self.entries.len()
    }
}

fn same_event(a: &Signal, b: &Signal) -> bool {
    a.timestamp == b.timestamp && a.direction == b.direction && a.pattern_type == b.pattern_type
}

impl Default for SignalHistory {
    fn default() -> Self {
        Self::new(Duration::days(7))
    }
}
