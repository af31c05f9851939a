//! Ordered filter chain applied to candidate signals.
//!
//! Stages run in a fixed order, strength then recency then confluence, and
//! each stage only sees the survivors of the previous one.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::config::AnalyzerConfig;
use crate::models::signal::{Signal, SignalDirection};

const SECONDS_PER_HOUR: i64 = 3600;

/// Per-call context shared by all stages
#[derive(Debug, Clone, Copy)]
pub struct FilterContext {
    /// "Now" as far as time-windowed stages are concerned
    pub reference_time: DateTime<Utc>,
}

/// A pure transform from one signal list to another
pub trait SignalFilter {
    fn name(&self) -> &'static str;

    fn apply(&self, signals: Vec<Signal>, ctx: &FilterContext) -> Vec<Signal>;
}

/// Drops signals whose strength is below the threshold
#[derive(Debug, Clone)]
pub struct StrengthFilter {
    pub min_strength: f64,
}

impl SignalFilter for StrengthFilter {
    fn name(&self) -> &'static str {
        "strength"
    }

    fn apply(&self, signals: Vec<Signal>, _ctx: &FilterContext) -> Vec<Signal> {
        // NaN strengths fail the comparison and are dropped too
        signals
            .into_iter()
            .filter(|s| s.strength >= self.min_strength)
            .collect()
    }
}

/// Time-window stage. Without a lookback it passes everything through.
#[derive(Debug, Clone, Default)]
pub struct RecencyFilter {
    lookback: Option<Duration>,
}

impl RecencyFilter {
    pub fn disabled() -> Self {
        Self { lookback: None }
    }

    pub fn with_lookback(lookback: Duration) -> Self {
        Self {
            lookback: Some(lookback),
        }
    }

    pub fn lookback(&self) -> Option<Duration> {
        self.lookback
    }

    pub fn is_enabled(&self) -> bool {
        self.lookback.is_some()
    }
}

impl SignalFilter for RecencyFilter {
    fn name(&self) -> &'static str {
        "recency"
    }

    fn apply(&self, signals: Vec<Signal>, ctx: &FilterContext) -> Vec<Signal> {
        let Some(lookback) = self.lookback else {
            return signals;
        };
        let Some(cutoff) = ctx.reference_time.checked_sub_signed(lookback) else {
            return signals;
        };
        signals
            .into_iter()
            .filter(|s| s.timestamp >= cutoff)
            .collect()
    }
}

/// Keeps one representative per confluent (hour, direction) bucket.
///
/// Buckets with fewer than `min_group_size` members are dropped entirely;
/// isolated signals are suppressed on purpose. The survivor is the member
/// with the highest confidence (later timestamp, then first seen, on ties)
/// and carries `confluence_count` = bucket size.
#[derive(Debug, Clone)]
pub struct ConfluenceFilter {
    pub enabled: bool,
    pub min_group_size: usize,
}

impl Default for ConfluenceFilter {
    fn default() -> Self {
        Self {
            enabled: true,
            min_group_size: 2,
        }
    }
}

impl SignalFilter for ConfluenceFilter {
    fn name(&self) -> &'static str {
        "confluence"
    }

    fn apply(&self, signals: Vec<Signal>, _ctx: &FilterContext) -> Vec<Signal> {
        if !self.enabled {
            return signals;
        }

        let mut buckets: BTreeMap<(i64, SignalDirection), Vec<Signal>> = BTreeMap::new();
        for signal in signals {
            let hour = signal.timestamp.timestamp().div_euclid(SECONDS_PER_HOUR);
            buckets.entry((hour, signal.direction)).or_default().push(signal);
        }

        buckets
            .into_values()
            .filter(|group| group.len() >= self.min_group_size)
            .filter_map(|group| {
                let size = group.len();
                let best = group.into_iter().reduce(|best, candidate| {
                    let better = candidate
                        .confidence
                        .total_cmp(&best.confidence)
                        .then(candidate.timestamp.cmp(&best.timestamp))
                        .is_gt();
                    if better {
                        candidate
                    } else {
                        best
                    }
                })?;
                Some(Signal {
                    confluence_count: Some(size),
                    ..best
                })
            })
            .collect()
    }
}

/// Explicit ordered list of filter stages
pub struct FilterChain {
    stages: Vec<Box<dyn SignalFilter + Send + Sync>>,
}

impl FilterChain {
    pub fn new(stages: Vec<Box<dyn SignalFilter + Send + Sync>>) -> Self {
        Self { stages }
    }

    /// Strength, recency, confluence, configured from `config`
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        let lookback = config
            .recency
            .lookback_hours
            .filter(|_| config.recency.enabled)
            .and_then(|hours| i64::try_from(hours).ok())
            .and_then(Duration::try_hours);
        let recency = match lookback {
            Some(lookback) => RecencyFilter::with_lookback(lookback),
            None => RecencyFilter::disabled(),
        };

        Self::new(vec![
            Box::new(StrengthFilter {
                min_strength: config.min_strength,
            }),
            Box::new(recency),
            Box::new(ConfluenceFilter {
                enabled: config.confluence.enabled,
                min_group_size: config.confluence.min_group_size,
            }),
        ])
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn apply(&self, signals: Vec<Signal>, ctx: &FilterContext) -> Vec<Signal> {
        self.stages.iter().fold(signals, |signals, stage| {
            let before = signals.len();
            let after = stage.apply(signals, ctx);
            debug!(
                stage = stage.name(),
                before,
                after = after.len(),
                "filter stage applied"
            );
            after
        })
    }
}
