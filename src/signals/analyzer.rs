//! Signal analyzer: scores raw pattern entries, runs the filter chain and
//! ranks the survivors.

use std::cmp::Ordering;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::config::AnalyzerConfig;
use crate::models::market::MarketData;
use crate::models::signal::{
    PatternMap, PatternType, PredictionRow, Signal, SignalDirection,
};
use crate::signals::error::AnalysisError;
use crate::signals::filters::{FilterChain, FilterContext};
use crate::signals::history::SignalHistory;
use crate::signals::scoring::{calculate_confidence, volume_factor};

/// Confidence and strength of prediction-derived signals.
///
/// The prediction model exposes no confidence output, so every prediction
/// signal carries this fixed value. This is a known limitation.
pub const PREDICTION_PLACEHOLDER_CONFIDENCE: f64 = 1.0;

/// Sub-type label of prediction-derived signals
pub const PREDICTION_LABEL: &str = "prediction";

pub struct SignalAnalyzer {
    config: AnalyzerConfig,
    filters: FilterChain,
    history: SignalHistory,
}

impl SignalAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        let filters = FilterChain::from_config(&config);
        let history = SignalHistory::new(Duration::days(config.history_retention_days));
        Ok(Self {
            config,
            filters,
            history,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn filter_chain(&self) -> &FilterChain {
        &self.filters
    }

    pub fn history(&self) -> &SignalHistory {
        &self.history
    }

    /// Score, filter and rank every timestamped pattern entry.
    ///
    /// The recency stage measures age against the latest candle, or the
    /// wall clock when `market` is empty.
    pub fn analyze_signals(&self, patterns: &PatternMap, market: &MarketData) -> Vec<Signal> {
        self.analyze_signals_at(patterns, market, reference_time(market))
    }

    /// [`analyze_signals`](Self::analyze_signals) with an explicit reference time
    pub fn analyze_signals_at(
        &self,
        patterns: &PatternMap,
        market: &MarketData,
        reference_time: DateTime<Utc>,
    ) -> Vec<Signal> {
        let candidates = self.build_candidates(patterns, market);
        let candidate_count = candidates.len();

        let ctx = FilterContext { reference_time };
        let mut signals = self.filters.apply(candidates, &ctx);
        sort_signals(&mut signals);

        info!(
            candidates = candidate_count,
            signals = signals.len(),
            "signal analysis complete"
        );
        signals
    }

    fn build_candidates(&self, patterns: &PatternMap, market: &MarketData) -> Vec<Signal> {
        let mut candidates = Vec::new();
        let mut skipped = 0usize;

        for (pattern_type, entries) in patterns {
            for entry in entries {
                let Some(timestamp) = entry.timestamp else {
                    skipped += 1;
                    continue;
                };

                let index = market.resolve_index(timestamp);
                let price = index.map_or(0.0, |i| market.candles()[i].close);
                let factor = index.map_or(1.0, |i| {
                    volume_factor(
                        market,
                        i,
                        self.config.volume_window,
                        self.config.volume_factor_cap,
                    )
                });

                let seq = candidates.len();
                candidates.push(Signal {
                    id: signal_id(pattern_type, timestamp, seq),
                    pattern_type: pattern_type.clone(),
                    pattern: entry
                        .pattern
                        .clone()
                        .unwrap_or_else(|| pattern_type.to_string()),
                    timestamp,
                    strength: entry.strength,
                    direction: entry.direction,
                    price,
                    confidence: calculate_confidence(entry.strength, factor),
                    confluence_count: None,
                });
            }
        }

        if skipped > 0 {
            debug!(skipped, "pattern entries without a timestamp were skipped");
        }
        candidates
    }

    /// Signals from a model prediction table.
    ///
    /// `1` maps to a bullish `price_increase`, `0` to a bearish
    /// `price_decrease`; any other value is neutral and dropped. No filter
    /// chain runs on this path and input order is preserved.
    pub fn generate_signals_from_predictions(&self, predictions: &[PredictionRow]) -> Vec<Signal> {
        let signals: Vec<Signal> = predictions
            .iter()
            .filter_map(|row| {
                let (pattern_type, direction) = match row.prediction {
                    1 => (PatternType::PriceIncrease, SignalDirection::Bullish),
                    0 => (PatternType::PriceDecrease, SignalDirection::Bearish),
                    _ => return None,
                };
                Some((row, pattern_type, direction))
            })
            .enumerate()
            .map(|(seq, (row, pattern_type, direction))| Signal {
                id: signal_id(&pattern_type, row.timestamp, seq),
                pattern_type,
                pattern: PREDICTION_LABEL.to_string(),
                timestamp: row.timestamp,
                strength: PREDICTION_PLACEHOLDER_CONFIDENCE,
                direction,
                price: row.close,
                confidence: PREDICTION_PLACEHOLDER_CONFIDENCE,
                confluence_count: None,
            })
            .collect();

        debug!(
            rows = predictions.len(),
            signals = signals.len(),
            "prediction signals generated"
        );
        signals
    }

    /// Record `signals` in the history and prune entries older than the
    /// retention window (7 days by default) measured from now.
    ///
    /// Returns the signals that were not already recorded.
    pub fn update_signal_history(&mut self, signals: &[Signal]) -> Vec<Signal> {
        self.update_signal_history_at(signals, Utc::now())
    }

    pub fn update_signal_history_at(&mut self, signals: &[Signal], now: DateTime<Utc>) -> Vec<Signal> {
        let (recorded, pruned) = self.history.append(signals, now);
        debug!(
            offered = signals.len(),
            appended = recorded.len(),
            pruned,
            retained = self.history.len(),
            "signal history updated"
        );
        recorded
    }
}

/// Latest candle timestamp, or now for an empty series
pub fn reference_time(market: &MarketData) -> DateTime<Utc> {
    market
        .latest()
        .map(|c| c.timestamp)
        .unwrap_or_else(Utc::now)
}

/// Descending by confidence, then by timestamp
pub fn sort_signals(signals: &mut [Signal]) {
    signals.sort_by(|a, b| compare_rank(b, a));
}

fn compare_rank(a: &Signal, b: &Signal) -> Ordering {
    a.confidence
        .total_cmp(&b.confidence)
        .then_with(|| a.timestamp.cmp(&b.timestamp))
}

fn signal_id(pattern_type: &PatternType, timestamp: DateTime<Utc>, seq: usize) -> String {
    format!("{}-{}-{}", pattern_type, timestamp.timestamp_millis(), seq)
}
