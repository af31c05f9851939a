//! Conversion of positional pattern flags into discrete pattern entries

use crate::models::indicators::Candle;
use crate::models::signal::{PatternEvent, PatternMap, PatternType, RawPattern, SignalDirection};
use crate::patterns::detector::PatternSeries;

/// Strength assigned to every detector hit; the detector only emits flags
pub const DETECTED_STRENGTH: f64 = 1.0;

fn classify(pattern: &PatternType) -> (SignalDirection, &'static str) {
    match pattern {
        PatternType::BullishEngulfing => (SignalDirection::Bullish, "engulfing"),
        PatternType::BearishEngulfing => (SignalDirection::Bearish, "engulfing"),
        PatternType::Doji => (SignalDirection::Neutral, "doji"),
        PatternType::PriceIncrease => (SignalDirection::Bullish, "prediction"),
        PatternType::PriceDecrease => (SignalDirection::Bearish, "prediction"),
        PatternType::Model(_) => (SignalDirection::Neutral, "model"),
    }
}

/// One entry per flagged bar, timestamped with that bar.
///
/// Every pattern type present in `series` gets a key, possibly with no
/// entries. Flags past the end of `bars` are ignored.
pub fn extract_events(bars: &[Candle], series: &PatternSeries) -> PatternMap {
    series
        .iter()
        .map(|(pattern, flags)| {
            let (direction, label) = classify(pattern);
            let entries: Vec<RawPattern> = flags
                .iter()
                .zip(bars)
                .filter(|(flag, _)| **flag)
                .map(|(_, bar)| {
                    RawPattern::from(PatternEvent {
                        pattern_type: pattern.clone(),
                        timestamp: bar.timestamp,
                        strength: DETECTED_STRENGTH,
                        direction,
                        pattern: Some(label.to_string()),
                    })
                })
                .collect();
            (pattern.clone(), entries)
        })
        .collect()
}
