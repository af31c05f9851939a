//! Positional pattern scan over a candle series

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::indicators::Candle;
use crate::models::signal::PatternType;
use crate::patterns::candles::{is_bearish_engulfing, is_bullish_engulfing, is_doji};

/// Pattern flags per bar, one same-length series per pattern type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternSeries {
    len: usize,
    series: BTreeMap<PatternType, Vec<bool>>,
}

impl PatternSeries {
    fn new(len: usize, patterns: &[PatternType]) -> Self {
        let series = patterns
            .iter()
            .map(|p| (p.clone(), vec![false; len]))
            .collect();
        Self { len, series }
    }

    /// Number of bars every series is aligned with
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, pattern: &PatternType) -> Option<&[bool]> {
        self.series.get(pattern).map(Vec::as_slice)
    }

    /// Flag as 0/1
    pub fn value_at(&self, pattern: &PatternType, index: usize) -> u8 {
        self.get(pattern)
            .and_then(|s| s.get(index))
            .map_or(0, |&flag| u8::from(flag))
    }

    pub fn count(&self, pattern: &PatternType) -> usize {
        self.get(pattern)
            .map_or(0, |s| s.iter().filter(|&&flag| flag).count())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PatternType, &[bool])> {
        self.series.iter().map(|(p, s)| (p, s.as_slice()))
    }

    fn set(&mut self, pattern: &PatternType, index: usize) {
        if let Some(flag) = self.series.get_mut(pattern).and_then(|s| s.get_mut(index)) {
            *flag = true;
        }
    }
}

/// Flag bullish engulfing, bearish engulfing and doji bars.
///
/// Bar 0 has no prior bar and is never flagged for any pattern.
pub fn detect_patterns(bars: &[Candle]) -> PatternSeries {
    let mut out = PatternSeries::new(
        bars.len(),
        &[
            PatternType::BullishEngulfing,
            PatternType::BearishEngulfing,
            PatternType::Doji,
        ],
    );

    for (i, pair) in bars.windows(2).enumerate() {
        let index = i + 1;
        let (prev, cur) = (&pair[0], &pair[1]);
        if is_bullish_engulfing(prev, cur) {
            out.set(&PatternType::BullishEngulfing, index);
        }
        if is_bearish_engulfing(prev, cur) {
            out.set(&PatternType::BearishEngulfing, index);
        }
        if is_doji(cur) {
            out.set(&PatternType::Doji, index);
        }
    }

    debug!(
        bars = bars.len(),
        bullish_engulfing = out.count(&PatternType::BullishEngulfing),
        bearish_engulfing = out.count(&PatternType::BearishEngulfing),
        doji = out.count(&PatternType::Doji),
        "pattern scan complete"
    );

    out
}
