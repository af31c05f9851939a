//! Per-bar candlestick predicates

use crate::models::indicators::Candle;

/// A doji's body is smaller than this fraction of the bar's range
pub const DOJI_BODY_RATIO: f64 = 0.1;

/// Bearish bar followed by a bullish bar whose body engulfs it
pub fn is_bullish_engulfing(prev: &Candle, cur: &Candle) -> bool {
    prev.is_bearish() && cur.is_bullish() && cur.open < prev.close && cur.close > prev.open
}

/// Bullish bar followed by a bearish bar whose body engulfs it
pub fn is_bearish_engulfing(prev: &Candle, cur: &Candle) -> bool {
    prev.is_bullish() && cur.is_bearish() && cur.open > prev.close && cur.close < prev.open
}

/// Body strictly below 10% of the range.
///
/// A zero-range bar is never a doji: `0 < 0` is false.
pub fn is_doji(bar: &Candle) -> bool {
    bar.body() < bar.range() * DOJI_BODY_RATIO
}
