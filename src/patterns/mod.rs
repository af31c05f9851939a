//! Candlestick pattern detection.
//!
//! [`detect_patterns`] produces positional series aligned with the input
//! candles; [`extract_events`] turns those into discrete pattern entries for
//! the signal analyzer.

pub mod candles;
pub mod detector;
pub mod events;

pub use candles::{is_bearish_engulfing, is_bullish_engulfing, is_doji, DOJI_BODY_RATIO};
pub use detector::{detect_patterns, PatternSeries};
pub use events::extract_events;
