//! Shared data models spanning the pipeline layers.

pub mod indicators;
pub mod market;
pub mod signal;

pub use indicators::{
    Candle, EmaIndicator, IndicatorSet, MacdIndicator, RsiIndicator, SmaIndicator,
};
pub use market::MarketData;
pub use signal::{
    PatternEvent, PatternMap, PatternType, PredictionRow, RawPattern, Signal, SignalDirection,
};
