//! Signal generation and filtering pipeline for OHLCV market data.
//!
//! Candles flow through the indicator library and the candlestick pattern
//! detector; the signal analyzer turns the detected events into scored,
//! filtered and ranked signals.

pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod patterns;
pub mod services;
pub mod signals;

pub use config::AnalyzerConfig;
pub use models::{Candle, MarketData, PatternType, Signal, SignalDirection};
pub use patterns::detect_patterns;
pub use signals::SignalAnalyzer;
