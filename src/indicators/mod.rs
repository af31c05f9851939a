//! Indicator library: pure transforms over price series.
//!
//! Every series function returns a sequence of the same length as its input
//! and never fails on empty or short input. A zero-filled or NaN-marked
//! result means "not yet meaningful", not an error.

pub mod error;
pub mod momentum;
pub mod snapshot;
pub mod trend;

pub use error::IndicatorError;
pub use momentum::{macd, rsi, MacdSeries};
pub use trend::{ema, sma};
