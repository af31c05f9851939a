use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::config::ConfigError;
use crate::indicators::IndicatorError;

/// Malformed input shapes surfaced to the caller.
///
/// Missing context inside otherwise well-formed input (absent timestamps,
/// absent volume, unresolvable prices) is never an error; it degrades to a
/// neutral default.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("candle timestamps must be strictly increasing (index {index}, timestamp {timestamp})")]
    UnorderedTimestamps {
        index: usize,
        timestamp: DateTime<Utc>,
    },

    #[error("non-finite {field} value at candle index {index}")]
    NonFiniteValue { index: usize, field: &'static str },

    #[error("invalid analyzer configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error(transparent)]
    Indicator(#[from] IndicatorError),
}
