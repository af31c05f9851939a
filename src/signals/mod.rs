//! Signal analysis: scoring, filtering, ranking and history.

pub mod analyzer;
pub mod error;
pub mod filters;
pub mod history;
pub mod scoring;

pub use analyzer::{reference_time, sort_signals, SignalAnalyzer, PREDICTION_PLACEHOLDER_CONFIDENCE};
pub use error::AnalysisError;
pub use filters::{
    ConfluenceFilter, FilterChain, FilterContext, RecencyFilter, SignalFilter, StrengthFilter,
};
pub use history::SignalHistory;
pub use scoring::{calculate_confidence, volume_factor};
