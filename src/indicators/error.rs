use thiserror::Error;

/// Indicator call-shape errors.
///
/// Empty or short inputs are not errors: they produce degenerate output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("{name} period must be at least 1, got {period}")]
    InvalidPeriod { name: &'static str, period: usize },
}

pub(crate) fn ensure_period(name: &'static str, period: usize) -> Result<(), IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod { name, period });
    }
    Ok(())
}
