//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::indicators::error::{ensure_period, IndicatorError};
use crate::models::indicators::{Candle, EmaIndicator};

/// Exponential smoothing with alpha = 2 / (period + 1), seeded by the first
/// value. There is no warm-up gap: every position carries a value.
pub fn ema(series: &[f64], period: usize) -> Result<Vec<f64>, IndicatorError> {
    ensure_period("ema", period)?;

    let alpha = math::ema_alpha(period);
    let mut out = Vec::with_capacity(series.len());
    let mut previous: Option<f64> = None;
    for &value in series {
        let next = match previous {
            Some(prev) => math::ema_from_previous(value, prev, alpha),
            None => value,
        };
        out.push(next);
        previous = Some(next);
    }
    Ok(out)
}

/// Latest EMA of candle closes, `None` for an empty series
pub fn calculate_ema(candles: &[Candle], period: usize) -> Result<Option<EmaIndicator>, IndicatorError> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let values = ema(&closes, period)?;
    Ok(values.last().map(|&value| EmaIndicator { value, period }))
}

