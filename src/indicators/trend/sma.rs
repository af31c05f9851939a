//! SMA (Simple Moving Average) indicator

use crate::indicators::error::{ensure_period, IndicatorError};
use crate::models::indicators::{Candle, SmaIndicator};

/// Trailing arithmetic mean over `period` samples.
///
/// The first `period - 1` positions are NaN. A series shorter than `period`
/// is entirely NaN.
pub fn sma(series: &[f64], period: usize) -> Result<Vec<f64>, IndicatorError> {
    ensure_period("sma", period)?;

    let mut out = vec![f64::NAN; series.len()];
    let mut window_sum = 0.0;
    for (i, value) in series.iter().enumerate() {
        window_sum += value;
        if i >= period {
            window_sum -= series[i - period];
        }
        if i + 1 >= period {
            out[i] = window_sum / period as f64;
        }
    }
    Ok(out)
}

/// Latest SMA of candle closes, `None` until `period` candles exist
pub fn calculate_sma(candles: &[Candle], period: usize) -> Result<Option<SmaIndicator>, IndicatorError> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let values = sma(&closes, period)?;
    Ok(values
        .last()
        .copied()
        .filter(|v| !v.is_nan())
        .map(|value| SmaIndicator { value, period }))
}
