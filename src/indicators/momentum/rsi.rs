//! RSI (Relative Strength Index) indicator

use crate::indicators::error::{ensure_period, IndicatorError};
use crate::models::indicators::{Candle, RsiIndicator};

/// Wilder-smoothed RSI, scaled 0 to 100.
///
/// RSI = 100 - (100 / (1 + RS)), RS = average gain / average loss.
/// The first average is a plain mean over `period` changes, later ones use
/// Wilder smoothing. Positions before the first computable value are
/// back-filled with it so the output stays dense. When the input has no
/// computable value at all the output is zero-filled.
pub fn rsi(series: &[f64], period: usize) -> Result<Vec<f64>, IndicatorError> {
    ensure_period("rsi", period)?;

    let len = series.len();
    if len <= period {
        return Ok(vec![0.0; len]);
    }

    let mut out = vec![0.0; len];
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=period {
        let change = series[i] - series[i - 1];
        if change > 0.0 {
            avg_gain += change;
        } else {
            avg_loss -= change;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;
    out[period] = rsi_value(avg_gain, avg_loss);

    let smoothing = (period - 1) as f64;
    for i in period + 1..len {
        let change = series[i] - series[i - 1];
        let (gain, loss) = if change > 0.0 { (change, 0.0) } else { (0.0, -change) };
        avg_gain = (avg_gain * smoothing + gain) / period as f64;
        avg_loss = (avg_loss * smoothing + loss) / period as f64;
        out[i] = rsi_value(avg_gain, avg_loss);
    }

    let first = out[period];
    out[..period].fill(first);
    Ok(out)
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        // flat window
        if avg_gain == 0.0 {
            return 50.0;
        }
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// Latest RSI of candle closes, `None` until a value is computable
pub fn calculate_rsi(candles: &[Candle], period: usize) -> Result<Option<RsiIndicator>, IndicatorError> {
    if candles.len() <= period {
        ensure_period("rsi", period)?;
        return Ok(None);
    }
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let values = rsi(&closes, period)?;
    Ok(values.last().map(|&value| RsiIndicator { value, period }))
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(candles: &[Candle]) -> Result<Option<RsiIndicator>, IndicatorError> {
    calculate_rsi(candles, 14)
}
