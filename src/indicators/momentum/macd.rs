//! MACD (Moving Average Convergence Divergence) indicator

use crate::indicators::error::IndicatorError;
use crate::indicators::trend::ema;
use crate::models::indicators::{Candle, MacdIndicator};

/// Full MACD sequences, aligned with the input series
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacdSeries {
    pub macd_line: Vec<f64>,
    pub signal_line: Vec<f64>,
    pub histogram: Vec<f64>,
    pub periods: (usize, usize, usize),
}

impl MacdSeries {
    pub fn len(&self) -> usize {
        self.macd_line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macd_line.is_empty()
    }

    pub fn latest_macd(&self) -> f64 {
        self.macd_line.last().copied().unwrap_or(0.0)
    }

    pub fn latest_signal(&self) -> f64 {
        self.signal_line.last().copied().unwrap_or(0.0)
    }

    pub fn latest_histogram(&self) -> f64 {
        self.histogram.last().copied().unwrap_or(0.0)
    }

    /// Latest values as a snapshot; zeros for an empty series
    pub fn latest(&self) -> MacdIndicator {
        MacdIndicator {
            macd: self.latest_macd(),
            signal: self.latest_signal(),
            histogram: self.latest_histogram(),
            period: Some(self.periods),
        }
    }
}

/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
pub fn macd(
    series: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<MacdSeries, IndicatorError> {
    let fast = ema(series, fast_period)?;
    let slow = ema(series, slow_period)?;

    let macd_line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal_line = ema(&macd_line, signal_period)?;
    let histogram = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();

    Ok(MacdSeries {
        macd_line,
        signal_line,
        histogram,
        periods: (fast_period, slow_period, signal_period),
    })
}

/// MACD with default periods (12, 26, 9)
pub fn macd_default(series: &[f64]) -> Result<MacdSeries, IndicatorError> {
    macd(series, 12, 26, 9)
}

/// Latest MACD of candle closes
pub fn calculate_macd(
    candles: &[Candle],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<MacdIndicator, IndicatorError> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    Ok(macd(&closes, fast_period, slow_period, signal_period)?.latest())
}
