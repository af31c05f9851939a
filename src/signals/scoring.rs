//! Confidence calculation

use crate::common::math;
use crate::models::market::MarketData;

/// Volume multiplier for the bar at `index`.
///
/// Current volume over the trailing `window`-bar average volume (window
/// ending at `index`), capped at `cap`. Falls back to 1.0 when the window is
/// incomplete, any bar in it lacks volume, or the average is zero.
pub fn volume_factor(market: &MarketData, index: usize, window: usize, cap: f64) -> f64 {
    let candles = market.candles();
    if window == 0 || index >= candles.len() || index + 1 < window {
        return 1.0;
    }

    let volumes: Option<Vec<f64>> = candles[index + 1 - window..=index]
        .iter()
        .map(|c| c.volume)
        .collect();
    let Some(volumes) = volumes else {
        return 1.0;
    };

    let average = match math::mean(&volumes) {
        Some(average) if average > 0.0 => average,
        _ => return 1.0,
    };
    let current = volumes[volumes.len() - 1];
    (current / average).min(cap)
}

/// Confidence = min(strength, 1.0) * volume factor
///
/// Negative and NaN strengths score zero so confidence is never negative.
pub fn calculate_confidence(strength: f64, volume_factor: f64) -> f64 {
    if strength.is_nan() {
        return 0.0;
    }
    strength.clamp(0.0, 1.0) * volume_factor
}
