//! Unit tests for MACD indicator

use signal_pipeline::indicators::momentum::{calculate_macd, macd, macd_default};
use signal_pipeline::indicators::trend::ema;

use crate::fixtures::quiet_candles;

#[test]
fn test_macd_lines_are_consistent() {
    let series: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0).collect();
    let result = macd(&series, 12, 26, 9).unwrap();

    let fast = ema(&series, 12).unwrap();
    let slow = ema(&series, 26).unwrap();
    let signal = ema(&result.macd_line, 9).unwrap();

    assert_eq!(result.len(), series.len());
    for i in 0..series.len() {
        assert!((result.macd_line[i] - (fast[i] - slow[i])).abs() < 1e-12);
        assert!((result.signal_line[i] - signal[i]).abs() < 1e-12);
        assert!((result.histogram[i] - (result.macd_line[i] - result.signal_line[i])).abs() < 1e-12);
    }
}

#[test]
fn test_macd_empty_input_defaults_to_zero() {
    let result = macd_default(&[]).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.latest_macd(), 0.0);
    assert_eq!(result.latest_signal(), 0.0);
    assert_eq!(result.latest_histogram(), 0.0);

    let latest = result.latest();
    assert_eq!(latest.macd, 0.0);
    assert_eq!(latest.period, Some((12, 26, 9)));
}

#[test]
fn test_macd_constant_series_is_flat() {
    let result = macd_default(&[100.0; 40]).unwrap();
    assert!(result.macd_line.iter().all(|v| v.abs() < 1e-12));
    assert!(result.histogram.iter().all(|v| v.abs() < 1e-12));
}

#[test]
fn test_macd_uptrend_is_positive() {
    let candles = quiet_candles(80, 60);
    let latest = calculate_macd(&candles, 12, 26, 9).unwrap();
    assert!(latest.macd > 0.0);
}

#[test]
fn test_macd_zero_period_is_rejected() {
    assert!(macd(&[1.0, 2.0], 12, 0, 9).is_err());
    assert!(macd(&[1.0, 2.0], 12, 26, 0).is_err());
}
