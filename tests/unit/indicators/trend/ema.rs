//! Unit tests for EMA indicator

use signal_pipeline::indicators::trend::{calculate_ema, ema};

use crate::fixtures::quiet_candles;

#[test]
fn test_ema_constant_series_is_constant() {
    let values = ema(&[42.0; 30], 10).unwrap();
    assert_eq!(values.len(), 30);
    assert!(values.iter().all(|&v| (v - 42.0).abs() < 1e-12));
}

#[test]
fn test_ema_seeded_by_first_value() {
    // alpha = 2 / (3 + 1) = 0.5
    let values = ema(&[10.0, 20.0, 20.0], 3).unwrap();
    assert_eq!(values[0], 10.0);
    assert!((values[1] - 15.0).abs() < 1e-12);
    assert!((values[2] - 17.5).abs() < 1e-12);
}

#[test]
fn test_ema_converges_to_level() {
    let mut series = vec![0.0];
    series.extend(std::iter::repeat(50.0).take(200));
    let values = ema(&series, 9).unwrap();
    assert!((values.last().unwrap() - 50.0).abs() < 1e-6);
}

#[test]
fn test_ema_short_and_empty_input() {
    assert_eq!(ema(&[5.0, 6.0], 26).unwrap().len(), 2);
    assert!(ema(&[], 26).unwrap().is_empty());
    assert!(ema(&[1.0], 0).is_err());
}

#[test]
fn test_calculate_ema_latest() {
    let candles = quiet_candles(50, 60);
    let result = calculate_ema(&candles, 12).unwrap().unwrap();
    assert_eq!(result.period, 12);
    assert!(result.value.is_finite());
    assert!(calculate_ema(&[], 12).unwrap().is_none());
}
