//! Unit tests for RSI indicator

use signal_pipeline::indicators::momentum::{calculate_rsi, calculate_rsi_default, rsi};

use crate::fixtures::quiet_candles;

#[test]
fn test_rsi_short_input_is_zero_filled() {
    let values = rsi(&[1.0, 2.0, 3.0], 14).unwrap();
    assert_eq!(values, vec![0.0; 3]);
    assert!(rsi(&[], 14).unwrap().is_empty());
}

#[test]
fn test_rsi_output_is_dense_and_backfilled() {
    let series: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.7).sin() * 3.0).collect();
    let values = rsi(&series, 14).unwrap();
    assert_eq!(values.len(), series.len());
    for value in &values[..14] {
        assert_eq!(*value, values[14]);
    }
    assert!(values.iter().all(|v| (0.0..=100.0).contains(v)));
}

#[test]
fn test_rsi_known_first_value() {
    // changes: +1, -1, +2 -> avg gain 1.0, avg loss 1/3, RS = 3
    let values = rsi(&[10.0, 11.0, 10.0, 12.0], 3).unwrap();
    assert!((values[3] - 75.0).abs() < 1e-9);
    assert_eq!(values[0], values[3]);
}

#[test]
fn test_rsi_wilder_smoothing() {
    // first avg gain 1.0, avg loss 1/3; next change -2
    // avg gain = 2/3, avg loss = (2/3 + 2) / 3 = 8/9, RS = 0.75
    let values = rsi(&[10.0, 11.0, 10.0, 12.0, 10.0], 3).unwrap();
    let expected = 100.0 - 100.0 / 1.75;
    assert!((values[4] - expected).abs() < 1e-9);
}

#[test]
fn test_rsi_edge_values() {
    let rising: Vec<f64> = (0..20).map(|i| i as f64).collect();
    assert!(rsi(&rising, 14).unwrap().iter().all(|&v| v == 100.0));

    let flat = vec![5.0; 20];
    assert!(rsi(&flat, 14).unwrap().iter().all(|&v| v == 50.0));

    let falling: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
    assert!(rsi(&falling, 14).unwrap().iter().all(|&v| v == 0.0));
}

#[test]
fn test_calculate_rsi_from_candles() {
    assert!(calculate_rsi(&quiet_candles(10, 60), 14).unwrap().is_none());
    let latest = calculate_rsi_default(&quiet_candles(30, 60)).unwrap().unwrap();
    assert_eq!(latest.period, 14);
    assert_eq!(latest.value, 100.0);
    assert!(calculate_rsi(&quiet_candles(30, 60), 0).is_err());
}
