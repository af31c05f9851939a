//! Unit tests for the pattern scan

use signal_pipeline::models::PatternType;
use signal_pipeline::patterns::detect_patterns;

use crate::fixtures::{candle, engulfing_candles, quiet_candles};

#[test]
fn test_bullish_engulfing_flagged_on_second_bar() {
    let bars = vec![
        candle(10.0, 10.5, 7.5, 8.0, 0),
        candle(7.0, 12.5, 6.5, 12.0, 15),
    ];
    let series = detect_patterns(&bars);

    assert_eq!(series.get(&PatternType::BullishEngulfing), Some(&[false, true][..]));
    assert_eq!(series.value_at(&PatternType::BullishEngulfing, 1), 1);
    assert_eq!(series.count(&PatternType::BearishEngulfing), 0);
    assert_eq!(series.count(&PatternType::Doji), 0);
}

#[test]
fn test_bearish_engulfing() {
    let bars = vec![
        candle(8.0, 10.5, 7.5, 10.0, 0),
        candle(11.0, 11.5, 6.5, 7.0, 15),
    ];
    let series = detect_patterns(&bars);

    assert_eq!(series.value_at(&PatternType::BearishEngulfing, 1), 1);
    assert_eq!(series.count(&PatternType::BullishEngulfing), 0);
}

#[test]
fn test_doji_detection() {
    let mut bars = quiet_candles(1, 15);
    bars.push(candle(100.0, 101.0, 99.0, 100.0, 15));
    bars.push(candle(100.0, 100.0, 100.0, 100.0, 30));
    let series = detect_patterns(&bars);

    assert_eq!(series.get(&PatternType::Doji), Some(&[false, true, false][..]));
}

#[test]
fn test_first_bar_is_never_flagged() {
    let bars = vec![candle(100.0, 101.0, 99.0, 100.0, 0)];
    let series = detect_patterns(&bars);

    assert_eq!(series.len(), 1);
    for (_, flags) in series.iter() {
        assert_eq!(flags, &[false]);
    }
}

#[test]
fn test_series_are_aligned_with_input() {
    let bars = engulfing_candles(3);
    let series = detect_patterns(&bars);

    assert_eq!(series.len(), bars.len());
    assert_eq!(series.iter().count(), 3);
    for (_, flags) in series.iter() {
        assert_eq!(flags.len(), bars.len());
    }
    assert_eq!(series.count(&PatternType::BullishEngulfing), 6);
    assert_eq!(series.value_at(&PatternType::BullishEngulfing, bars.len() + 5), 0);
}

#[test]
fn test_empty_input() {
    let series = detect_patterns(&[]);
    assert!(series.is_empty());
    assert_eq!(series.get(&PatternType::Doji), Some(&[][..]));
}
