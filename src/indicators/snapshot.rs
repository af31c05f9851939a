//! Latest-value indicator snapshots built from a candle series

use crate::config::IndicatorConfig;
use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::{calculate_macd, calculate_rsi};
use crate::indicators::trend::{calculate_ema, calculate_sma};
use crate::models::indicators::{Candle, IndicatorSet};

impl IndicatorSet {
    /// Snapshot of the configured indicators at the last candle.
    ///
    /// Indicators that are not yet meaningful (SMA and RSI warm-up) are left
    /// out. Returns `None` for an empty series.
    pub fn from_candles(
        symbol: &str,
        candles: &[Candle],
        config: &IndicatorConfig,
    ) -> Result<Option<IndicatorSet>, IndicatorError> {
        let Some(last) = candles.last() else {
            return Ok(None);
        };

        let mut set = IndicatorSet::new(symbol.to_string(), last.close, last.timestamp).with_macd(
            calculate_macd(candles, config.macd_fast, config.macd_slow, config.macd_signal)?,
        );

        if let Some(ema) = calculate_ema(candles, config.ema_period)? {
            set = set.with_ema(ema);
        }
        if let Some(sma) = calculate_sma(candles, config.sma_period)? {
            set = set.with_sma(sma);
        }
        if let Some(rsi) = calculate_rsi(candles, config.rsi_period)? {
            set = set.with_rsi(rsi);
        }

        Ok(Some(set))
    }
}
