//! Validated, timestamp-ordered candle series.

use chrono::{DateTime, Utc};

use crate::models::indicators::Candle;
use crate::signals::error::AnalysisError;

/// Candle series with strictly increasing timestamps.
///
/// The series is immutable once built; price and volume lookups for signals
/// go through [`MarketData::resolve_index`].
#[derive(Debug, Clone, Default)]
pub struct MarketData {
    candles: Vec<Candle>,
}

impl MarketData {
    pub fn new(candles: Vec<Candle>) -> Result<Self, AnalysisError> {
        for (index, candle) in candles.iter().enumerate() {
            let ohlc = [candle.open, candle.high, candle.low, candle.close];
            if ohlc.iter().any(|v| !v.is_finite()) {
                return Err(AnalysisError::NonFiniteValue {
                    index,
                    field: "ohlc",
                });
            }
            if candle.volume.is_some_and(|v| !v.is_finite()) {
                return Err(AnalysisError::NonFiniteValue {
                    index,
                    field: "volume",
                });
            }
        }

        if let Some(index) = candles
            .windows(2)
            .position(|pair| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(AnalysisError::UnorderedTimestamps {
                index: index + 1,
                timestamp: candles[index + 1].timestamp,
            });
        }

        Ok(Self { candles })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn latest(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// True when every bar carries a volume reading
    pub fn has_volume(&self) -> bool {
        !self.candles.is_empty() && self.candles.iter().all(|c| c.volume.is_some())
    }

    /// Index of the bar at `timestamp`, else the nearest bar.
    ///
    /// Equidistant neighbours resolve to the earlier bar. Only an empty
    /// series is unresolvable.
    pub fn resolve_index(&self, timestamp: DateTime<Utc>) -> Option<usize> {
        match self
            .candles
            .binary_search_by(|c| c.timestamp.cmp(&timestamp))
        {
            Ok(index) => Some(index),
            Err(_) if self.candles.is_empty() => None,
            Err(0) => Some(0),
            Err(insert) if insert >= self.candles.len() => Some(self.candles.len() - 1),
            Err(insert) => {
                let before = timestamp - self.candles[insert - 1].timestamp;
                let after = self.candles[insert].timestamp - timestamp;
                if after < before {
                    Some(insert)
                } else {
                    Some(insert - 1)
                }
            }
        }
    }

    /// Close price at or nearest to `timestamp`, 0.0 when unresolvable
    pub fn price_at(&self, timestamp: DateTime<Utc>) -> f64 {
        self.resolve_index(timestamp)
            .map(|i| self.candles[i].close)
            .unwrap_or(0.0)
    }
}
