//! Market data provider interface.
//!
//! Providers hand over already-materialized candle series; the pipeline
//! itself performs no network I/O.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::models::indicators::Candle;

pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

pub trait MarketDataProvider {
    /// Up to `limit` most recent candles for a symbol, oldest first
    fn get_candles(&self, symbol: &str, limit: usize) -> Result<Vec<Candle>, ProviderError>;

    /// Close of the most recent candle
    fn get_latest_price(&self, symbol: &str) -> Result<f64, ProviderError> {
        self.get_candles(symbol, 1)?
            .last()
            .map(|c| c.close)
            .ok_or_else(|| format!("No candles available for {}", symbol).into())
    }
}

fn tail(mut candles: Vec<Candle>, limit: usize) -> Vec<Candle> {
    if candles.len() > limit {
        candles.drain(..candles.len() - limit);
    }
    candles
}

/// Candles held in memory, keyed by symbol
#[derive(Default)]
pub struct InMemoryMarketDataProvider {
    candles: RwLock<HashMap<String, Vec<Candle>>>,
}

impl InMemoryMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candles(self, symbol: &str, candles: Vec<Candle>) -> Self {
        self.set_candles(symbol, candles);
        self
    }

    /// Replace the series for `symbol`
    pub fn set_candles(&self, symbol: &str, candles: Vec<Candle>) {
        let mut guard = match self.candles.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.insert(symbol.to_string(), candles);
    }
}

impl MarketDataProvider for InMemoryMarketDataProvider {
    fn get_candles(&self, symbol: &str, limit: usize) -> Result<Vec<Candle>, ProviderError> {
        let guard = self
            .candles
            .read()
            .map_err(|_| "market data lock poisoned")?;
        let candles = guard.get(symbol).cloned().unwrap_or_default();
        Ok(tail(candles, limit))
    }
}

/// Reads `<dir>/<symbol>.json`, a JSON array of candles
pub struct JsonFileMarketDataProvider {
    dir: PathBuf,
}

impl JsonFileMarketDataProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}.json", symbol))
    }
}

impl MarketDataProvider for JsonFileMarketDataProvider {
    fn get_candles(&self, symbol: &str, limit: usize) -> Result<Vec<Candle>, ProviderError> {
        let path = self.path_for(symbol);
        let raw = std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let candles: Vec<Candle> = serde_json::from_str(&raw)
            .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
        Ok(tail(candles, limit))
    }
}
