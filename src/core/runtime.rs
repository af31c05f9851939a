//! Per-symbol pipeline runtime.
//!
//! Each symbol owns its own [`SignalAnalyzer`], so symbols share no mutable
//! state and can be evaluated in parallel. Within a symbol, analysis takes a
//! read lock and the history update takes the write lock, which keeps a
//! single writer per history.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::config::AnalyzerConfig;
use crate::indicators::IndicatorError;
use crate::models::indicators::IndicatorSet;
use crate::models::market::MarketData;
use crate::models::signal::Signal;
use crate::patterns::{detect_patterns, extract_events};
use crate::services::market_data::MarketDataProvider;
use crate::signals::{reference_time, AnalysisError, SignalAnalyzer};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("symbol {0} is not configured")]
    UnknownSymbol(String),

    #[error("market data error for {symbol}: {message}")]
    MarketData { symbol: String, message: String },

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Indicator(#[from] IndicatorError),

    #[error("evaluation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Configuration for the pipeline runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub evaluation_interval_seconds: u64,
    pub symbols: Vec<String>,
    /// Candles requested from the provider per evaluation
    pub candle_limit: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            evaluation_interval_seconds: 60,
            symbols: vec!["BTC-PERP".to_string()],
            candle_limit: 250,
        }
    }
}

/// Outcome of one pipeline pass for a symbol
#[derive(Debug, Clone)]
pub struct SymbolEvaluation {
    pub symbol: String,
    /// Every signal in the current candle window
    pub signals: Vec<Signal>,
    /// Signals not reported by an earlier pass over this symbol
    pub new_signals: Vec<Signal>,
    pub indicators: Option<IndicatorSet>,
}

pub struct SignalRuntime {
    config: RuntimeConfig,
    analyzer_config: AnalyzerConfig,
    provider: Arc<dyn MarketDataProvider + Send + Sync>,
    analyzers: HashMap<String, Arc<RwLock<SignalAnalyzer>>>,
}

impl SignalRuntime {
    pub fn new(
        config: RuntimeConfig,
        analyzer_config: AnalyzerConfig,
        provider: Arc<dyn MarketDataProvider + Send + Sync>,
    ) -> Result<Self, AnalysisError> {
        let mut analyzers = HashMap::new();
        for symbol in &config.symbols {
            let analyzer = SignalAnalyzer::new(analyzer_config.clone())?;
            analyzers.insert(symbol.clone(), Arc::new(RwLock::new(analyzer)));
        }

        info!(
            symbols = ?config.symbols,
            "SignalRuntime: created analyzers for {} symbols",
            analyzers.len()
        );

        Ok(Self {
            config,
            analyzer_config,
            provider,
            analyzers,
        })
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn symbols(&self) -> &[String] {
        &self.config.symbols
    }

    /// The analyzer owned by `symbol`
    pub fn analyzer(&self, symbol: &str) -> Option<Arc<RwLock<SignalAnalyzer>>> {
        self.analyzers.get(symbol).cloned()
    }

    /// Fetch, detect, analyze and record signals for one symbol
    pub async fn evaluate_symbol(&self, symbol: &str) -> Result<SymbolEvaluation, RuntimeError> {
        let analyzer = self
            .analyzer(symbol)
            .ok_or_else(|| RuntimeError::UnknownSymbol(symbol.to_string()))?;

        let provider = self.provider.clone();
        let owned_symbol = symbol.to_string();
        let limit = self.config.candle_limit;
        let candles = tokio::task::spawn_blocking(move || provider.get_candles(&owned_symbol, limit))
            .await?
            .map_err(|e| RuntimeError::MarketData {
                symbol: symbol.to_string(),
                message: e.to_string(),
            })?;

        debug!(symbol = %symbol, count = candles.len(), "SignalRuntime: fetched candles");

        let market = MarketData::new(candles)?;
        let series = detect_patterns(market.candles());
        let patterns = extract_events(market.candles(), &series);
        let indicators =
            IndicatorSet::from_candles(symbol, market.candles(), &self.analyzer_config.indicators)?;

        // history age is measured on the candle clock, like recency
        let now = reference_time(&market);
        let signals = analyzer
            .read()
            .await
            .analyze_signals_at(&patterns, &market, now);
        let new_signals = analyzer
            .write()
            .await
            .update_signal_history_at(&signals, now);

        info!(
            symbol = %symbol,
            signals = signals.len(),
            new_signals = new_signals.len(),
            "SignalRuntime: evaluated {}",
            symbol
        );

        Ok(SymbolEvaluation {
            symbol: symbol.to_string(),
            signals,
            new_signals,
            indicators,
        })
    }

    /// Evaluate every configured symbol in parallel.
    ///
    /// Failures are logged and left out of the result.
    pub async fn evaluate_all(self: &Arc<Self>) -> Vec<SymbolEvaluation> {
        let mut tasks = JoinSet::new();
        for symbol in self.symbols() {
            let runtime = Arc::clone(self);
            let symbol = symbol.clone();
            tasks.spawn(async move {
                let result = runtime.evaluate_symbol(&symbol).await;
                (symbol, result)
            });
        }

        let mut evaluations = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(evaluation))) => evaluations.push(evaluation),
                Ok((symbol, Err(e))) => {
                    error!(symbol = %symbol, error = %e, "SignalRuntime: evaluation failed for {}", symbol);
                }
                Err(e) => {
                    error!(error = %e, "SignalRuntime: evaluation task panicked");
                }
            }
        }

        evaluations.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        evaluations
    }
}
