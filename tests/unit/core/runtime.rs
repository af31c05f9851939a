//! Unit tests for signal runtime

use std::sync::Arc;

use signal_pipeline::config::AnalyzerConfig;
use signal_pipeline::core::runtime::{RuntimeConfig, RuntimeError, SignalRuntime};
use signal_pipeline::models::SignalDirection;
use signal_pipeline::services::market_data::{InMemoryMarketDataProvider, MarketDataProvider};

use crate::fixtures::{candle, engulfing_candles, quiet_candles};

fn runtime(symbols: &[&str], provider: InMemoryMarketDataProvider) -> Arc<SignalRuntime> {
    let config = RuntimeConfig {
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
        ..RuntimeConfig::default()
    };
    let provider: Arc<dyn MarketDataProvider + Send + Sync> = Arc::new(provider);
    Arc::new(SignalRuntime::new(config, AnalyzerConfig::default(), provider).unwrap())
}

#[test]
fn test_runtime_config_default() {
    let config = RuntimeConfig::default();
    assert_eq!(config.evaluation_interval_seconds, 60);
    assert_eq!(config.symbols, vec!["BTC-PERP".to_string()]);
    assert_eq!(config.candle_limit, 250);
}

#[test]
fn test_one_analyzer_per_symbol() {
    let rt = runtime(&["BTC", "ETH"], InMemoryMarketDataProvider::new());
    assert_eq!(rt.symbols().len(), 2);
    let btc = rt.analyzer("BTC").unwrap();
    let eth = rt.analyzer("ETH").unwrap();
    assert!(!Arc::ptr_eq(&btc, &eth));
    assert!(rt.analyzer("SOL").is_none());
}

#[test]
fn test_invalid_analyzer_config_fails() {
    let mut analyzer_config = AnalyzerConfig::default();
    analyzer_config.volume_window = 0;
    let provider: Arc<dyn MarketDataProvider + Send + Sync> =
        Arc::new(InMemoryMarketDataProvider::new());
    assert!(SignalRuntime::new(RuntimeConfig::default(), analyzer_config, provider).is_err());
}

#[test]
fn test_evaluate_symbol_records_history() {
    let provider = InMemoryMarketDataProvider::new().with_candles("BTC", engulfing_candles(4));
    let rt = runtime(&["BTC"], provider);

    let evaluation = tokio_test::block_on(rt.evaluate_symbol("BTC")).unwrap();
    assert_eq!(evaluation.symbol, "BTC");
    assert_eq!(evaluation.signals.len(), 4);
    assert!(evaluation
        .signals
        .iter()
        .all(|s| s.direction == SignalDirection::Bullish));
    assert!(evaluation.indicators.is_some());

    assert_eq!(evaluation.new_signals.len(), 4);

    // 2024 candles: retention is measured from the latest candle
    let analyzer = rt.analyzer("BTC").unwrap();
    assert_eq!(tokio_test::block_on(analyzer.read()).history().len(), 4);
}

#[tokio::test]
async fn test_repeated_window_is_recorded_once() {
    let provider = InMemoryMarketDataProvider::new().with_candles("BTC", engulfing_candles(3));
    let rt = runtime(&["BTC"], provider);

    let first = rt.evaluate_symbol("BTC").await.unwrap();
    let second = rt.evaluate_symbol("BTC").await.unwrap();
    let third = rt.evaluate_symbol("BTC").await.unwrap();

    assert_eq!(first.new_signals.len(), 3);
    assert_eq!(second.signals.len(), 3);
    assert!(second.new_signals.is_empty());
    assert!(third.new_signals.is_empty());

    let analyzer = rt.analyzer("BTC").unwrap();
    let guard = analyzer.read().await;
    assert_eq!(guard.history().len(), 3);
}

#[tokio::test]
async fn test_sliding_window_reports_only_new_bars() {
    let provider = Arc::new(InMemoryMarketDataProvider::new().with_candles("BTC", engulfing_candles(2)));
    let shared: Arc<dyn MarketDataProvider + Send + Sync> = provider.clone();
    let config = RuntimeConfig {
        symbols: vec!["BTC".to_string()],
        ..RuntimeConfig::default()
    };
    let rt = SignalRuntime::new(config, AnalyzerConfig::default(), shared).unwrap();

    let first = rt.evaluate_symbol("BTC").await.unwrap();
    assert_eq!(first.new_signals.len(), 2);

    provider.set_candles("BTC", engulfing_candles(3));
    let second = rt.evaluate_symbol("BTC").await.unwrap();
    assert_eq!(second.signals.len(), 3);
    assert_eq!(second.new_signals.len(), 1);
    assert_eq!(second.new_signals[0].timestamp, crate::fixtures::at_minutes(165));

    let analyzer = rt.analyzer("BTC").unwrap();
    assert_eq!(analyzer.read().await.history().len(), 3);
}

#[tokio::test]
async fn test_unknown_symbol() {
    let rt = runtime(&["BTC"], InMemoryMarketDataProvider::new());
    let result = rt.evaluate_symbol("DOGE").await;
    assert!(matches!(result, Err(RuntimeError::UnknownSymbol(s)) if s == "DOGE"));
}

#[tokio::test]
async fn test_symbol_without_candles() {
    let rt = runtime(&["BTC"], InMemoryMarketDataProvider::new());
    let evaluation = rt.evaluate_symbol("BTC").await.unwrap();
    assert!(evaluation.signals.is_empty());
    assert!(evaluation.indicators.is_none());
}

#[tokio::test]
async fn test_unordered_candles_are_rejected() {
    let provider = InMemoryMarketDataProvider::new().with_candles(
        "BTC",
        vec![
            candle(100.0, 101.0, 99.0, 100.5, 15),
            candle(100.5, 101.0, 99.0, 100.0, 0),
        ],
    );
    let rt = runtime(&["BTC"], provider);
    assert!(matches!(
        rt.evaluate_symbol("BTC").await,
        Err(RuntimeError::Analysis(_))
    ));
}

#[tokio::test]
async fn test_evaluate_all_skips_failures() {
    let provider = InMemoryMarketDataProvider::new()
        .with_candles("ETH", quiet_candles(30, 15))
        .with_candles("BTC", engulfing_candles(2))
        .with_candles(
            "BAD",
            vec![
                candle(1.0, 1.0, 1.0, 1.0, 10),
                candle(1.0, 1.0, 1.0, 1.0, 5),
            ],
        );
    let rt = runtime(&["ETH", "BAD", "BTC"], provider);

    let evaluations = rt.evaluate_all().await;
    let symbols: Vec<_> = evaluations.iter().map(|e| e.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["BTC", "ETH"]);
    assert_eq!(evaluations[0].signals.len(), 2);
    assert!(evaluations[1].signals.is_empty());
}
