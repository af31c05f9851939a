//! Signal Pipeline Worker
//!
//! Periodically evaluates every configured symbol from a directory of JSON
//! candle files and logs the resulting signals.

use dotenvy::dotenv;
use signal_pipeline::config::{self, AnalyzerConfig};
use signal_pipeline::core::runtime::{RuntimeConfig, SignalRuntime};
use signal_pipeline::core::scheduler::JobScheduler;
use signal_pipeline::logging;
use signal_pipeline::services::market_data::{JsonFileMarketDataProvider, MarketDataProvider};
use std::env;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let eval_interval: u64 = env::var("EVAL_INTERVAL_SECONDS")
        .ok()
        .and_then(|i| i.parse().ok())
        .unwrap_or(0);

    let environment = config::get_environment();
    info!("Starting Signal Pipeline Worker");
    info!(environment = %environment, "Environment");

    if eval_interval == 0 {
        return Err("EVAL_INTERVAL_SECONDS must be > 0 for worker".into());
    }

    let analyzer_config = match env::var("SIGNAL_CONFIG") {
        Ok(path) => AnalyzerConfig::from_json_file(path)?,
        Err(_) => AnalyzerConfig::from_env()?,
    };

    let symbols = config::get_symbols();
    if symbols.is_empty() {
        warn!("No symbols configured - set SYMBOLS to a comma-separated list");
    } else {
        info!(symbols = ?symbols, "Symbols: {}", symbols.join(", "));
    }

    let candle_dir = config::get_candle_dir();
    info!(dir = %candle_dir, "Reading candles from {}", candle_dir);
    let provider: Arc<dyn MarketDataProvider + Send + Sync> =
        Arc::new(JsonFileMarketDataProvider::new(candle_dir));

    let runtime_config = RuntimeConfig {
        evaluation_interval_seconds: eval_interval,
        symbols,
        ..RuntimeConfig::default()
    };
    let runtime = Arc::new(SignalRuntime::new(runtime_config, analyzer_config, provider)?);

    let (tx, mut rx) = mpsc::channel(16);
    let scheduler = JobScheduler::new(runtime, eval_interval, tx)
        .map_err(|e| format!("Failed to create scheduler: {}", e))?;
    scheduler.start().await;

    info!("Worker started, waiting for shutdown signal...");
    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("Shutting down worker...");
                scheduler.stop().await;
                info!("Worker stopped");
                break;
            }
            batch = rx.recv() => {
                let Some(evaluations) = batch else {
                    warn!("Scheduler channel closed");
                    break;
                };
                for evaluation in evaluations {
                    if evaluation.new_signals.is_empty() {
                        continue;
                    }
                    info!(
                        symbol = %evaluation.symbol,
                        count = evaluation.new_signals.len(),
                        signals = %serde_json::to_string(&evaluation.new_signals)?,
                        "Signals emitted"
                    );
                }
            }
        }
    }

    Ok(())
}
