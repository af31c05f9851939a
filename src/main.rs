//! One-shot pipeline run.
//!
//! Usage: `signal-pipeline [candles.json]`. Without a file a built-in
//! synthetic series is analyzed. Signals are printed to stdout as JSON.

use chrono::{Duration, TimeZone, Utc};
use dotenvy::dotenv;
use signal_pipeline::config::AnalyzerConfig;
use signal_pipeline::logging;
use signal_pipeline::models::{Candle, IndicatorSet, MarketData};
use signal_pipeline::patterns::{detect_patterns, extract_events};
use signal_pipeline::signals::SignalAnalyzer;
use std::env;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = match env::var("SIGNAL_CONFIG") {
        Ok(path) => AnalyzerConfig::from_json_file(path)?,
        Err(_) => AnalyzerConfig::from_env()?,
    };

    let candles = match env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| format!("Failed to read {}: {}", path, e))?;
            serde_json::from_str::<Vec<Candle>>(&raw)?
        }
        None => synthetic_candles()?,
    };

    let market = MarketData::new(candles)?;
    info!(candles = market.len(), "Loaded market data");

    if let Some(set) = IndicatorSet::from_candles("demo", market.candles(), &config.indicators)? {
        info!(indicators = %serde_json::to_string(&set)?, "Indicator snapshot");
    }

    let series = detect_patterns(market.candles());
    let patterns = extract_events(market.candles(), &series);

    let analyzer = SignalAnalyzer::new(config)?;
    let signals = analyzer.analyze_signals(&patterns, &market);

    println!("{}", serde_json::to_string_pretty(&signals)?);
    Ok(())
}

/// Two days of 15-minute bars, each hour holding two bullish engulfing bars
fn synthetic_candles() -> Result<Vec<Candle>, Box<dyn std::error::Error>> {
    let start = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .ok_or("invalid synthetic start time")?;
    let hour_shape = [(101.0, 99.0), (98.5, 101.5), (101.6, 100.2), (99.9, 102.0)];

    let mut candles = Vec::with_capacity(48 * hour_shape.len());
    for hour in 0..48i64 {
        let drift = hour as f64 * 0.5;
        for (slot, &(open, close)) in hour_shape.iter().enumerate() {
            let (open, close) = (open + drift, close + drift);
            let volume = 1_000.0 + ((hour as usize * 4 + slot) % 7) as f64 * 150.0;
            candles.push(Candle::new(
                open,
                open.max(close) + 0.5,
                open.min(close) - 0.5,
                close,
                volume,
                start + Duration::minutes(hour * 60 + slot as i64 * 15),
            ));
        }
    }
    Ok(candles)
}
