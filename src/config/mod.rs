//! Analyzer configuration.
//!
//! Every threshold the pipeline uses is carried here and injected into the
//! analyzer; nothing reads ambient state after construction. Defaults match
//! the reference thresholds (strength 0.5, 20-bar volume window, 2x cap,
//! 7-day history).

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Upper bound on the recency lookback (ten years)
pub const MAX_RECENCY_LOOKBACK_HOURS: u64 = 24 * 365 * 10;

pub const MAX_HISTORY_RETENTION_DAYS: i64 = 365 * 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("recency filter is enabled but no lookback_hours was configured")]
    MissingRecencyLookback,

    #[error("recency lookback must be greater than zero hours")]
    ZeroRecencyLookback,

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Indicator periods used when building indicator snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub sma_period: usize,
    pub ema_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub rsi_period: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_period: 20,
            ema_period: 20,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            rsi_period: 14,
        }
    }
}

/// Time-window stage of the filter chain.
///
/// Disabled by default. There is deliberately no default lookback: enabling
/// the stage requires an explicit `lookback_hours`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecencyConfig {
    pub enabled: bool,
    pub lookback_hours: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfluenceConfig {
    pub enabled: bool,
    pub min_group_size: usize,
}

impl Default for ConfluenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_group_size: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Signals with a strength below this value are dropped
    pub min_strength: f64,
    /// Number of bars in the rolling average volume
    pub volume_window: usize,
    /// Upper bound of the volume multiplier applied to confidence
    pub volume_factor_cap: f64,
    pub history_retention_days: i64,
    pub recency: RecencyConfig,
    pub confluence: ConfluenceConfig,
    pub indicators: IndicatorConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_strength: 0.5,
            volume_window: 20,
            volume_factor_cap: 2.0,
            history_retention_days: 7,
            recency: RecencyConfig::default(),
            confluence: ConfluenceConfig::default(),
            indicators: IndicatorConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_strength.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "min_strength",
                reason: "must be finite".to_string(),
            });
        }
        if self.volume_window == 0 {
            return Err(ConfigError::InvalidValue {
                field: "volume_window",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.volume_factor_cap.is_finite() && self.volume_factor_cap > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "volume_factor_cap",
                reason: "must be a positive number".to_string(),
            });
        }
        if !(0..=MAX_HISTORY_RETENTION_DAYS).contains(&self.history_retention_days) {
            return Err(ConfigError::InvalidValue {
                field: "history_retention_days",
                reason: format!("must be between 0 and {}", MAX_HISTORY_RETENTION_DAYS),
            });
        }
        if self.recency.enabled {
            match self.recency.lookback_hours {
                None => return Err(ConfigError::MissingRecencyLookback),
                Some(0) => return Err(ConfigError::ZeroRecencyLookback),
                Some(hours) if hours > MAX_RECENCY_LOOKBACK_HOURS => {
                    return Err(ConfigError::InvalidValue {
                        field: "recency.lookback_hours",
                        reason: format!("must not exceed {} hours", MAX_RECENCY_LOOKBACK_HOURS),
                    })
                }
                Some(_) => {}
            }
        }
        if self.confluence.min_group_size < 2 {
            return Err(ConfigError::InvalidValue {
                field: "confluence.min_group_size",
                reason: "a confluent group needs at least 2 signals".to_string(),
            });
        }

        let periods = [
            ("indicators.sma_period", self.indicators.sma_period),
            ("indicators.ema_period", self.indicators.ema_period),
            ("indicators.macd_fast", self.indicators.macd_fast),
            ("indicators.macd_slow", self.indicators.macd_slow),
            ("indicators.macd_signal", self.indicators.macd_signal),
            ("indicators.rsi_period", self.indicators.rsi_period),
        ];
        for (field, period) in periods {
            if period == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "period must be at least 1".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Load a JSON config document; missing fields fall back to defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with `SIGNAL_*` environment variables
    ///
    /// Recognised variables: `SIGNAL_MIN_STRENGTH`, `SIGNAL_VOLUME_WINDOW`,
    /// `SIGNAL_VOLUME_FACTOR_CAP`, `SIGNAL_HISTORY_RETENTION_DAYS`,
    /// `SIGNAL_RECENCY_ENABLED`, `SIGNAL_RECENCY_LOOKBACK_HOURS`,
    /// `SIGNAL_CONFLUENCE_ENABLED`, `SIGNAL_CONFLUENCE_MIN_GROUP`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(v) = env_parse("SIGNAL_MIN_STRENGTH", "min_strength")? {
            config.min_strength = v;
        }
        if let Some(v) = env_parse("SIGNAL_VOLUME_WINDOW", "volume_window")? {
            config.volume_window = v;
        }
        if let Some(v) = env_parse("SIGNAL_VOLUME_FACTOR_CAP", "volume_factor_cap")? {
            config.volume_factor_cap = v;
        }
        if let Some(v) = env_parse("SIGNAL_HISTORY_RETENTION_DAYS", "history_retention_days")? {
            config.history_retention_days = v;
        }
        if let Some(v) = env_parse("SIGNAL_RECENCY_ENABLED", "recency.enabled")? {
            config.recency.enabled = v;
        }
        if let Some(v) = env_parse("SIGNAL_RECENCY_LOOKBACK_HOURS", "recency.lookback_hours")? {
            config.recency.lookback_hours = Some(v);
        }
        if let Some(v) = env_parse("SIGNAL_CONFLUENCE_ENABLED", "confluence.enabled")? {
            config.confluence.enabled = v;
        }
        if let Some(v) = env_parse("SIGNAL_CONFLUENCE_MIN_GROUP", "confluence.min_group_size")? {
            config.confluence.min_group_size = v;
        }

        config.validate()?;
        Ok(config)
    }
}

fn env_parse<T>(key: &str, field: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                field,
                reason: format!("{} ({}={})", e, key, raw),
            }),
        Err(_) => Ok(None),
    }
}

/// Deployment environment name (`APP_ENV`), defaults to `sandbox`
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

/// Directory the worker reads `<symbol>.json` candle files from
pub fn get_candle_dir() -> String {
    env::var("CANDLE_DIR").unwrap_or_else(|_| "data/candles".to_string())
}

/// Comma-separated `SYMBOLS` list, defaults to `BTC-PERP`
pub fn get_symbols() -> Vec<String> {
    env::var("SYMBOLS")
        .map(|raw| {
            raw.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_else(|_| vec!["BTC-PERP".to_string()])
}
