//! Unit tests for analyzer configuration

use signal_pipeline::config::{AnalyzerConfig, ConfigError};

#[test]
fn test_defaults_match_reference_thresholds() {
    let config = AnalyzerConfig::default();
    assert_eq!(config.min_strength, 0.5);
    assert_eq!(config.volume_window, 20);
    assert_eq!(config.volume_factor_cap, 2.0);
    assert_eq!(config.history_retention_days, 7);
    assert!(!config.recency.enabled);
    assert_eq!(config.recency.lookback_hours, None);
    assert!(config.confluence.enabled);
    assert_eq!(config.confluence.min_group_size, 2);
    assert!(config.validate().is_ok());
}

#[test]
fn test_enabled_recency_requires_lookback() {
    let mut config = AnalyzerConfig::default();
    config.recency.enabled = true;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::MissingRecencyLookback)
    ));

    config.recency.lookback_hours = Some(0);
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroRecencyLookback)
    ));

    config.recency.lookback_hours = Some(24);
    assert!(config.validate().is_ok());
}

#[test]
fn test_lookback_without_enable_is_inert() {
    let mut config = AnalyzerConfig::default();
    config.recency.lookback_hours = Some(24);
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_values_are_rejected() {
    let mut config = AnalyzerConfig::default();
    config.volume_window = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { field: "volume_window", .. })
    ));

    let mut config = AnalyzerConfig::default();
    config.confluence.min_group_size = 1;
    assert!(config.validate().is_err());

    let mut config = AnalyzerConfig::default();
    config.indicators.rsi_period = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { field: "indicators.rsi_period", .. })
    ));
}

#[test]
fn test_partial_json_falls_back_to_defaults() {
    let config: AnalyzerConfig =
        serde_json::from_str(r#"{"min_strength": 0.7, "recency": {"enabled": true, "lookback_hours": 6}}"#)
            .unwrap();
    assert_eq!(config.min_strength, 0.7);
    assert_eq!(config.volume_window, 20);
    assert_eq!(config.recency.lookback_hours, Some(6));
    assert!(config.confluence.enabled);
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_json_file() {
    let path = std::env::temp_dir().join(format!("signal-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"confluence": {"enabled": false}}"#).unwrap();
    let config = AnalyzerConfig::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert!(!config.confluence.enabled);
    assert_eq!(config.confluence.min_group_size, 2);

    assert!(matches!(
        AnalyzerConfig::from_json_file("/nonexistent/signal-config.json"),
        Err(ConfigError::Io(_))
    ));
}
