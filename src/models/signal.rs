use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SignalDirection {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignalDirection::Bullish => "bullish",
            SignalDirection::Bearish => "bearish",
            SignalDirection::Neutral => "neutral",
        };
        f.write_str(name)
    }
}

/// Category of a pattern event.
///
/// Serialized as its snake_case name; names that are not built in come from
/// model-inference collaborators and are kept as `Model(name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PatternType {
    BullishEngulfing,
    BearishEngulfing,
    Doji,
    PriceIncrease,
    PriceDecrease,
    Model(String),
}

impl PatternType {
    pub fn as_str(&self) -> &str {
        match self {
            PatternType::BullishEngulfing => "bullish_engulfing",
            PatternType::BearishEngulfing => "bearish_engulfing",
            PatternType::Doji => "doji",
            PatternType::PriceIncrease => "price_increase",
            PatternType::PriceDecrease => "price_decrease",
            PatternType::Model(name) => name,
        }
    }
}

impl From<String> for PatternType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "bullish_engulfing" => PatternType::BullishEngulfing,
            "bearish_engulfing" => PatternType::BearishEngulfing,
            "doji" => PatternType::Doji,
            "price_increase" => PatternType::PriceIncrease,
            "price_decrease" => PatternType::PriceDecrease,
            _ => PatternType::Model(name),
        }
    }
}

impl From<&str> for PatternType {
    fn from(name: &str) -> Self {
        PatternType::from(name.to_string())
    }
}

impl From<PatternType> for String {
    fn from(pattern: PatternType) -> Self {
        pattern.as_str().to_string()
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discrete pattern occurrence resolved against a candle series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternEvent {
    pub pattern_type: PatternType,
    pub timestamp: DateTime<Utc>,
    pub strength: f64,
    pub direction: SignalDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Pattern entry as handed to the analyzer.
///
/// Entries come from the pattern detector or from external model output, so
/// every field is tolerant: a missing or unparseable timestamp becomes
/// `None` and the entry is skipped during analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPattern {
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub strength: f64,
    #[serde(default)]
    pub direction: SignalDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl From<PatternEvent> for RawPattern {
    fn from(event: PatternEvent) -> Self {
        Self {
            timestamp: Some(event.timestamp),
            strength: event.strength,
            direction: event.direction,
            pattern: event.pattern,
        }
    }
}

/// Raw pattern entries grouped by pattern type
pub type PatternMap = BTreeMap<PatternType, Vec<RawPattern>>;

/// Accepts RFC 3339 strings or epoch milliseconds; anything else is `None`
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(raw)) => DateTime::parse_from_rfc3339(&raw)
            .ok()
            .map(|ts| ts.with_timezone(&Utc)),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    })
}

/// A scored trading signal. Never mutated after the filter chain emits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub id: String,
    pub pattern_type: PatternType,
    pub pattern: String,
    pub timestamp: DateTime<Utc>,
    pub strength: f64,
    pub direction: SignalDirection,
    pub price: f64,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confluence_count: Option<usize>,
}

/// One row of a model prediction table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRow {
    pub timestamp: DateTime<Utc>,
    pub prediction: i64,
    pub close: f64,
}
