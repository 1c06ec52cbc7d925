use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreDataType {
    Numeric,
    Categorical,
    Boolean,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ScoreDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScoreDataType::Numeric => "NUMERIC",
            ScoreDataType::Categorical => "CATEGORICAL",
            ScoreDataType::Boolean => "BOOLEAN",
            ScoreDataType::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

/// A score as returned by the public scores API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub id: String,
    #[serde(default)]
    pub trace_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub string_value: Option<String>,
    #[serde(default)]
    pub data_type: Option<ScoreDataType>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl ScoreRecord {
    pub fn to_observation(&self) -> Option<Observation> {
        self.value.map(|value| Observation {
            timestamp: self.timestamp,
            value,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl TraceRecord {
    pub const UNKNOWN: &'static str = "unknown";

    pub fn dimension(&self, dimension: Dimension) -> String {
        let value = match dimension {
            Dimension::Release => self.release.clone(),
            Dimension::Name => self.name.clone(),
            Dimension::Environment => self
                .metadata
                .as_ref()
                .and_then(|m| m.get("environment"))
                .and_then(|v| v.as_str())
                .map(str::to_string),
        };

        value
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| Self::UNKNOWN.to_string())
    }
}

/// A single numeric score value, validated at the fetch boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: Option<DateTime<Utc>>,
    pub value: f64,
}

impl Observation {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self {
            timestamp: Some(timestamp),
            value,
        }
    }

    pub fn values(observations: &[Observation]) -> Vec<f64> {
        observations.iter().map(|o| o.value).collect()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Release,
    Environment,
    Name,
}

impl Dimension {
    pub const NAMES: [&'static str; 3] = ["release", "environment", "name"];
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Release => "release",
            Dimension::Environment => "environment",
            Dimension::Name => "name",
        };
        f.write_str(name)
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "release" => Ok(Dimension::Release),
            "environment" => Ok(Dimension::Environment),
            "name" => Ok(Dimension::Name),
            other => Err(format!("Unknown dimension: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Hour,
    Day,
    Week,
    Month,
}

impl Granularity {
    pub const NAMES: [&'static str; 4] = ["hour", "day", "week", "month"];
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Granularity::Hour => "hour",
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        };
        f.write_str(name)
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hour" => Ok(Granularity::Hour),
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            other => Err(format!("Unknown granularity: {}", other)),
        }
    }
}
