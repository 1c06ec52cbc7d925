use scorelens_core::{ClientSettings, ScoreLensError, DEFAULT_HOST};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const ENV_PUBLIC_KEY: &str = "LANGFUSE_PUBLIC_KEY";
pub const ENV_SECRET_KEY: &str = "LANGFUSE_SECRET_KEY";
pub const ENV_HOST: &str = "LANGFUSE_HOST";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub langfuse: LangfuseSettings,
    #[serde(default)]
    pub fetch: FetchSettings,
    #[serde(default)]
    pub regression: RegressionThresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LangfuseSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub public_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
    #[serde(with = "humantime_serde", default = "default_timeout")]
    pub timeout: Duration,
}

impl Default for LangfuseSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            public_key: None,
            secret_key: None,
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchSettings {
    /// Records requested per API page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Cap on scores fetched for a single analysis
    #[serde(default = "default_max_scores")]
    pub max_scores: usize,
    /// Cap on scores scanned when listing score names
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_scores: default_max_scores(),
            list_limit: default_list_limit(),
        }
    }
}

/// Percent-change thresholds used when classifying a score shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionThresholds {
    #[serde(default = "default_regression_pct")]
    pub regression_pct: f64,
    #[serde(default = "default_medium_pct")]
    pub medium_pct: f64,
    #[serde(default = "default_high_pct")]
    pub high_pct: f64,
    #[serde(default = "default_higher_is_better")]
    pub higher_is_better: bool,
}

impl Default for RegressionThresholds {
    fn default() -> Self {
        Self {
            regression_pct: default_regression_pct(),
            medium_pct: default_medium_pct(),
            high_pct: default_high_pct(),
            higher_is_better: default_higher_is_better(),
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_page_size() -> usize {
    100
}

fn default_max_scores() -> usize {
    10_000
}

fn default_list_limit() -> usize {
    1_000
}

fn default_regression_pct() -> f64 {
    5.0
}

fn default_medium_pct() -> f64 {
    10.0
}

fn default_high_pct() -> f64 {
    20.0
}

fn default_higher_is_better() -> bool {
    true
}

impl AnalyzerConfig {
    /// Overlay credentials and host from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(ENV_PUBLIC_KEY) {
            self.langfuse.public_key = Some(key);
        }
        if let Some(key) = non_empty(ENV_SECRET_KEY) {
            self.langfuse.secret_key = Some(key);
        }
        if let Some(host) = non_empty(ENV_HOST) {
            self.langfuse.host = host;
        }
    }

    pub fn apply_process_env(&mut self) {
        self.apply_env(|name| std::env::var(name).ok());
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.langfuse.host.trim().is_empty() {
            return Err("Langfuse host cannot be empty".to_string());
        }

        if self.langfuse.timeout.is_zero() {
            return Err("Request timeout must be > 0".to_string());
        }

        if self.fetch.page_size == 0 {
            return Err("fetch.page_size must be >= 1".to_string());
        }

        if self.fetch.max_scores == 0 || self.fetch.list_limit == 0 {
            return Err("fetch.max_scores and fetch.list_limit must be >= 1".to_string());
        }

        let t = &self.regression;
        for (name, value) in [
            ("regression_pct", t.regression_pct),
            ("medium_pct", t.medium_pct),
            ("high_pct", t.high_pct),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("regression.{} must be a non-negative number", name));
            }
        }

        if t.regression_pct > t.medium_pct || t.medium_pct > t.high_pct {
            return Err(
                "regression thresholds must satisfy regression_pct <= medium_pct <= high_pct"
                    .to_string(),
            );
        }

        Ok(())
    }

    pub fn client_settings(&self) -> scorelens_core::Result<ClientSettings> {
        let public_key = self
            .langfuse
            .public_key
            .clone()
            .ok_or_else(|| ScoreLensError::MissingCredential(ENV_PUBLIC_KEY.to_string()))?;
        let secret_key = self
            .langfuse
            .secret_key
            .clone()
            .ok_or_else(|| ScoreLensError::MissingCredential(ENV_SECRET_KEY.to_string()))?;

        Ok(ClientSettings {
            host: self.langfuse.host.clone(),
            public_key,
            secret_key,
            timeout: self.langfuse.timeout,
            page_size: self.fetch.page_size,
        })
    }
}

mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}
