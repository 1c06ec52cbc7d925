use crate::config::{ENV_HOST, ENV_PUBLIC_KEY, ENV_SECRET_KEY};
use scorelens_core::DEFAULT_HOST;
use serde::{Deserialize, Serialize};

const PREVIEW_CHARS: usize = 10;

/// One row of the environment check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvVarStatus {
    pub name: String,
    pub set: bool,
    pub required: bool,
    pub display_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvStatus {
    pub variables: Vec<EnvVarStatus>,
}

impl EnvStatus {
    pub fn collect<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let key_row = |name: &str| {
            let current = value(name);
            EnvVarStatus {
                name: name.to_string(),
                set: current.is_some(),
                required: true,
                display_value: current.map(|v| preview(&v)),
            }
        };

        let host = value(ENV_HOST);
        let host_row = EnvVarStatus {
            name: ENV_HOST.to_string(),
            set: host.is_some(),
            required: false,
            display_value: Some(host.unwrap_or_else(|| format!("{} (default)", DEFAULT_HOST))),
        };

        Self {
            variables: vec![key_row(ENV_PUBLIC_KEY), key_row(ENV_SECRET_KEY), host_row],
        }
    }

    pub fn from_process_env() -> Self {
        Self::collect(|name| std::env::var(name).ok())
    }

    pub fn missing_required(&self) -> Vec<&str> {
        self.variables
            .iter()
            .filter(|v| v.required && !v.set)
            .map(|v| v.name.as_str())
            .collect()
    }
}

fn preview(secret: &str) -> String {
    let head: String = secret.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", head)
}
