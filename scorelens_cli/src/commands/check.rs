use super::context::Context;
use crate::ui;
use anyhow::{bail, Result};
use scorelens_config::{EnvStatus, EnvVarStatus, ENV_PUBLIC_KEY, ENV_SECRET_KEY};
use scorelens_core::{LangfuseClient, ScoreFilter, ScoreLensError, ScoreSource};
use scorelens_metrics::ToMarkdown;
use serde::{Deserialize, Serialize};
use tabled::{settings::Style, Table, Tabled};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub environment: Vec<EnvVarStatus>,
    /// Credentials absent from both the environment and the config file
    pub missing: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<ProbeOutcome>,
}

impl CheckReport {
    pub fn is_ready(&self) -> bool {
        self.missing.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeOutcome {
    pub host: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Tabled)]
struct EnvRow {
    #[tabled(rename = "Variable")]
    variable: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

impl ToMarkdown for CheckReport {
    fn to_markdown(&self) -> String {
        let rows: Vec<EnvRow> = self
            .environment
            .iter()
            .map(|v| EnvRow {
                variable: v.name.clone(),
                status: if v.set { "Set" } else { "NOT SET" },
                value: v.display_value.clone().unwrap_or_else(|| "-".to_string()),
            })
            .collect();

        let mut lines = vec![
            "# Langfuse Setup Check".to_string(),
            String::new(),
            "## Environment Variables".to_string(),
            String::new(),
            Table::new(rows).with(Style::markdown()).to_string(),
            String::new(),
            "## Status".to_string(),
            String::new(),
        ];

        if self.is_ready() {
            lines.push("Ready to connect to Langfuse!".to_string());
            if self.connection.is_none() {
                lines.push(String::new());
                lines.push("Run `score-analyzer check --probe` to verify the connection.".to_string());
            }
        } else {
            lines.push("Setup incomplete. Please:".to_string());
            for name in &self.missing {
                lines.push(format!("- Set {} environment variable", name));
            }
        }

        if let Some(probe) = &self.connection {
            lines.push(String::new());
            lines.push("## Connection Test".to_string());
            lines.push(String::new());
            lines.push(format!("**Host:** {}", probe.host));

            if probe.success {
                lines.push(String::new());
                lines.push("**Status:** SUCCESS".to_string());
                if let Some(version) = &probe.version {
                    lines.push(String::new());
                    lines.push(format!("**Server version:** {}", version));
                }
            } else {
                lines.push(String::new());
                lines.push("**Status:** FAILED".to_string());
                lines.push(String::new());
                lines.push(format!(
                    "**Error:** {}",
                    probe.error.as_deref().unwrap_or("Unknown error")
                ));
                lines.push(String::new());
                lines.push("## Troubleshooting".to_string());
                lines.push("1. Verify your API keys are correct".to_string());
                lines.push("2. Check if LANGFUSE_HOST is set correctly (if self-hosted)".to_string());
                lines.push("3. Ensure network access to Langfuse servers".to_string());
            }
        }

        lines.join("\n")
    }
}

pub async fn execute(ctx: &Context, probe: bool) -> Result<()> {
    let env = EnvStatus::from_process_env();

    // a key supplied by the config file is not missing
    let langfuse = &ctx.config.langfuse;
    let missing: Vec<String> = env
        .missing_required()
        .into_iter()
        .filter(|name| match *name {
            ENV_PUBLIC_KEY => langfuse.public_key.is_none(),
            ENV_SECRET_KEY => langfuse.secret_key.is_none(),
            _ => true,
        })
        .map(str::to_string)
        .collect();

    let mut report = CheckReport {
        environment: env.variables,
        missing,
        connection: None,
    };

    if probe {
        if !report.is_ready() {
            ctx.emit(&report).await?;
            bail!(
                "Cannot test connection: set {} first",
                report.missing.join(" and ")
            );
        }

        let client = ctx.client()?;
        report.connection = Some(run_probe(&client).await);
    }

    ctx.emit(&report).await?;

    match &report.connection {
        Some(outcome) if !outcome.success => {
            ui::print_error("Failed to connect to Langfuse");
            bail!("Connection test failed")
        }
        Some(_) => {
            ui::print_success("Connected to Langfuse");
            Ok(())
        }
        None => Ok(()),
    }
}

/// Health check plus a one-record score query, which exercises the credentials.
async fn run_probe(client: &LangfuseClient) -> ProbeOutcome {
    let host = client.base_url().to_string();
    info!("Testing connection to {}", host);

    let result: Result<Option<String>, ScoreLensError> = async {
        let health = client.health().await?;
        let filter = ScoreFilter {
            name: None,
            range: None,
            max_results: 1,
        };
        client.list_scores(&filter).await?;
        Ok(health.version)
    }
    .await;

    match result {
        Ok(version) => ProbeOutcome {
            host,
            success: true,
            version,
            error: None,
        },
        Err(e) => ProbeOutcome {
            host,
            success: false,
            version: None,
            error: Some(e.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_rows(public: bool, secret: bool) -> Vec<EnvVarStatus> {
        EnvStatus::collect(|name| match name {
            ENV_PUBLIC_KEY if public => Some("pk-lf-1234567890".to_string()),
            ENV_SECRET_KEY if secret => Some("sk-lf-1234567890".to_string()),
            _ => None,
        })
        .variables
    }

    #[test]
    fn test_incomplete_setup_markdown() {
        let report = CheckReport {
            environment: env_rows(true, false),
            missing: vec![ENV_SECRET_KEY.to_string()],
            connection: None,
        };

        let md = report.to_markdown();
        assert!(md.starts_with("# Langfuse Setup Check"));
        assert!(md.contains("pk-lf-1234..."));
        assert!(md.contains("NOT SET"));
        assert!(md.contains("Setup incomplete. Please:"));
        assert!(md.contains("- Set LANGFUSE_SECRET_KEY environment variable"));
        assert!(!md.contains("- Set LANGFUSE_PUBLIC_KEY"));
    }

    #[test]
    fn test_failed_probe_markdown() {
        let report = CheckReport {
            environment: env_rows(true, true),
            missing: vec![],
            connection: Some(ProbeOutcome {
                host: "http://localhost:3000".to_string(),
                success: false,
                version: None,
                error: Some("API error: 401 - unauthorized".to_string()),
            }),
        };

        let md = report.to_markdown();
        assert!(md.contains("Ready to connect to Langfuse!"));
        assert!(!md.contains("check --probe"));
        assert!(md.contains("**Status:** FAILED"));
        assert!(md.contains("**Error:** API error: 401 - unauthorized"));
        assert!(md.contains("## Troubleshooting"));
    }

    #[test]
    fn test_check_json_omits_connection_when_not_probed() {
        let report = CheckReport {
            environment: env_rows(false, false),
            missing: vec![ENV_PUBLIC_KEY.to_string(), ENV_SECRET_KEY.to_string()],
            connection: None,
        };

        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("connection").is_none());
        assert_eq!(value["missing"].as_array().unwrap().len(), 2);
        assert_eq!(value["environment"][0]["set"], false);
    }
}
