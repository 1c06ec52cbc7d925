use crate::ui;
use anyhow::{bail, Result};
use scorelens_config::{load_config_from_file, AnalyzerConfig};
use scorelens_core::LangfuseClient;
use scorelens_metrics::{
    AnalysisError, AnalysisResult, OutputFormat, RegressionPolicy, ScoreAnalyzer, StatsError,
    ToMarkdown,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// Resolved configuration and output settings shared by every command.
pub struct Context {
    pub config: AnalyzerConfig,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

impl Context {
    /// File settings first, then environment overrides.
    pub async fn load(
        config_path: Option<PathBuf>,
        format: OutputFormat,
        output: Option<PathBuf>,
    ) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => load_config_from_file(&path).await?,
            None => AnalyzerConfig::default(),
        };

        config.apply_process_env();
        config.validate().map_err(anyhow::Error::msg)?;
        debug!("Using Langfuse host {}", config.langfuse.host);

        Ok(Self {
            config,
            format,
            output,
        })
    }

    pub fn analyzer(&self) -> Result<ScoreAnalyzer<LangfuseClient>> {
        Ok(ScoreAnalyzer::new(
            self.client()?,
            self.config.fetch.clone(),
            RegressionPolicy::new(self.config.regression.clone()),
        ))
    }

    pub fn client(&self) -> Result<LangfuseClient> {
        let settings = self.config.client_settings()?;
        Ok(LangfuseClient::new(&settings)?)
    }

    pub async fn emit<R: ToMarkdown + Serialize>(&self, report: &R) -> Result<()> {
        match &self.output {
            Some(path) => {
                self.format.export(report, path).await?;
                ui::print_success(&format!("Report written to {}", path.display()));
            }
            None => println!("{}", self.format.render(report)?),
        }
        Ok(())
    }

    /// Prints a "nothing to analyze" outcome in the selected format.
    pub async fn emit_message(&self, message: &str) -> Result<()> {
        self.emit(&Notice {
            error: message.to_string(),
        })
        .await
    }

    /// Emits a finished report, or the matching message when there was nothing
    /// to analyze. Source failures propagate.
    pub async fn finish<R: ToMarkdown + Serialize>(
        &self,
        result: AnalysisResult<R>,
        score_name: &str,
    ) -> Result<()> {
        match result {
            Ok(report) => self.emit(&report).await,
            Err(AnalysisError::Stats(StatsError::InvalidBinCount(bins))) => {
                bail!("Invalid bin count {}: --bins must be at least 1", bins)
            }
            Err(AnalysisError::Stats(e)) => self.emit_message(&no_data_message(&e, score_name)).await,
            Err(AnalysisError::Source(e)) => {
                if e.is_remote() {
                    ui::print_warning("Run `score-analyzer check --probe` to diagnose the connection");
                }
                Err(e.into())
            }
        }
    }
}

/// Message shown in place of a report; `{"error": ...}` in JSON.
#[derive(Debug, Serialize)]
struct Notice {
    error: String,
}

impl ToMarkdown for Notice {
    fn to_markdown(&self) -> String {
        self.error.clone()
    }
}

pub fn no_data_message(error: &StatsError, score_name: &str) -> String {
    match error {
        StatsError::NoData => format!("No numeric scores found for '{}'", score_name),
        other => other.to_string(),
    }
}
