pub mod json;
pub mod markdown;

pub use json::JsonExporter;
pub use markdown::{MarkdownExporter, ToMarkdown};

use anyhow::Result;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

impl OutputFormat {
    pub fn render<R: ToMarkdown + Serialize>(&self, report: &R) -> Result<String> {
        match self {
            OutputFormat::Markdown => Ok(MarkdownExporter::format(report)),
            OutputFormat::Json => JsonExporter::to_string(report),
        }
    }

    pub async fn export<R: ToMarkdown + Serialize>(
        &self,
        report: &R,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        match self {
            OutputFormat::Markdown => MarkdownExporter::export(report, path).await,
            OutputFormat::Json => JsonExporter::export(report, path).await,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Markdown => f.write_str("markdown"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown format: {}", other)),
        }
    }
}
