use anyhow::Result;
use serde::Serialize;
use std::path::Path;

pub struct JsonExporter;

impl JsonExporter {
    pub async fn export<R: Serialize>(report: &R, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn to_string<R: Serialize>(report: &R) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}
