use crate::config::AnalyzerConfig;
use anyhow::Result;
use std::path::Path;
use tracing::debug;

pub async fn load_config_from_file(path: impl AsRef<Path>) -> Result<AnalyzerConfig> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path).await?;
    debug!("Loaded configuration from {}", path.display());

    let extension = path.extension().and_then(|s| s.to_str());

    match extension {
        Some("yaml") | Some("yml") => parse_yaml(&contents),
        Some("toml") => parse_toml(&contents),
        Some("json") => parse_json(&contents),
        _ => Err(anyhow::anyhow!(
            "Unsupported file format. Use .yaml, .yml, .toml, or .json"
        )),
    }
}

pub fn parse_config_from_str(content: &str, format: &str) -> Result<AnalyzerConfig> {
    match format.to_lowercase().as_str() {
        "yaml" | "yml" => parse_yaml(content),
        "toml" => parse_toml(content),
        "json" => parse_json(content),
        _ => Err(anyhow::anyhow!("Unsupported format: {}", format)),
    }
}

fn parse_yaml(content: &str) -> Result<AnalyzerConfig> {
    let config: AnalyzerConfig = serde_yaml::from_str(content)?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;
    Ok(config)
}

fn parse_toml(content: &str) -> Result<AnalyzerConfig> {
    let config: AnalyzerConfig = toml::from_str(content)?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;
    Ok(config)
}

fn parse_json(content: &str) -> Result<AnalyzerConfig> {
    let config: AnalyzerConfig = serde_json::from_str(content)?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
langfuse:
  host: "http://localhost:3000"
  timeout: 10s
regression:
  regression_pct: 2.5
  higher_is_better: false
"#;

        let config = parse_yaml(yaml).unwrap();
        assert_eq!(config.langfuse.host, "http://localhost:3000");
        assert_eq!(config.langfuse.timeout, Duration::from_secs(10));
        assert_eq!(config.regression.regression_pct, 2.5);
        assert_eq!(config.regression.high_pct, 20.0);
        assert!(!config.regression.higher_is_better);
        assert_eq!(config.fetch.page_size, 100);
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[fetch]
page_size = 50
max_scores = 2000

[regression]
medium_pct = 15.0
high_pct = 30.0
"#;

        let config = parse_toml(toml).unwrap();
        assert_eq!(config.fetch.page_size, 50);
        assert_eq!(config.fetch.max_scores, 2000);
        assert_eq!(config.regression.medium_pct, 15.0);
    }

    #[test]
    fn test_parse_json() {
        let json = r#"
{
  "langfuse": { "public_key": "pk-lf-1", "secret_key": "sk-lf-1" },
  "fetch": { "list_limit": 250 }
}
"#;

        let config = parse_json(json).unwrap();
        assert_eq!(config.langfuse.public_key.as_deref(), Some("pk-lf-1"));
        assert_eq!(config.fetch.list_limit, 250);
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let yaml = r#"
regression:
  regression_pct: 25.0
"#;
        assert!(parse_yaml(yaml).is_err());
    }

    #[test]
    fn test_unsupported_format() {
        assert!(parse_config_from_str("", "ini").is_err());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scorelens.toml");
        tokio::fs::write(&path, "[langfuse]\nhost = \"http://self-hosted:3000\"\n")
            .await
            .unwrap();

        let config = load_config_from_file(&path).await.unwrap();
        assert_eq!(config.langfuse.host, "http://self-hosted:3000");

        let bad = dir.path().join("scorelens.ini");
        tokio::fs::write(&bad, "host=x").await.unwrap();
        assert!(load_config_from_file(&bad).await.is_err());
    }
}
