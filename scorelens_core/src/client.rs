//! HTTP client for the observability platform's public API

use crate::{
    error::{Result, ScoreLensError},
    observation::{ScoreRecord, TraceRecord},
    source::{ScoreFilter, ScoreSource},
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_HOST: &str = "https://cloud.langfuse.com";

/// Connection parameters, resolved from configuration and environment
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub host: String,
    pub public_key: String,
    pub secret_key: String,
    pub timeout: Duration,
    /// Records requested per page
    pub page_size: usize,
}

/// Health endpoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScoresPage {
    #[serde(default)]
    data: Vec<ScoreRecord>,
    #[serde(default)]
    meta: Option<PageMeta>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageMeta {
    #[serde(default)]
    total_pages: Option<u32>,
}

pub struct LangfuseClient {
    client: Client,
    base: Url,
    base_url: String,
    public_key: String,
    secret_key: String,
    page_size: usize,
}

impl LangfuseClient {
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        let base_url = settings.host.trim_end_matches('/').to_string();
        let base = Url::parse(&base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| {
                ScoreLensError::InvalidConfig(format!("Invalid Langfuse host: {}", settings.host))
            })?;

        Ok(Self {
            client,
            base,
            base_url,
            public_key: settings.public_key.clone(),
            secret_key: settings.secret_key.clone(),
            page_size: settings.page_size.max(1),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        self.get(&["health"], &[]).await
    }

    /// `/api/public/<segments>` under the host, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ScoreLensError::InvalidConfig(format!("Invalid Langfuse host: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["api", "public"])
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str], query: &[(&str, String)]) -> Result<T> {
        let url = self.endpoint(segments)?;
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(url.clone())
            .basic_auth(&self.public_key, Some(&self.secret_key))
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ScoreLensError::NotFound(url.path().to_string()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ScoreLensError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }

    fn score_query(&self, filter: &ScoreFilter, page: u32, limit: usize) -> Vec<(&'static str, String)> {
        let mut query = vec![("page", page.to_string()), ("limit", limit.to_string())];
        if let Some(name) = &filter.name {
            query.push(("name", name.clone()));
        }
        if let Some(range) = &filter.range {
            query.push(("fromTimestamp", range.iso_from()));
            query.push(("toTimestamp", range.iso_to()));
        }
        query
    }
}

#[async_trait]
impl ScoreSource for LangfuseClient {
    async fn list_scores(&self, filter: &ScoreFilter) -> Result<Vec<ScoreRecord>> {
        let mut records = Vec::new();
        let mut page = 1u32;

        // Page size stays fixed so page offsets line up; the overshoot is truncated.
        let limit = self.page_size.min(filter.max_results.max(1));

        while records.len() < filter.max_results {
            let query = self.score_query(filter, page, limit);

            let batch: ScoresPage = self.get(&["scores"], &query).await?;
            let fetched = batch.data.len();
            debug!("Fetched page {} with {} scores", page, fetched);

            records.extend(batch.data);

            let total_pages = batch.meta.and_then(|m| m.total_pages);
            let last_page = match total_pages {
                Some(total) => page >= total,
                None => fetched < limit,
            };
            if fetched == 0 || last_page {
                break;
            }
            page += 1;
        }

        records.truncate(filter.max_results);
        Ok(records)
    }

    async fn get_trace(&self, trace_id: &str) -> Result<TraceRecord> {
        self.get(&["traces", trace_id], &[]).await
    }
}
