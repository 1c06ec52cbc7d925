use crate::{
    error::Result,
    observation::{Observation, ScoreRecord, TraceRecord},
    time_range::TimeRange,
};
use async_trait::async_trait;

/// Query parameters for a score listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreFilter {
    pub name: Option<String>,
    pub range: Option<TimeRange>,
    /// Upper bound on records collected across all pages.
    pub max_results: usize,
}

impl ScoreFilter {
    pub fn named(name: impl Into<String>, range: TimeRange, max_results: usize) -> Self {
        Self {
            name: Some(name.into()),
            range: Some(range),
            max_results,
        }
    }

    pub fn all(range: TimeRange, max_results: usize) -> Self {
        Self {
            name: None,
            range: Some(range),
            max_results,
        }
    }
}

/// Anything that can serve score and trace records.
#[async_trait]
pub trait ScoreSource: Send + Sync {
    /// List score records matching the filter
    async fn list_scores(&self, filter: &ScoreFilter) -> Result<Vec<ScoreRecord>>;

    /// Look up a single trace
    async fn get_trace(&self, trace_id: &str) -> Result<TraceRecord>;

    /// Numeric observations for the filter; records without a value are dropped
    async fn fetch_values(&self, filter: &ScoreFilter) -> Result<Vec<Observation>> {
        let records = self.list_scores(filter).await?;
        Ok(records
            .iter()
            .filter_map(ScoreRecord::to_observation)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoreLensError;

    struct FixedSource {
        records: Vec<ScoreRecord>,
    }

    #[async_trait]
    impl ScoreSource for FixedSource {
        async fn list_scores(&self, _filter: &ScoreFilter) -> Result<Vec<ScoreRecord>> {
            Ok(self.records.clone())
        }

        async fn get_trace(&self, trace_id: &str) -> Result<TraceRecord> {
            Err(ScoreLensError::NotFound(trace_id.to_string()))
        }
    }

    fn record(id: &str, value: Option<f64>) -> ScoreRecord {
        ScoreRecord {
            id: id.to_string(),
            trace_id: None,
            name: "accuracy".to_string(),
            value,
            string_value: None,
            data_type: None,
            timestamp: None,
            source: None,
            comment: None,
        }
    }

    #[tokio::test]
    async fn test_fetch_values_drops_missing() {
        let source = FixedSource {
            records: vec![record("a", Some(0.5)), record("b", None), record("c", Some(1.0))],
        };

        let values = source.fetch_values(&ScoreFilter::default()).await.unwrap();
        assert_eq!(Observation::values(&values), vec![0.5, 1.0]);
    }
}
