use crate::{
    aggregator::Aggregate,
    breakdown::DimensionBreakdown,
    bucketer::{BucketSummary, TimeBucketer},
    catalog::ScoreCatalog,
    error::AnalysisResult,
    histogram::Histogram,
    regression::{RegressionComparison, RegressionPolicy},
};
use chrono::{DateTime, Utc};
use scorelens_config::FetchSettings;
use scorelens_core::{
    Dimension, Granularity, Observation, RegressionWindows, ScoreFilter, ScoreSource, TimeRange,
    TraceRecord,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub score_name: String,
    pub days: u32,
    #[serde(flatten)]
    pub aggregate: Aggregate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub score_name: String,
    pub days: u32,
    pub granularity: Granularity,
    pub buckets: Vec<BucketSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub score_name: String,
    pub dimension: Dimension,
    pub days: u32,
    pub breakdown: DimensionBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub period: String,
    pub days: u32,
    pub count: usize,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionReport {
    pub score_name: String,
    pub baseline: PeriodSummary,
    pub current: PeriodSummary,
    pub delta: f64,
    pub pct_change: f64,
    pub is_regression: bool,
    pub severity: crate::regression::Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionReport {
    pub score_name: String,
    pub days: u32,
    #[serde(flatten)]
    pub histogram: Histogram,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogReport {
    pub days: u32,
    pub scores: ScoreCatalog,
}

/// Runs each analysis against a score source: fetch, then reduce.
pub struct ScoreAnalyzer<S: ScoreSource> {
    source: S,
    fetch: FetchSettings,
    policy: RegressionPolicy,
    now: DateTime<Utc>,
}

impl<S: ScoreSource> ScoreAnalyzer<S> {
    pub fn new(source: S, fetch: FetchSettings, policy: RegressionPolicy) -> Self {
        Self {
            source,
            fetch,
            policy,
            now: Utc::now(),
        }
    }

    /// Pin the reference time used to build query windows.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    async fn observations(&self, score_name: &str, range: TimeRange) -> AnalysisResult<Vec<Observation>> {
        let filter = ScoreFilter::named(score_name, range, self.fetch.max_scores);
        let observations = self.source.fetch_values(&filter).await?;
        debug!(
            "Fetched {} observations for '{}' ({})",
            observations.len(),
            score_name,
            range.label()
        );
        Ok(observations)
    }

    pub async fn list_scores(&self, days: u32) -> AnalysisResult<CatalogReport> {
        let range = TimeRange::last_days(self.now, days)?;
        let records = self
            .source
            .list_scores(&ScoreFilter::all(range, self.fetch.list_limit))
            .await?;

        Ok(CatalogReport {
            days,
            scores: ScoreCatalog::from_records(&records),
        })
    }

    pub async fn summary(&self, score_name: &str, days: u32) -> AnalysisResult<SummaryReport> {
        let range = TimeRange::last_days(self.now, days)?;
        let observations = self.observations(score_name, range).await?;
        let aggregate = Aggregate::compute(&Observation::values(&observations))?;

        Ok(SummaryReport {
            score_name: score_name.to_string(),
            days,
            aggregate,
        })
    }

    pub async fn trend(
        &self,
        score_name: &str,
        days: u32,
        granularity: Granularity,
    ) -> AnalysisResult<TrendReport> {
        let range = TimeRange::last_days(self.now, days)?;
        let observations = self.observations(score_name, range).await?;

        Ok(TrendReport {
            score_name: score_name.to_string(),
            days,
            granularity,
            buckets: TimeBucketer::bucketize(&observations, granularity),
        })
    }

    pub async fn compare(
        &self,
        score_name: &str,
        dimension: Dimension,
        days: u32,
    ) -> AnalysisResult<ComparisonReport> {
        let range = TimeRange::last_days(self.now, days)?;
        let filter = ScoreFilter::named(score_name, range, self.fetch.max_scores);
        let records = self.source.list_scores(&filter).await?;

        // one lookup per distinct trace; failures are remembered as None
        let mut traces: HashMap<String, Option<TraceRecord>> = HashMap::new();
        let mut samples = Vec::new();

        for record in &records {
            let (Some(value), Some(trace_id)) = (record.value, record.trace_id.as_deref()) else {
                continue;
            };

            if !traces.contains_key(trace_id) {
                let trace = match self.source.get_trace(trace_id).await {
                    Ok(trace) => Some(trace),
                    Err(e) => {
                        warn!("Failed to fetch trace '{}': {}", trace_id, e);
                        None
                    }
                };
                traces.insert(trace_id.to_string(), trace);
            }

            if let Some(Some(trace)) = traces.get(trace_id) {
                samples.push((trace.dimension(dimension), value));
            }
        }

        info!(
            "Compared {} scores across {} traces by {}",
            samples.len(),
            traces.len(),
            dimension
        );

        Ok(ComparisonReport {
            score_name: score_name.to_string(),
            dimension,
            days,
            breakdown: DimensionBreakdown::compute(samples)?,
        })
    }

    pub async fn regression(
        &self,
        score_name: &str,
        baseline_days: u32,
        current_days: u32,
    ) -> AnalysisResult<RegressionReport> {
        let windows = RegressionWindows::new(self.now, baseline_days, current_days)?;

        let baseline = self.observations(score_name, windows.baseline).await?;
        let current = self.observations(score_name, windows.current).await?;

        let comparison: RegressionComparison = self
            .policy
            .compare(&Observation::values(&baseline), &Observation::values(&current))?;

        if comparison.is_regression {
            warn!(
                "Regression detected for '{}': {:+.2}% ({})",
                score_name, comparison.pct_change, comparison.severity
            );
        }

        Ok(RegressionReport {
            score_name: score_name.to_string(),
            baseline: PeriodSummary {
                period: windows.baseline.label(),
                days: baseline_days,
                count: comparison.baseline_count,
                mean: comparison.baseline_mean,
            },
            current: PeriodSummary {
                period: windows.current.label(),
                days: current_days,
                count: comparison.current_count,
                mean: comparison.current_mean,
            },
            delta: comparison.delta,
            pct_change: comparison.pct_change,
            is_regression: comparison.is_regression,
            severity: comparison.severity,
        })
    }

    pub async fn distribution(
        &self,
        score_name: &str,
        days: u32,
        bins: usize,
    ) -> AnalysisResult<DistributionReport> {
        let range = TimeRange::last_days(self.now, days)?;
        let observations = self.observations(score_name, range).await?;
        let histogram = Histogram::build(&Observation::values(&observations), bins)?;

        Ok(DistributionReport {
            score_name: score_name.to_string(),
            days,
            histogram,
        })
    }
}
