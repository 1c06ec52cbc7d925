use crate::error::StatsError;
use scorelens_config::RegressionThresholds;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        };
        f.write_str(label)
    }
}

/// Baseline-vs-current mean shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionComparison {
    pub baseline_count: usize,
    pub baseline_mean: f64,
    pub current_count: usize,
    pub current_mean: f64,
    pub delta: f64,
    pub pct_change: f64,
    pub is_regression: bool,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegressionPolicy {
    thresholds: RegressionThresholds,
}

impl RegressionPolicy {
    pub fn new(thresholds: RegressionThresholds) -> Self {
        Self { thresholds }
    }

    pub fn compare(&self, baseline: &[f64], current: &[f64]) -> Result<RegressionComparison, StatsError> {
        let baseline_mean = mean_in_order(baseline).ok_or(StatsError::NoBaselineData)?;
        let current_mean = mean_in_order(current).ok_or(StatsError::NoCurrentData)?;

        Ok(self.compare_means(baseline.len(), baseline_mean, current.len(), current_mean))
    }

    pub fn compare_means(
        &self,
        baseline_count: usize,
        baseline_mean: f64,
        current_count: usize,
        current_mean: f64,
    ) -> RegressionComparison {
        let delta = current_mean - baseline_mean;
        let pct_change = if baseline_mean != 0.0 {
            delta / baseline_mean * 100.0
        } else {
            0.0
        };

        let worsened = if self.thresholds.higher_is_better {
            delta < 0.0
        } else {
            delta > 0.0
        };
        let magnitude = pct_change.abs();

        RegressionComparison {
            baseline_count,
            baseline_mean,
            current_count,
            current_mean,
            delta,
            pct_change,
            is_regression: worsened && magnitude > self.thresholds.regression_pct,
            severity: self.severity(magnitude),
        }
    }

    fn severity(&self, magnitude: f64) -> Severity {
        if magnitude > self.thresholds.high_pct {
            Severity::High
        } else if magnitude > self.thresholds.medium_pct {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

impl Default for RegressionPolicy {
    fn default() -> Self {
        Self::new(RegressionThresholds::default())
    }
}

/// Mean summed in the order the values were fetched.
fn mean_in_order(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
