use crate::error::StatsError;
use serde::{Deserialize, Serialize};

/// Descriptive statistics over one set of score values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub p50: f64,
    pub p95: f64,
    pub std_dev: f64,
}

impl Aggregate {
    pub fn compute(values: &[f64]) -> Result<Self, StatsError> {
        if values.is_empty() {
            return Err(StatsError::NoData);
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let count = sorted.len();
        let mean = Self::mean(&sorted);

        // Population variance: divide by n.
        let variance = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count as f64;

        Ok(Aggregate {
            count,
            mean,
            min: sorted[0],
            max: sorted[count - 1],
            p50: Self::percentile(&sorted, 0.50),
            p95: Self::percentile(&sorted, 0.95),
            std_dev: variance.sqrt(),
        })
    }

    /// Nearest-rank percentile on a sorted slice: index `floor(n * p)`, no interpolation.
    pub fn percentile(sorted: &[f64], percentile: f64) -> f64 {
        if sorted.is_empty() {
            return f64::NAN;
        }

        let index = ((sorted.len() as f64) * percentile) as usize;
        let index = index.min(sorted.len() - 1);
        sorted[index]
    }

    fn mean(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
