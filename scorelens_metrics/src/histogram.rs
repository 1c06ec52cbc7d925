use crate::error::StatsError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub range: String,
    pub start: f64,
    pub end: f64,
    pub count: usize,
    /// Share of all values, rounded to one decimal place
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Equal-width bins over `[min, max]`; the last bin is closed on the right.
    pub fn build(values: &[f64], bins: usize) -> Result<Self, StatsError> {
        if bins < 1 {
            return Err(StatsError::InvalidBinCount(bins));
        }
        if values.is_empty() {
            return Err(StatsError::NoData);
        }

        let count = values.len();
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        if min == max {
            return Ok(Self {
                count,
                min,
                max,
                bins: vec![HistogramBin {
                    range: format!("{:.2}", min),
                    start: min,
                    end: max,
                    count,
                    pct: 100.0,
                }],
            });
        }

        let width = (max - min) / bins as f64;
        let mut counts = vec![0usize; bins];
        for &value in values {
            let idx = ((value - min) / width) as usize;
            counts[idx.min(bins - 1)] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, bin_count)| {
                let start = min + i as f64 * width;
                let end = start + width;
                HistogramBin {
                    range: format!("{:.2}-{:.2}", start, end),
                    start,
                    end,
                    count: bin_count,
                    pct: round_to_tenth(bin_count as f64 / count as f64 * 100.0),
                }
            })
            .collect();

        Ok(Self {
            count,
            min,
            max,
            bins,
        })
    }
}

/// One decimal place, halves to even.
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
