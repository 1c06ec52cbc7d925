use chrono::{DateTime, Datelike, Duration, Utc};
use scorelens_core::{Granularity, Observation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-period statistics for a trend line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketSummary {
    pub period: String,
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Calendar bucket key. Keys sort lexicographically in chronological order.
pub fn bucket_key(timestamp: DateTime<Utc>, granularity: Granularity) -> String {
    match granularity {
        Granularity::Hour => timestamp.format("%Y-%m-%d %H:00").to_string(),
        Granularity::Day => timestamp.format("%Y-%m-%d").to_string(),
        Granularity::Week => {
            let offset = i64::from(timestamp.weekday().num_days_from_monday());
            let week_start = timestamp - Duration::days(offset);
            week_start.format("%Y-%m-%d").to_string()
        }
        Granularity::Month => timestamp.format("%Y-%m").to_string(),
    }
}

pub struct TimeBucketer;

impl TimeBucketer {
    pub fn bucketize(observations: &[Observation], granularity: Granularity) -> Vec<BucketSummary> {
        let mut buckets: BTreeMap<String, Vec<f64>> = BTreeMap::new();

        for observation in observations {
            // untimed observations cannot be placed on the timeline
            let Some(timestamp) = observation.timestamp else {
                continue;
            };
            buckets
                .entry(bucket_key(timestamp, granularity))
                .or_default()
                .push(observation.value);
        }

        buckets
            .into_iter()
            .map(|(period, values)| {
                let count = values.len();
                let mean = values.iter().sum::<f64>() / count as f64;
                let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
                let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                BucketSummary {
                    period,
                    count,
                    mean,
                    min,
                    max,
                }
            })
            .collect()
    }
}
