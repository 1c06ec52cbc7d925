use crate::{aggregator::Aggregate, error::StatsError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub p50: f64,
}

impl From<Aggregate> for DimensionStats {
    fn from(aggregate: Aggregate) -> Self {
        Self {
            count: aggregate.count,
            mean: aggregate.mean,
            min: aggregate.min,
            max: aggregate.max,
            p50: aggregate.p50,
        }
    }
}

/// Score statistics grouped by a trace attribute, keyed in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionBreakdown {
    pub groups: BTreeMap<String, DimensionStats>,
}

impl DimensionBreakdown {
    pub fn compute<I, K>(samples: I) -> Result<Self, StatsError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut grouped: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for (key, value) in samples {
            grouped.entry(key.into()).or_default().push(value);
        }

        let mut groups = BTreeMap::new();
        for (key, values) in grouped {
            groups.insert(key, Aggregate::compute(&values)?.into());
        }

        Ok(Self { groups })
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
