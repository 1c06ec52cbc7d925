use scorelens_core::{ScoreDataType, ScoreRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub count: usize,
    pub types: Vec<ScoreDataType>,
}

/// Distinct score names seen in a window, sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreCatalog {
    pub entries: Vec<CatalogEntry>,
}

impl ScoreCatalog {
    pub fn from_records(records: &[ScoreRecord]) -> Self {
        let mut by_name: BTreeMap<&str, (usize, BTreeSet<ScoreDataType>)> = BTreeMap::new();

        for record in records {
            let entry = by_name.entry(record.name.as_str()).or_default();
            entry.0 += 1;
            if let Some(data_type) = record.data_type {
                entry.1.insert(data_type);
            }
        }

        let entries = by_name
            .into_iter()
            .map(|(name, (count, types))| {
                let mut types: Vec<_> = types.into_iter().collect();
                types.sort_by_cached_key(|t| t.to_string());
                CatalogEntry {
                    name: name.to_string(),
                    count,
                    types,
                }
            })
            .collect();

        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
