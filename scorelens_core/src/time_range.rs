use crate::error::{Result, ScoreLensError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A closed `[from, to]` query window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    pub fn last_days(now: DateTime<Utc>, days: u32) -> Result<Self> {
        Ok(Self::new(days_before(now, days)?, now))
    }

    pub fn iso_from(&self) -> String {
        self.from.format(ISO_FORMAT).to_string()
    }

    pub fn iso_to(&self) -> String {
        self.to.format(ISO_FORMAT).to_string()
    }

    pub fn label(&self) -> String {
        format!(
            "{} to {}",
            self.from.format(DATE_FORMAT),
            self.to.format(DATE_FORMAT)
        )
    }
}

/// Back-to-back baseline and current windows ending at `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegressionWindows {
    pub baseline: TimeRange,
    pub current: TimeRange,
}

impl RegressionWindows {
    pub fn new(now: DateTime<Utc>, baseline_days: u32, current_days: u32) -> Result<Self> {
        let current = TimeRange::last_days(now, current_days)?;
        let baseline = TimeRange::new(days_before(current.from, baseline_days)?, current.from);
        Ok(Self { baseline, current })
    }
}

fn days_before(instant: DateTime<Utc>, days: u32) -> Result<DateTime<Utc>> {
    if days == 0 {
        return Err(ScoreLensError::InvalidConfig(
            "day count must be at least 1".to_string(),
        ));
    }
    instant
        .checked_sub_signed(Duration::days(i64::from(days)))
        .ok_or_else(|| ScoreLensError::InvalidConfig(format!("day count out of range: {}", days)))
}
