pub mod client;
pub mod error;
pub mod observation;
pub mod source;
pub mod time_range;

pub use client::{ClientSettings, HealthStatus, LangfuseClient, DEFAULT_HOST};
pub use error::{Result, ScoreLensError};
pub use observation::{Dimension, Granularity, Observation, ScoreDataType, ScoreRecord, TraceRecord};
pub use source::{ScoreFilter, ScoreSource};
pub use time_range::{RegressionWindows, TimeRange};

// Re-export commonly used types
pub use async_trait::async_trait;
