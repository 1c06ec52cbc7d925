use scorelens_core::ScoreLensError;
use thiserror::Error;

/// "No data" style conditions raised by the statistical routines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("No data")]
    NoData,

    #[error("No baseline data found")]
    NoBaselineData,

    #[error("No current data found")]
    NoCurrentData,

    #[error("Invalid bin count: {0} (must be >= 1)")]
    InvalidBinCount(usize),
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Source(#[from] ScoreLensError),

    #[error(transparent)]
    Stats(#[from] StatsError),
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
