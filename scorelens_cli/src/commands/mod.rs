pub mod check;
pub mod compare;
pub mod context;
pub mod distribution;
pub mod list_scores;
pub mod regression;
pub mod summary;
pub mod trend;
