pub mod aggregator;
pub mod analyzer;
pub mod breakdown;
pub mod bucketer;
pub mod catalog;
pub mod error;
pub mod exporters;
pub mod histogram;
pub mod regression;

pub use aggregator::Aggregate;
pub use analyzer::{
    CatalogReport, ComparisonReport, DistributionReport, PeriodSummary, RegressionReport,
    ScoreAnalyzer, SummaryReport, TrendReport,
};
pub use breakdown::{DimensionBreakdown, DimensionStats};
pub use bucketer::{bucket_key, BucketSummary, TimeBucketer};
pub use catalog::{CatalogEntry, ScoreCatalog};
pub use error::{AnalysisError, AnalysisResult, StatsError};
pub use exporters::{JsonExporter, MarkdownExporter, OutputFormat, ToMarkdown};
pub use histogram::{Histogram, HistogramBin};
pub use regression::{RegressionComparison, RegressionPolicy, Severity};
