use crate::analyzer::{
    CatalogReport, ComparisonReport, DistributionReport, RegressionReport, SummaryReport,
    TrendReport,
};
use anyhow::Result;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

/// Human-readable Markdown rendering of a report.
pub trait ToMarkdown {
    fn to_markdown(&self) -> String;
}

pub struct MarkdownExporter;

impl MarkdownExporter {
    pub async fn export<R: ToMarkdown>(report: &R, path: impl AsRef<Path>) -> Result<()> {
        tokio::fs::write(path, Self::format(report)).await?;
        Ok(())
    }

    pub fn format<R: ToMarkdown>(report: &R) -> String {
        report.to_markdown()
    }
}

fn markdown_table<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows).with(Style::markdown()).to_string()
}

fn stat(value: f64) -> String {
    format!("{:.4}", value)
}

#[derive(Tabled)]
struct CatalogRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Types")]
    types: String,
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct TrendRow {
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Mean")]
    mean: String,
    #[tabled(rename = "Min")]
    min: String,
    #[tabled(rename = "Max")]
    max: String,
}

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Mean")]
    mean: String,
    #[tabled(rename = "Min")]
    min: String,
    #[tabled(rename = "Max")]
    max: String,
    #[tabled(rename = "Median")]
    median: String,
}

#[derive(Tabled)]
struct HistogramRow {
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "%")]
    pct: String,
}

impl ToMarkdown for CatalogReport {
    fn to_markdown(&self) -> String {
        if self.scores.is_empty() {
            return "No scores found".to_string();
        }

        let rows = self
            .scores
            .entries
            .iter()
            .map(|entry| {
                let types = entry
                    .types
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                CatalogRow {
                    name: entry.name.clone(),
                    count: entry.count,
                    types: if types.is_empty() { "-".to_string() } else { types },
                }
            })
            .collect();

        format!(
            "# Available Scores\n\n**Period:** Last {} days\n\n{}",
            self.days,
            markdown_table(rows)
        )
    }
}

impl ToMarkdown for SummaryReport {
    fn to_markdown(&self) -> String {
        let a = &self.aggregate;
        let rows = vec![
            MetricRow { metric: "Mean", value: stat(a.mean) },
            MetricRow { metric: "Min", value: stat(a.min) },
            MetricRow { metric: "Max", value: stat(a.max) },
            MetricRow { metric: "Median (p50)", value: stat(a.p50) },
            MetricRow { metric: "p95", value: stat(a.p95) },
            MetricRow { metric: "Std Dev", value: stat(a.std_dev) },
        ];

        format!(
            r#"# Score Summary: {}

**Period:** Last {} days
**Count:** {} scores

## Statistics

{}"#,
            self.score_name,
            self.days,
            a.count,
            markdown_table(rows)
        )
    }
}

impl ToMarkdown for TrendReport {
    fn to_markdown(&self) -> String {
        if self.buckets.is_empty() {
            return "No trend data found".to_string();
        }

        let rows = self
            .buckets
            .iter()
            .map(|b| TrendRow {
                period: b.period.clone(),
                count: b.count,
                mean: stat(b.mean),
                min: stat(b.min),
                max: stat(b.max),
            })
            .collect();

        format!(
            "# Score Trend: {}\n\n**Granularity:** {}\n\n{}",
            self.score_name,
            self.granularity,
            markdown_table(rows)
        )
    }
}

impl ToMarkdown for ComparisonReport {
    fn to_markdown(&self) -> String {
        let rows: Vec<_> = self
            .breakdown
            .groups
            .iter()
            .map(|(value, s)| BreakdownRow {
                value: value.clone(),
                count: s.count,
                mean: stat(s.mean),
                min: stat(s.min),
                max: stat(s.max),
                median: stat(s.p50),
            })
            .collect();

        let body = if rows.is_empty() {
            format!("No numeric scores found for '{}'", self.score_name)
        } else {
            markdown_table(rows)
        };

        format!(
            "# Score Comparison: {}\n\n**Dimension:** {}\n**Period:** Last {} days\n\n{}",
            self.score_name, self.dimension, self.days, body
        )
    }
}

impl ToMarkdown for RegressionReport {
    fn to_markdown(&self) -> String {
        let status = if self.is_regression {
            format!(
                "**Status:** REGRESSION DETECTED ({} severity)",
                self.severity.to_string().to_uppercase()
            )
        } else {
            "**Status:** No significant regression detected".to_string()
        };

        format!(
            r#"# Regression Analysis: {}

{}

## Baseline Period
- **Period:** {}
- **Count:** {} scores
- **Mean:** {:.4}

## Current Period
- **Period:** {}
- **Count:** {} scores
- **Mean:** {:.4}

## Change
- **Delta:** {:+.4}
- **Percent Change:** {:+.2}%"#,
            self.score_name,
            status,
            self.baseline.period,
            self.baseline.count,
            self.baseline.mean,
            self.current.period,
            self.current.count,
            self.current.mean,
            self.delta,
            self.pct_change,
        )
    }
}

impl ToMarkdown for DistributionReport {
    fn to_markdown(&self) -> String {
        let h = &self.histogram;
        let rows = h
            .bins
            .iter()
            .map(|b| HistogramRow {
                range: b.range.clone(),
                count: b.count,
                pct: format!("{:.1}% {}", b.pct, "#".repeat((b.pct / 5.0) as usize)),
            })
            .collect();

        format!(
            r#"# Score Distribution: {}

**Period:** Last {} days
**Count:** {} scores
**Range:** {:.4} - {:.4}

## Histogram

{}"#,
            self.score_name,
            self.days,
            h.count,
            h.min,
            h.max,
            markdown_table(rows)
        )
    }
}
