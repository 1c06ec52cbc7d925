mod commands;
mod ui;

use clap::{Parser, Subcommand};
use commands::context::Context;
use scorelens_core::{Dimension, Granularity};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "score-analyzer")]
#[command(about = "Analyze score trends, detect regressions, and understand score distributions", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file (YAML, TOML, or JSON)
    #[arg(short, long, global = true, env = "SCORELENS_CONFIG")]
    config: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(short, long, global = true, default_value = "markdown")]
    format: String,

    /// Write the report to a file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available scores
    ListScores {
        /// Days to look back
        #[arg(long, default_value_t = 30)]
        days: u32,
    },

    /// Get score statistics
    Summary {
        /// Score name
        #[arg(long)]
        score_name: String,

        /// Days to analyze
        #[arg(long, default_value_t = 30)]
        days: u32,
    },

    /// Show score trend over time
    Trend {
        /// Score name
        #[arg(long)]
        score_name: String,

        /// Days to analyze
        #[arg(long, default_value_t = 14)]
        days: u32,

        /// Time granularity
        #[arg(long, default_value = "day", value_parser = Granularity::NAMES)]
        granularity: String,
    },

    /// Compare scores by dimension
    Compare {
        /// Score name
        #[arg(long)]
        score_name: String,

        /// Dimension to compare
        #[arg(long, value_parser = Dimension::NAMES)]
        dimension: String,

        /// Days to analyze
        #[arg(long, default_value_t = 7)]
        days: u32,
    },

    /// Detect score regressions
    Regression {
        /// Score name
        #[arg(long)]
        score_name: String,

        /// Baseline period days
        #[arg(long, default_value_t = 14)]
        baseline_days: u32,

        /// Current period days
        #[arg(long, default_value_t = 7)]
        current_days: u32,
    },

    /// Show score distribution
    Distribution {
        /// Score name
        #[arg(long)]
        score_name: String,

        /// Days to analyze
        #[arg(long, default_value_t = 30)]
        days: u32,

        /// Number of bins
        #[arg(long, default_value_t = 10)]
        bins: usize,
    },

    /// Check environment setup
    Check {
        /// Also test the connection and credentials
        #[arg(long)]
        probe: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging; stdout is reserved for reports
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = cli.format.parse().map_err(anyhow::Error::msg)?;
    let ctx = Context::load(cli.config, format, cli.output).await?;

    match cli.command {
        Commands::ListScores { days } => {
            commands::list_scores::execute(&ctx, days).await?;
        }

        Commands::Summary { score_name, days } => {
            commands::summary::execute(&ctx, &score_name, days).await?;
        }

        Commands::Trend {
            score_name,
            days,
            granularity,
        } => {
            let granularity = granularity.parse().map_err(anyhow::Error::msg)?;
            commands::trend::execute(&ctx, &score_name, days, granularity).await?;
        }

        Commands::Compare {
            score_name,
            dimension,
            days,
        } => {
            let dimension = dimension.parse().map_err(anyhow::Error::msg)?;
            commands::compare::execute(&ctx, &score_name, dimension, days).await?;
        }

        Commands::Regression {
            score_name,
            baseline_days,
            current_days,
        } => {
            commands::regression::execute(&ctx, &score_name, baseline_days, current_days).await?;
        }

        Commands::Distribution {
            score_name,
            days,
            bins,
        } => {
            commands::distribution::execute(&ctx, &score_name, days, bins).await?;
        }

        Commands::Check { probe } => {
            commands::check::execute(&ctx, probe).await?;
        }
    }

    Ok(())
}
