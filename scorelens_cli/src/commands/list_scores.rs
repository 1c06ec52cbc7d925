use super::context::Context;
use anyhow::Result;
use tracing::info;

pub async fn execute(ctx: &Context, days: u32) -> Result<()> {
    let analyzer = ctx.analyzer()?;
    let report = analyzer.list_scores(days).await?;

    info!(
        "Found {} distinct scores in the last {} days",
        report.scores.entries.len(),
        days
    );

    ctx.emit(&report).await
}
