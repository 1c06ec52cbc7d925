use super::context::Context;
use anyhow::Result;
use scorelens_core::Granularity;

pub async fn execute(
    ctx: &Context,
    score_name: &str,
    days: u32,
    granularity: Granularity,
) -> Result<()> {
    let analyzer = ctx.analyzer()?;
    let result = analyzer.trend(score_name, days, granularity).await;
    ctx.finish(result, score_name).await
}
