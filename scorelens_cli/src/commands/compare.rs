use super::context::Context;
use anyhow::Result;
use scorelens_core::Dimension;

pub async fn execute(ctx: &Context, score_name: &str, dimension: Dimension, days: u32) -> Result<()> {
    let analyzer = ctx.analyzer()?;
    let result = analyzer.compare(score_name, dimension, days).await;
    ctx.finish(result, score_name).await
}
