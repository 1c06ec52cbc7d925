use super::context::Context;
use anyhow::Result;

pub async fn execute(ctx: &Context, score_name: &str, days: u32, bins: usize) -> Result<()> {
    let analyzer = ctx.analyzer()?;
    let result = analyzer.distribution(score_name, days, bins).await;
    ctx.finish(result, score_name).await
}
