use super::context::Context;
use anyhow::Result;

pub async fn execute(ctx: &Context, score_name: &str, days: u32) -> Result<()> {
    let analyzer = ctx.analyzer()?;
    let result = analyzer.summary(score_name, days).await;
    ctx.finish(result, score_name).await
}
