use super::context::Context;
use anyhow::Result;

pub async fn execute(
    ctx: &Context,
    score_name: &str,
    baseline_days: u32,
    current_days: u32,
) -> Result<()> {
    let analyzer = ctx.analyzer()?;
    let result = analyzer
        .regression(score_name, baseline_days, current_days)
        .await;
    ctx.finish(result, score_name).await
}
