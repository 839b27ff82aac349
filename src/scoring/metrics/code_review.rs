//! Code-review coverage ("pull request")

use futures::stream::{self, StreamExt};
use log::warn;

use crate::github::util::join_task;
use crate::scoring::types::MetricError;

use super::MetricContext;

/// Exponential saturation of reviewed lines against the codebase size.
///
/// Introducing as many lines through pull requests as the codebase holds
/// scores 0.5. Either quantity being zero scores 0.
#[must_use]
pub fn code_review_score(lines_introduced: u64, total_lines: u64) -> f64 {
    if lines_introduced == 0 || total_lines == 0 {
        return 0.0;
    }
    let fraction = lines_introduced as f64 / total_lines as f64;
    (1.0 - (-std::f64::consts::LN_2 * fraction).exp()).clamp(0.0, 1.0)
}

pub(crate) async fn measure(ctx: &MetricContext) -> Result<f64, MetricError> {
    let name = ctx.snapshot.identity.full_name();
    let Some(root) = ctx.workspace.clone() else {
        warn!("No working tree for {name}, reporting no review coverage");
        return Ok(0.0);
    };

    let numbers = match join_task(ctx.source.list_pull_request_numbers(
        ctx.owner(),
        ctx.repo(),
        ctx.config.max_review_pull_requests,
    ))
    .await
    {
        Ok(numbers) => numbers,
        Err(e) => {
            warn!("Failed to list pull requests for {name}: {e}");
            return Ok(0.0);
        }
    };

    let lines_introduced: u64 = stream::iter(numbers)
        .map(|number| {
            let task = ctx
                .source
                .fetch_pull_request_additions(ctx.owner(), ctx.repo(), number);
            let name = &name;
            async move {
                match join_task(task).await {
                    Ok(additions) => additions,
                    Err(e) => {
                        warn!("Skipping additions of {name}#{number}: {e}");
                        0
                    }
                }
            }
        })
        .buffer_unordered(ctx.config.concurrency_limit.max(1))
        .collect::<Vec<u64>>()
        .await
        .into_iter()
        .sum();

    let total_lines = match join_task(ctx.source.count_source_lines(&root)).await {
        Ok(lines) => lines,
        Err(e) => {
            warn!("Failed to count source lines for {name}: {e}");
            return Ok(0.0);
        }
    };

    Ok(code_review_score(lines_introduced, total_lines))
}
