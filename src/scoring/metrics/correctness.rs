//! Issue resolution ("correctness")

use crate::scoring::types::MetricError;

use super::MetricContext;

/// Share of issues that are closed. A repository with no issues scores 1.
#[must_use]
pub fn correctness_score(open_issues: u64, closed_issues: u64) -> f64 {
    let total = open_issues + closed_issues;
    if total == 0 {
        return 1.0;
    }
    closed_issues as f64 / total as f64
}

pub(crate) async fn measure(ctx: &MetricContext) -> Result<f64, MetricError> {
    let data = ctx.data("correctness")?;
    let open = data
        .open_issues
        .as_ref()
        .ok_or_else(|| MetricError::MissingData("open issue total".to_string()))?;
    let closed = data
        .closed_issues
        .as_ref()
        .ok_or_else(|| MetricError::MissingData("closed issue total".to_string()))?;

    Ok(correctness_score(open.total_count, closed.total_count))
}
