//! Maintainer responsiveness

use chrono::{DateTime, Months, Utc};

use crate::scoring::snapshot::RepositoryData;
use crate::scoring::types::MetricError;

use super::MetricContext;

/// Close ratios of recent issues and pull requests, weighted half each.
///
/// The three node lists are scanned index-aligned up to the longest of them;
/// an item counts when it was created at or after `cutoff`. Archived
/// repositories score 0.
pub fn responsiveness_score(
    data: &RepositoryData,
    cutoff: DateTime<Utc>,
) -> Result<f64, MetricError> {
    if data.is_archived {
        return Ok(0.0);
    }

    let missing = |what: &str| MetricError::MissingData(format!("{what} nodes"));
    let prs = &data
        .pull_requests
        .as_ref()
        .ok_or_else(|| missing("pull request"))?
        .nodes;
    let open = &data
        .open_issues
        .as_ref()
        .ok_or_else(|| missing("open issue"))?
        .nodes;
    let closed = &data
        .closed_issues
        .as_ref()
        .ok_or_else(|| missing("closed issue"))?
        .nodes;

    let (mut open_prs, mut closed_prs) = (0u32, 0u32);
    let (mut open_issues, mut closed_issues) = (0u32, 0u32);

    let len = prs.len().max(open.len()).max(closed.len());
    for i in 0..len {
        if let Some(pr) = prs.get(i)
            && pr.created_at >= cutoff
        {
            if pr.closed || pr.closed_at.is_some() {
                closed_prs += 1;
            } else {
                open_prs += 1;
            }
        }
        if let Some(issue) = open.get(i)
            && issue.created_at >= cutoff
        {
            open_issues += 1;
        }
        if let Some(issue) = closed.get(i)
            && issue.created_at >= cutoff
        {
            closed_issues += 1;
        }
    }

    let issue_ratio = ratio(closed_issues, closed_issues + open_issues);
    let pr_ratio = ratio(closed_prs, closed_prs + open_prs);
    Ok(0.5 * issue_ratio + 0.5 * pr_ratio)
}

fn ratio(part: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(total)
    }
}

pub(crate) async fn measure(ctx: &MetricContext) -> Result<f64, MetricError> {
    let data = ctx.data("responsiveness")?;
    let window = Months::new(ctx.config.responsiveness_window_months);
    let cutoff = ctx.now.checked_sub_months(window).ok_or_else(|| {
        MetricError::Malformed(format!("cannot step {window:?} back from {}", ctx.now))
    })?;
    responsiveness_score(data, cutoff)
}
