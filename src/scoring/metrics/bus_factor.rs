//! Contributor concentration ("bus factor")

use crate::github::util::join_task;
use crate::scoring::snapshot::ContributorActivity;
use crate::scoring::types::MetricError;

use super::MetricContext;

const SIGMA: f64 = 3.0;

/// Score contributor concentration.
///
/// `k` is the smallest number of top contributors whose commits cover half of
/// all commits. The score saturates along `1 - exp(-k²/2σ²)` and is exactly 1
/// once `k` exceeds 9. Returns `None` when there are no commits to count.
#[must_use]
pub fn bus_factor_score(activity: &[ContributorActivity]) -> Option<f64> {
    let mut commits: Vec<u64> = activity.iter().map(|a| a.total_commits).collect();
    commits.sort_unstable();

    let total: u64 = commits.iter().sum();
    if total == 0 {
        return None;
    }

    let threshold = total as f64 * 0.5;
    let mut covered = 0u64;
    let mut k = 0u32;
    for count in commits.iter().rev() {
        covered += count;
        k += 1;
        if covered as f64 >= threshold {
            break;
        }
    }

    if k > 9 {
        return Some(1.0);
    }
    let k = f64::from(k);
    Some(1.0 - (-(k * k) / (2.0 * SIGMA * SIGMA)).exp())
}

pub(crate) async fn measure(ctx: &MetricContext) -> Result<f64, MetricError> {
    let activity = join_task(
        ctx.source
            .fetch_contributor_activity(ctx.owner(), ctx.repo()),
    )
    .await?;

    bus_factor_score(&activity).ok_or_else(|| {
        MetricError::MissingData(format!(
            "no contributor commits for {}",
            ctx.snapshot.identity.full_name()
        ))
    })
}
