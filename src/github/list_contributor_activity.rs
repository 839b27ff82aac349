//! GitHub contributor statistics retrieval.

use crate::github::error::{FetchError, FetchResult};
use crate::github::util::{spawn_task, with_timeout};
use crate::runtime::AsyncTask;
use crate::scoring::ContributorActivity;
use log::debug;
use octocrab::Octocrab;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Delay between attempts while GitHub is still computing statistics.
const STATS_RETRY_DELAY: Duration = Duration::from_secs(2);

#[derive(Deserialize)]
struct ContributorStats {
    total: u64,
    author: Option<StatsAuthor>,
}

#[derive(Deserialize)]
struct StatsAuthor {
    login: String,
}

/// List per-author commit totals, ascending by commit count.
///
/// GitHub answers `202 Accepted` with an empty body while it computes the
/// statistics, so empty or unparseable answers are retried up to `attempts`
/// times.
pub(crate) fn list_contributor_activity(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
    attempts: u32,
    timeout: Duration,
) -> AsyncTask<FetchResult<Vec<ContributorActivity>>> {
    let (owner, repo) = (owner.into(), repo.into());
    spawn_task(async move {
        let route = format!("/repos/{owner}/{repo}/stats/contributors");
        let attempts = attempts.max(1);
        let mut last_error: Option<FetchError> = None;

        for attempt in 1..=attempts {
            let response = with_timeout(route.clone(), timeout, async {
                inner
                    .get::<Vec<ContributorStats>, _, ()>(&route, None)
                    .await
                    .map_err(FetchError::from)
            })
            .await;

            match response {
                Ok(stats) if !stats.is_empty() => {
                    let mut activity: Vec<ContributorActivity> = stats
                        .into_iter()
                        .map(|s| ContributorActivity {
                            total_commits: s.total,
                            author_login: s.author.map(|a| a.login),
                        })
                        .collect();
                    activity.sort_by_key(|a| a.total_commits);
                    return Ok(activity);
                }
                Ok(_) => {
                    debug!("Contributor stats for {owner}/{repo} not ready (attempt {attempt})");
                    last_error = None;
                }
                Err(e) => {
                    debug!("Contributor stats for {owner}/{repo} failed (attempt {attempt}): {e}");
                    last_error = Some(e);
                }
            }

            if attempt < attempts {
                tokio::time::sleep(STATS_RETRY_DELAY).await;
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => Ok(Vec::new()),
        }
    })
}
