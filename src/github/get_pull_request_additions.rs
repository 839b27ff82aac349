//! GitHub pull request size retrieval.

use crate::github::error::{FetchError, FetchResult};
use crate::github::util::{spawn_task, with_timeout};
use crate::runtime::AsyncTask;
use octocrab::Octocrab;
use std::sync::Arc;
use std::time::Duration;

/// Lines added by a pull request (0 when GitHub does not report it).
pub(crate) fn get_pull_request_additions(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
    pr_number: u64,
    timeout: Duration,
) -> AsyncTask<FetchResult<u64>> {
    let (owner, repo) = (owner.into(), repo.into());
    spawn_task(async move {
        let operation = format!("get_pull_{owner}/{repo}#{pr_number}");
        let pr = with_timeout(operation, timeout, async {
            inner
                .pulls(&owner, &repo)
                .get(pr_number)
                .await
                .map_err(FetchError::from)
        })
        .await?;
        Ok(pr.additions.unwrap_or(0))
    })
}
