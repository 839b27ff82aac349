//! GitHub pull request number listing.

use crate::github::error::{FetchError, FetchResult};
use crate::github::util::{spawn_task, with_timeout};
use crate::runtime::AsyncTask;
use octocrab::models::pulls::PullRequest;
use octocrab::{Octocrab, Page, params};
use std::sync::Arc;
use std::time::Duration;

/// List numbers of open and closed pull requests, newest first.
///
/// Pages are walked until GitHub reports no next page, or until `limit`
/// numbers are collected when a limit is given.
pub(crate) fn list_pull_request_numbers(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
    limit: Option<usize>,
    timeout: Duration,
) -> AsyncTask<FetchResult<Vec<u64>>> {
    let (owner, repo) = (owner.into(), repo.into());
    spawn_task(async move {
        let mut numbers = Vec::new();
        if limit == Some(0) {
            return Ok(numbers);
        }

        let operation = format!("list_pulls_{owner}/{repo}");
        let mut page_res: Page<PullRequest> = with_timeout(operation.clone(), timeout, async {
            inner
                .pulls(&owner, &repo)
                .list()
                .state(params::State::All)
                .per_page(100)
                .send()
                .await
                .map_err(FetchError::from)
        })
        .await?;
        numbers.extend(page_res.items.iter().map(|pr| pr.number));

        while limit.is_none_or(|limit| numbers.len() < limit) {
            let next = with_timeout(operation.clone(), timeout, async {
                inner
                    .get_page::<PullRequest>(&page_res.next)
                    .await
                    .map_err(FetchError::from)
            })
            .await?;
            let Some(next_page) = next else {
                break;
            };
            page_res = next_page;
            numbers.extend(page_res.items.iter().map(|pr| pr.number));
        }

        if let Some(limit) = limit {
            numbers.truncate(limit);
        }
        Ok(numbers)
    })
}
