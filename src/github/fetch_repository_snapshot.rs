//! GitHub repository snapshot retrieval (GraphQL).

use crate::github::error::{FetchError, FetchResult};
use crate::github::graphql::{parse_snapshot_payload, snapshot_query};
use crate::github::util::{spawn_task, with_timeout};
use crate::runtime::AsyncTask;
use crate::scoring::{RepoIdentity, RepositorySnapshot};
use octocrab::Octocrab;
use std::sync::Arc;
use std::time::Duration;

/// Fetch READMEs, examples folder, issues, pull requests, license and
/// archive state in a single GraphQL round trip.
pub(crate) fn fetch_repository_snapshot(
    inner: Arc<Octocrab>,
    identity: RepoIdentity,
    timeout: Duration,
) -> AsyncTask<FetchResult<RepositorySnapshot>> {
    spawn_task(async move {
        let payload = serde_json::json!({
            "query": snapshot_query(),
            "variables": { "owner": identity.owner, "name": identity.repo },
        });

        let operation = format!("graphql_snapshot_{}", identity.full_name());
        let body: serde_json::Value = with_timeout(operation, timeout, async {
            inner.graphql(&payload).await.map_err(FetchError::from)
        })
        .await?;

        parse_snapshot_payload(identity, body)
    })
}
