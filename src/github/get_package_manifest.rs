//! `package.json` retrieval from the default branch.

use crate::github::error::{FetchError, FetchResult, not_found_as};
use crate::github::util::{spawn_task, with_timeout};
use crate::runtime::AsyncTask;
use crate::scoring::PackageManifest;
use octocrab::Octocrab;
use std::sync::Arc;
use std::time::Duration;

/// Fetch and parse `package.json`; `None` when the repository has none.
pub(crate) fn get_package_manifest(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
    timeout: Duration,
) -> AsyncTask<FetchResult<Option<PackageManifest>>> {
    let (owner, repo) = (owner.into(), repo.into());
    spawn_task(async move {
        let operation = format!("get_package_json_{owner}/{repo}");
        let response = with_timeout(operation, timeout, async {
            inner
                .repos(&owner, &repo)
                .get_content()
                .path("package.json")
                .send()
                .await
                .map_err(|e| not_found_as(format!("{owner}/{repo}/package.json"), e))
        })
        .await;

        let content_items = match response {
            Ok(items) => items,
            Err(FetchError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        let text = content_items
            .items
            .first()
            .and_then(octocrab::models::repos::Content::decoded_content)
            .ok_or_else(|| {
                FetchError::Api(format!("{owner}/{repo}/package.json has no decodable content"))
            })?;

        Ok(Some(parse_package_manifest(&text)?))
    })
}

/// Parse the dependency tables and license of a `package.json` document.
pub fn parse_package_manifest(text: &str) -> FetchResult<PackageManifest> {
    Ok(serde_json::from_str(text)?)
}
