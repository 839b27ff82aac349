//! Fetch-layer seam consumed by the scoring core

use std::path::{Path, PathBuf};

use crate::github::FetchResult;
use crate::runtime::AsyncTask;

use super::snapshot::{
    ContributorActivity, PackageManifest, RepoIdentity, RepositorySnapshot,
};

/// Everything the metrics need from the outside world.
///
/// Implemented by [`crate::GitHubClient`]; tests substitute an in-memory
/// source. Every operation is spawned eagerly and returned as an
/// [`AsyncTask`] so the trait stays object-safe.
pub trait RepositorySource: Send + Sync + 'static {
    /// Turn a GitHub or npm URL into the GitHub repository it refers to.
    fn resolve_repository(&self, input_url: &str) -> AsyncTask<FetchResult<RepoIdentity>>;

    /// GraphQL snapshot: READMEs, examples folder, issues, PRs, license, archived flag.
    fn fetch_repository_snapshot(
        &self,
        identity: &RepoIdentity,
    ) -> AsyncTask<FetchResult<RepositorySnapshot>>;

    /// Per-author commit totals, ascending by commit count.
    fn fetch_contributor_activity(
        &self,
        owner: &str,
        repo: &str,
    ) -> AsyncTask<FetchResult<Vec<ContributorActivity>>>;

    /// Numbers of open and closed pull requests; every one of them unless
    /// `limit` caps the count.
    fn list_pull_request_numbers(
        &self,
        owner: &str,
        repo: &str,
        limit: Option<usize>,
    ) -> AsyncTask<FetchResult<Vec<u64>>>;

    /// Lines added by one pull request.
    fn fetch_pull_request_additions(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> AsyncTask<FetchResult<u64>>;

    /// `package.json` at the default branch, `None` when the file does not exist.
    fn fetch_package_manifest(
        &self,
        owner: &str,
        repo: &str,
    ) -> AsyncTask<FetchResult<Option<PackageManifest>>>;

    /// Clone the repository once and return its working tree.
    ///
    /// Repeated calls for the same repository return the same path.
    fn ensure_cloned(&self, identity: &RepoIdentity) -> AsyncTask<FetchResult<PathBuf>>;

    /// Total lines across source files of a working tree.
    fn count_source_lines(&self, path: &Path) -> AsyncTask<FetchResult<u64>>;
}
