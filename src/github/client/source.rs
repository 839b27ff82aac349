//! `RepositorySource` over GitHub, npm and the local clone workspace

use super::GitHubClient;
use crate::github::error::FetchResult;
use crate::runtime::AsyncTask;
use crate::scoring::{
    ContributorActivity, PackageManifest, RepoIdentity, RepositorySnapshot, RepositorySource,
};
use std::path::{Path, PathBuf};

impl RepositorySource for GitHubClient {
    fn resolve_repository(&self, input_url: &str) -> AsyncTask<FetchResult<RepoIdentity>> {
        crate::github::resolve_repository::resolve_repository(
            self.http.clone(),
            self.config.npm_registry.clone(),
            input_url,
        )
    }

    fn fetch_repository_snapshot(
        &self,
        identity: &RepoIdentity,
    ) -> AsyncTask<FetchResult<RepositorySnapshot>> {
        crate::github::fetch_repository_snapshot::fetch_repository_snapshot(
            self.inner.clone(),
            identity.clone(),
            self.config.api_timeout,
        )
    }

    fn fetch_contributor_activity(
        &self,
        owner: &str,
        repo: &str,
    ) -> AsyncTask<FetchResult<Vec<ContributorActivity>>> {
        crate::github::list_contributor_activity::list_contributor_activity(
            self.inner.clone(),
            owner,
            repo,
            self.config.contributor_stats_attempts,
            self.config.api_timeout,
        )
    }

    fn list_pull_request_numbers(
        &self,
        owner: &str,
        repo: &str,
        limit: Option<usize>,
    ) -> AsyncTask<FetchResult<Vec<u64>>> {
        crate::github::list_pull_request_numbers::list_pull_request_numbers(
            self.inner.clone(),
            owner,
            repo,
            limit,
            self.config.api_timeout,
        )
    }

    fn fetch_pull_request_additions(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> AsyncTask<FetchResult<u64>> {
        crate::github::get_pull_request_additions::get_pull_request_additions(
            self.inner.clone(),
            owner,
            repo,
            number,
            self.config.api_timeout,
        )
    }

    fn fetch_package_manifest(
        &self,
        owner: &str,
        repo: &str,
    ) -> AsyncTask<FetchResult<Option<PackageManifest>>> {
        crate::github::get_package_manifest::get_package_manifest(
            self.inner.clone(),
            owner,
            repo,
            self.config.api_timeout,
        )
    }

    fn ensure_cloned(&self, identity: &RepoIdentity) -> AsyncTask<FetchResult<PathBuf>> {
        let workspace = self.workspace.clone();
        let identity = identity.clone();
        crate::github::util::spawn_task(async move { workspace.ensure_cloned(&identity).await })
    }

    fn count_source_lines(&self, path: &Path) -> AsyncTask<FetchResult<u64>> {
        let path = path.to_path_buf();
        let max_file_size = self.config.max_file_size;
        AsyncTask::spawn(move || {
            crate::github::count_source_lines::count_source_lines(&path, max_file_size)
        })
    }
}
