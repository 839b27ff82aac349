//! GitHub and npm data access
//!
//! Provides the repository fetches behind the scoring metrics using the
//! octocrab library, plus the local clone workspace.

pub mod client;
pub mod error;
pub mod graphql;
pub(crate) mod helpers;
pub mod util;

// Re-export client types
pub use client::{GitHubClient, GitHubClientBuilder};
pub use clone_repository::CloneWorkspace;

// Re-export error types
pub use error::{FetchError, FetchResult};
pub use util::{join_task, spawn_task};

// Pure parsers, usable without a client
pub use count_source_lines::count_source_lines;
pub use get_package_manifest::parse_package_manifest;
pub use graphql::{parse_snapshot_payload, snapshot_query};
pub use resolve_repository::{npm_repository_url, parse_github_url, parse_npm_package};

// Remote fetches (internal)
pub(crate) mod fetch_repository_snapshot;
pub(crate) mod get_package_manifest;
pub(crate) mod get_pull_request_additions;
pub(crate) mod list_contributor_activity;
pub(crate) mod list_pull_request_numbers;
pub(crate) mod resolve_repository;

// Local clone operations (internal)
pub(crate) mod clone_repository;
pub(crate) mod count_source_lines;
