//! `netscore` - trustworthiness scoring for npm packages and GitHub repositories
//!
//! Each repository is measured on seven metrics (bus factor, correctness,
//! ramp-up, responsiveness, license, dependency pinning and code review),
//! every metric in `[0, 1]`, and the results are combined into a weighted
//! net score. Data comes from the GitHub GraphQL/REST APIs, the npm registry
//! and a shallow local clone.

// Module declarations
pub mod config;
pub mod github;
pub mod logging;
pub mod runtime;
pub mod scoring;

// Re-export runtime types
pub use runtime::AsyncTask;

// Re-export configuration
pub use config::{DispatchMode, LogLevel, RunConfig};
pub use logging::init_logging;

// Re-export GitHub client types
pub use github::{FetchError, FetchResult, GitHubClient, GitHubClientBuilder};

// Re-export scoring types for public API
pub use scoring::{
    MetricContext, MetricError, MetricName, MetricOutcome, MetricResult, NetScore, Orchestrator,
    RepoIdentity, RepositorySnapshot, RepositorySource, ScoreError, ScoreReport, ScoreResult,
    ScoreSession, ScoredUrl, Scorer,
};
