//! Metric orchestration and net scoring
//!
//! The seven metrics run against one immutable [`RepositorySnapshot`]; the
//! [`Orchestrator`] gates on their validity and the weights in [`weights`]
//! turn them into a single net score.

pub mod metrics;
pub mod orchestrator;
pub mod runner;
mod scorer;
mod snapshot;
mod source;
mod types;
pub mod weights;

pub use metrics::MetricContext;
pub use orchestrator::Orchestrator;
pub use scorer::{ScoreSession, ScoredUrl, Scorer};
pub use snapshot::{
    ContributorActivity, ItemConnection, ItemNode, LicenseInfo, PackageManifest, RepoIdentity,
    RepositoryData, RepositorySnapshot,
};
pub use source::RepositorySource;
pub use types::{
    MetricError, MetricName, MetricOutcome, MetricResult, NetScore, ScoreError, ScoreReport,
    ScoreResult,
};
