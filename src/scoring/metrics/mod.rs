//! The seven metric functions
//!
//! Each module exposes a pure scoring function over already-gathered inputs
//! and a crate-private `measure` that gathers those inputs from a
//! [`MetricContext`].

pub mod bus_factor;
pub mod code_review;
pub mod correctness;
pub mod dependency_pinning;
pub mod license;
pub mod ramp_up;
pub mod responsiveness;

pub use bus_factor::bus_factor_score;
pub use code_review::code_review_score;
pub use correctness::correctness_score;
pub use dependency_pinning::{is_version_pinned, pinning_score};
pub use license::detect_license;
pub use ramp_up::{EXAMPLES_DIRS, README_EXTENSIONS, README_STEMS, ramp_up_score, readme_candidates};
pub use responsiveness::responsiveness_score;

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::RunConfig;

use super::snapshot::{RepositoryData, RepositorySnapshot};
use super::source::RepositorySource;
use super::types::MetricError;

/// Inputs shared by every metric of one run.
#[derive(Clone)]
pub struct MetricContext {
    pub snapshot: Arc<RepositorySnapshot>,
    pub source: Arc<dyn RepositorySource>,
    /// Working tree prepared before dispatch, if the clone succeeded.
    pub workspace: Option<PathBuf>,
    pub config: Arc<RunConfig>,
    /// Reference instant for time-windowed metrics.
    pub now: DateTime<Utc>,
}

impl MetricContext {
    /// GraphQL data, or a `MissingData` error naming the metric.
    pub(crate) fn data(&self, metric: &str) -> Result<&RepositoryData, MetricError> {
        self.snapshot.data.as_ref().ok_or_else(|| {
            MetricError::MissingData(format!(
                "{metric}: no repository data for {}",
                self.snapshot.identity.full_name()
            ))
        })
    }

    pub(crate) fn owner(&self) -> &str {
        &self.snapshot.identity.owner
    }

    pub(crate) fn repo(&self) -> &str {
        &self.snapshot.identity.repo
    }
}
