//! Metric fan-out, validity gate and report assembly

use chrono::Utc;
use futures::future::join_all;
use log::{error, info, warn};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{DispatchMode, RunConfig};
use crate::github::util::join_task;
use crate::runtime::AsyncTask;

use super::metrics::MetricContext;
use super::runner;
use super::snapshot::{RepoIdentity, RepositorySnapshot};
use super::source::RepositorySource;
use super::types::{MetricName, MetricOutcome, MetricResult, ScoreReport};
use super::weights;

/// Runs the seven metrics for a snapshot and combines them.
#[derive(Clone)]
pub struct Orchestrator {
    source: Arc<dyn RepositorySource>,
    config: Arc<RunConfig>,
}

impl Orchestrator {
    pub fn new(source: Arc<dyn RepositorySource>, config: Arc<RunConfig>) -> Self {
        Self { source, config }
    }

    /// Score one repository.
    ///
    /// Waits for every metric before deciding anything. Returns `None` when
    /// any metric is invalid; no partial report is ever produced.
    pub async fn calculate_metrics(
        &self,
        snapshot: Arc<RepositorySnapshot>,
    ) -> Option<ScoreReport> {
        let workspace = self.prepare_workspace(&snapshot).await;

        let ctx = MetricContext {
            snapshot: snapshot.clone(),
            source: self.source.clone(),
            workspace,
            config: self.config.clone(),
            now: Utc::now(),
        };

        let results = match self.config.dispatch {
            DispatchMode::Concurrent => Self::dispatch_concurrent(ctx).await,
            DispatchMode::Sequential => Self::dispatch_sequential(&ctx).await,
        };

        Self::assemble(&snapshot.identity, &results)
    }

    /// Clone shared by the license and code-review metrics, made once before
    /// dispatch.
    async fn prepare_workspace(&self, snapshot: &RepositorySnapshot) -> Option<PathBuf> {
        let name = snapshot.identity.full_name();

        // Without snapshot data the report is gated whatever the clone holds.
        let Some(data) = snapshot.data.as_ref() else {
            warn!("No repository data for {name} - skipping clone");
            return None;
        };

        if let Some(kb) = data.disk_usage_kb {
            let bytes = kb.saturating_mul(1024);
            if bytes > self.config.max_repo_size {
                warn!(
                    "Repository {name} too large: {bytes} bytes (max: {} bytes) - skipping clone",
                    self.config.max_repo_size
                );
                return None;
            }
        }

        match join_task(self.source.ensure_cloned(&snapshot.identity)).await {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Clone failed for {name}: {e}");
                None
            }
        }
    }

    async fn dispatch_concurrent(ctx: MetricContext) -> BTreeMap<MetricName, MetricResult> {
        let workers = MetricName::ALL.map(|metric| {
            let ctx = ctx.clone();
            AsyncTask::spawn_async(async move { runner::run(metric, &ctx).await })
        });

        MetricName::ALL
            .into_iter()
            .zip(join_all(workers).await)
            .map(|(metric, joined)| {
                let result = joined.unwrap_or_else(|_| {
                    MetricResult::invalid(metric, "metric worker stopped before finishing")
                });
                (metric, result)
            })
            .collect()
    }

    async fn dispatch_sequential(ctx: &MetricContext) -> BTreeMap<MetricName, MetricResult> {
        let mut results = BTreeMap::new();
        for metric in MetricName::ALL {
            results.insert(metric, runner::run(metric, ctx).await);
        }
        results
    }

    /// Apply the validity gate and build the report from finished results.
    pub fn assemble(
        identity: &RepoIdentity,
        results: &BTreeMap<MetricName, MetricResult>,
    ) -> Option<ScoreReport> {
        if !weights::is_valid(results) {
            for metric in MetricName::ALL {
                match results.get(&metric).map(|r| &r.outcome) {
                    Some(MetricOutcome::Invalid(reason)) => {
                        error!("{metric} invalid for {}: {reason}", identity.input_url);
                    }
                    None => error!("{metric} missing for {}", identity.input_url),
                    Some(MetricOutcome::Score(_)) => {}
                }
            }
            error!("No score reported for {}", identity.input_url);
            return None;
        }

        let scores: BTreeMap<MetricName, f64> = results
            .iter()
            .filter_map(|(metric, result)| result.score().map(|s| (*metric, s)))
            .collect();

        let net = match weights::aggregate(&scores) {
            Ok(net) => net,
            Err(e) => {
                error!("Aggregation failed for {}: {e}", identity.input_url);
                return None;
            }
        };

        let metric = |name: MetricName| -> (f64, f64) {
            results.get(&name).map_or((0.0, 0.0), |r| {
                (r.score().unwrap_or(0.0), r.latency.as_secs_f64())
            })
        };
        let (bus_factor, bus_factor_latency) = metric(MetricName::BusFactor);
        let (correctness, correctness_latency) = metric(MetricName::Correctness);
        let (ramp_up, ramp_up_latency) = metric(MetricName::RampUp);
        let (responsive_maintainer, responsive_maintainer_latency) =
            metric(MetricName::ResponsiveMaintainer);
        let (license, license_latency) = metric(MetricName::License);
        let (good_pinning_practice, good_pinning_practice_latency) =
            metric(MetricName::GoodPinningPractice);
        let (pull_request, pull_request_latency) = metric(MetricName::PullRequest);

        info!("{} scored {:.4}", identity.input_url, net.score);

        Some(ScoreReport {
            url: identity.input_url.clone(),
            net_score: net.score,
            net_score_latency: net.latency.as_secs_f64(),
            ramp_up,
            ramp_up_latency,
            correctness,
            correctness_latency,
            bus_factor,
            bus_factor_latency,
            responsive_maintainer,
            responsive_maintainer_latency,
            license,
            license_latency,
            good_pinning_practice,
            good_pinning_practice_latency,
            pull_request,
            pull_request_latency,
        })
    }
}
