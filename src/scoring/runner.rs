//! Single-metric execution with timing and failure normalization

use log::{debug, warn};
use std::time::Instant;

use super::metrics::{
    MetricContext, bus_factor, code_review, correctness, dependency_pinning, license, ramp_up,
    responsiveness,
};
use super::types::{MetricError, MetricName, MetricResult, ScoreResult};

/// Run one metric against a prepared context.
///
/// The clock starts once the context is in hand, so only the metric's own
/// fetches and arithmetic are timed. Errors never escape: they become an
/// invalid result with zero latency.
pub async fn run(metric: MetricName, ctx: &MetricContext) -> MetricResult {
    let start = Instant::now();
    let outcome: Result<f64, MetricError> = match metric {
        MetricName::BusFactor => bus_factor::measure(ctx).await,
        MetricName::Correctness => correctness::measure(ctx).await,
        MetricName::RampUp => ramp_up::measure(ctx).await,
        MetricName::ResponsiveMaintainer => responsiveness::measure(ctx).await,
        MetricName::License => license::measure(ctx).await,
        MetricName::GoodPinningPractice => dependency_pinning::measure(ctx).await,
        MetricName::PullRequest => code_review::measure(ctx).await,
    };
    let elapsed = start.elapsed();

    match outcome {
        Ok(score) => {
            debug!(
                "{metric} for {}: {score:.4} in {elapsed:?}",
                ctx.snapshot.identity.full_name()
            );
            MetricResult::valid(metric, score, elapsed)
        }
        Err(e) => {
            warn!(
                "{metric} failed for {}: {e}",
                ctx.snapshot.identity.full_name()
            );
            MetricResult::invalid(metric, e.to_string())
        }
    }
}

/// Run a metric by its report name. Unknown names are a caller bug and are
/// returned as `ScoreError::UnknownMetric`.
pub async fn run_named(name: &str, ctx: &MetricContext) -> ScoreResult<MetricResult> {
    let metric = name.parse::<MetricName>()?;
    Ok(run(metric, ctx).await)
}
