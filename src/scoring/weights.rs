//! Net score weights, validity gate and weighted sum

use std::collections::BTreeMap;
use std::time::Instant;

use super::types::{MetricName, MetricResult, NetScore, ScoreError, ScoreResult};

/// Weight of each metric in the net score. Sums to 1.0.
///
/// The summation always walks this table in order so repeated runs produce
/// bit-identical net scores.
pub const WEIGHTS: [(MetricName, f64); 7] = [
    (MetricName::BusFactor, 0.20),
    (MetricName::Correctness, 0.25),
    (MetricName::RampUp, 0.15),
    (MetricName::ResponsiveMaintainer, 0.10),
    (MetricName::License, 0.05),
    (MetricName::GoodPinningPractice, 0.10),
    (MetricName::PullRequest, 0.10),
];

/// Weight assigned to `metric`.
#[must_use]
pub fn weight(metric: MetricName) -> f64 {
    WEIGHTS
        .iter()
        .find(|(m, _)| *m == metric)
        .map_or(0.0, |(_, w)| *w)
}

/// False iff any weighted metric is missing or invalid.
#[must_use]
pub fn is_valid(results: &BTreeMap<MetricName, MetricResult>) -> bool {
    WEIGHTS
        .iter()
        .all(|(metric, _)| results.get(metric).is_some_and(MetricResult::is_valid))
}

/// Weighted sum over the fixed table.
pub fn aggregate(scores: &BTreeMap<MetricName, f64>) -> ScoreResult<NetScore> {
    let start = Instant::now();
    let mut score = 0.0;
    for (metric, w) in WEIGHTS {
        let value = scores.get(&metric).ok_or(ScoreError::MissingMetric(metric))?;
        score += w * value;
    }
    Ok(NetScore {
        score,
        latency: start.elapsed(),
    })
}
