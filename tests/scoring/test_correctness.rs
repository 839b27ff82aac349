//! Tests for issue resolution scoring.

use super::common::{FakeSource, assert_close, connection, context, sample_data};
use netscore::scoring::metrics::correctness_score;
use netscore::scoring::runner;
use netscore::{MetricName, MetricOutcome};

#[test]
fn test_closed_share() {
    assert_close(correctness_score(1, 3), 0.75);
    assert_close(correctness_score(4, 0), 0.0);
}

#[test]
fn test_no_issues_scores_one() {
    assert_close(correctness_score(0, 0), 1.0);
}

#[tokio::test]
async fn test_uses_total_counts() {
    // Totals, not the page of nodes, drive the ratio
    let mut data = sample_data();
    data.open_issues = Some(connection(10, Vec::new()));
    data.closed_issues = Some(connection(30, Vec::new()));

    let ctx = context(FakeSource::default(), Some(data), None);
    let result = runner::run(MetricName::Correctness, &ctx).await;
    assert_eq!(result.outcome, MetricOutcome::Score(0.75));
}

#[tokio::test]
async fn test_missing_snapshot_is_invalid() {
    let ctx = context(FakeSource::default(), None, None);
    let result = runner::run(MetricName::Correctness, &ctx).await;
    assert!(!result.is_valid());
    assert_eq!(result.latency, std::time::Duration::ZERO);
}

#[tokio::test]
async fn test_missing_closed_total_is_invalid() {
    let mut data = sample_data();
    data.closed_issues = None;
    let ctx = context(FakeSource::default(), Some(data), None);
    assert!(!runner::run(MetricName::Correctness, &ctx).await.is_valid());
}
