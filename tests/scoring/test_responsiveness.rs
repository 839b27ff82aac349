//! Tests for maintainer responsiveness scoring.

use super::common::{FakeSource, assert_close, connection, context, node, now, sample_data};
use chrono::{Duration, Months};
use netscore::MetricName;
use netscore::scoring::RepositoryData;
use netscore::scoring::metrics::responsiveness_score;
use netscore::scoring::runner;

fn windowed_data() -> RepositoryData {
    let recent = now() - Duration::days(3);
    let old = now() - Duration::days(90);
    RepositoryData {
        pull_requests: Some(connection(
            3,
            vec![node(recent, true), node(recent, false), node(old, true)],
        )),
        open_issues: Some(connection(2, vec![node(recent, false), node(old, false)])),
        closed_issues: Some(connection(
            3,
            vec![node(recent, true), node(recent, true), node(recent, true)],
        )),
        ..RepositoryData::default()
    }
}

fn cutoff() -> chrono::DateTime<chrono::Utc> {
    now().checked_sub_months(Months::new(1)).unwrap()
}

#[test]
fn test_recent_close_ratios() {
    // issues 3/4, pull requests 1/2
    let score = responsiveness_score(&windowed_data(), cutoff()).unwrap();
    assert_close(score, 0.625);
}

#[test]
fn test_archived_scores_zero() {
    let mut data = windowed_data();
    data.is_archived = true;
    assert_close(responsiveness_score(&data, cutoff()).unwrap(), 0.0);
}

#[test]
fn test_nothing_recent_scores_zero() {
    let old = now() - Duration::days(400);
    let data = RepositoryData {
        pull_requests: Some(connection(1, vec![node(old, true)])),
        open_issues: Some(connection(0, Vec::new())),
        closed_issues: Some(connection(1, vec![node(old, true)])),
        ..RepositoryData::default()
    };
    assert_close(responsiveness_score(&data, cutoff()).unwrap(), 0.0);
}

#[test]
fn test_item_at_cutoff_counts() {
    let data = RepositoryData {
        pull_requests: Some(connection(1, vec![node(cutoff(), true)])),
        open_issues: Some(connection(0, Vec::new())),
        closed_issues: Some(connection(0, Vec::new())),
        ..RepositoryData::default()
    };
    assert_close(responsiveness_score(&data, cutoff()).unwrap(), 0.5);
}

#[test]
fn test_missing_pull_requests_is_error() {
    let mut data = windowed_data();
    data.pull_requests = None;
    assert!(responsiveness_score(&data, cutoff()).is_err());
}

#[tokio::test]
async fn test_window_is_measured_from_context_clock() {
    let ctx = context(FakeSource::default(), Some(windowed_data()), None);
    let result = runner::run(MetricName::ResponsiveMaintainer, &ctx).await;
    assert_close(result.score().unwrap(), 0.625);
}

#[tokio::test]
async fn test_missing_snapshot_is_invalid() {
    let ctx = context(FakeSource::default(), None, None);
    let result = runner::run(MetricName::ResponsiveMaintainer, &ctx).await;
    assert!(!result.is_valid());

    // Sample data is all recent, so it is scored
    let ctx = context(FakeSource::default(), Some(sample_data()), None);
    assert!(runner::run(MetricName::ResponsiveMaintainer, &ctx).await.is_valid());
}
