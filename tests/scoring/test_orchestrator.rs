//! Tests for metric fan-out, the validity gate and the URL pipeline.

use super::common::{FakeSource, assert_close, config, contributors, healthy_source, identity};
use futures::StreamExt;
use netscore::scoring::metrics::bus_factor_score;
use netscore::scoring::runner;
use netscore::{
    DispatchMode, MetricContext, MetricName, MetricResult, Orchestrator, RepositorySnapshot,
    RunConfig, ScoreError, ScoreReport, Scorer,
};
use std::collections::BTreeMap;
use std::fs;
use std::sync::Arc;
use std::time::Duration;

fn licensed_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("LICENSE"), "MIT").unwrap();
    dir
}

fn snapshot(source: &FakeSource) -> Arc<RepositorySnapshot> {
    Arc::new(RepositorySnapshot {
        identity: identity(),
        data: source.snapshot_data.clone(),
    })
}

fn expected_net_score() -> f64 {
    let bus = bus_factor_score(&contributors(&[1, 2, 10])).unwrap();
    0.20 * bus + 0.25 * 0.75 + 0.15 * 0.9 + 0.10 * 0.5 + 0.05 * 1.0 + 0.10 * 1.0 + 0.10 * 0.5
}

fn all_valid() -> BTreeMap<MetricName, MetricResult> {
    MetricName::ALL
        .into_iter()
        .map(|m| (m, MetricResult::valid(m, 1.0, Duration::from_millis(5))))
        .collect()
}

#[tokio::test]
async fn test_scores_every_metric() {
    let tree = licensed_tree();
    let source = Arc::new(healthy_source(tree.path().to_path_buf()));
    let orchestrator = Orchestrator::new(source.clone(), config());

    let report = orchestrator
        .calculate_metrics(snapshot(&source))
        .await
        .unwrap();

    assert_eq!(report.url, "https://github.com/acme/widget");
    assert_close(report.correctness, 0.75);
    assert_close(report.ramp_up, 0.9);
    assert_close(report.responsive_maintainer, 0.5);
    assert_close(report.license, 1.0);
    assert_close(report.good_pinning_practice, 1.0);
    assert_close(report.pull_request, 0.5);
    assert_close(report.net_score, expected_net_score());
    assert!((0.0..=1.0).contains(&report.net_score));
}

#[tokio::test]
async fn test_clones_once_per_run() {
    let tree = licensed_tree();
    let source = Arc::new(healthy_source(tree.path().to_path_buf()));
    let orchestrator = Orchestrator::new(source.clone(), config());

    assert!(orchestrator.calculate_metrics(snapshot(&source)).await.is_some());
    assert_eq!(source.clone_calls(), 1);
}

#[tokio::test]
async fn test_sequential_matches_concurrent() {
    let tree = licensed_tree();
    let source = Arc::new(healthy_source(tree.path().to_path_buf()));

    let concurrent = Orchestrator::new(source.clone(), config())
        .calculate_metrics(snapshot(&source))
        .await
        .unwrap();
    let sequential_config = Arc::new(RunConfig {
        dispatch: DispatchMode::Sequential,
        ..RunConfig::default()
    });
    let sequential = Orchestrator::new(source.clone(), sequential_config)
        .calculate_metrics(snapshot(&source))
        .await
        .unwrap();

    assert_eq!(concurrent.net_score.to_bits(), sequential.net_score.to_bits());
    for metric in MetricName::ALL {
        assert_eq!(concurrent.metric(metric).0, sequential.metric(metric).0);
    }
}

#[tokio::test]
async fn test_oversized_repository_skips_clone() {
    let tree = licensed_tree();
    let mut fake = healthy_source(tree.path().to_path_buf());
    if let Some(data) = fake.snapshot_data.as_mut() {
        data.disk_usage_kb = Some(2 * 1024 * 1024);
    }
    let source = Arc::new(fake);

    let report = Orchestrator::new(source.clone(), config())
        .calculate_metrics(snapshot(&source))
        .await
        .unwrap();

    assert_eq!(source.clone_calls(), 0);
    assert_close(report.license, 0.0);
    assert_close(report.pull_request, 0.0);
}

#[tokio::test]
async fn test_clone_failure_still_reports() {
    let tree = licensed_tree();
    let mut fake = healthy_source(tree.path().to_path_buf());
    fake.workspace = None;
    let source = Arc::new(fake);

    let report = Orchestrator::new(source.clone(), config())
        .calculate_metrics(snapshot(&source))
        .await
        .unwrap();

    assert_close(report.license, 0.0);
    assert_close(report.pull_request, 0.0);
}

#[tokio::test]
async fn test_missing_snapshot_data_is_gated() {
    let tree = licensed_tree();
    let source = Arc::new(healthy_source(tree.path().to_path_buf()));
    let empty = Arc::new(RepositorySnapshot {
        identity: identity(),
        data: None,
    });

    let report = Orchestrator::new(source.clone(), config())
        .calculate_metrics(empty)
        .await;
    assert!(report.is_none());
    assert_eq!(source.clone_calls(), 0);
}

async fn gated_by(break_source: impl FnOnce(&mut FakeSource)) -> bool {
    let tree = licensed_tree();
    let mut fake = healthy_source(tree.path().to_path_buf());
    break_source(&mut fake);
    let source = Arc::new(fake);

    Orchestrator::new(source.clone(), config())
        .calculate_metrics(snapshot(&source))
        .await
        .is_none()
}

#[tokio::test]
async fn test_failing_metric_gates_dispatched_run() {
    assert!(!gated_by(|_| {}).await);

    // BusFactor: stats endpoint fails
    assert!(gated_by(|s| s.contributors = None).await);
    // BusFactor: no commits at all
    assert!(gated_by(|s| s.contributors = Some(contributors(&[0, 0]))).await);
    // Correctness: closed issue total absent
    assert!(
        gated_by(|s| {
            if let Some(data) = s.snapshot_data.as_mut() {
                data.closed_issues = None;
            }
        })
        .await
    );
    // ResponsiveMaintainer: pull request nodes absent
    assert!(
        gated_by(|s| {
            if let Some(data) = s.snapshot_data.as_mut() {
                data.pull_requests = None;
            }
        })
        .await
    );
    // GoodPinningPractice: package.json fetch fails
    assert!(gated_by(|s| s.manifest = None).await);
}

#[tokio::test]
async fn test_fail_safe_metrics_do_not_gate() {
    // License and PullRequest fall back to 0 instead of going invalid
    assert!(!gated_by(|s| s.workspace = None).await);
    assert!(!gated_by(|s| s.pull_numbers = None).await);
    assert!(!gated_by(|s| s.source_lines = None).await);
}

#[test]
fn test_any_invalid_metric_gates_report() {
    for metric in MetricName::ALL {
        let mut results = all_valid();
        results.insert(metric, MetricResult::invalid(metric, "forced"));
        assert!(
            Orchestrator::assemble(&identity(), &results).is_none(),
            "{metric} should gate the report"
        );

        results.remove(&metric);
        assert!(Orchestrator::assemble(&identity(), &results).is_none());
    }
}

#[test]
fn test_report_field_names() {
    let report: ScoreReport = Orchestrator::assemble(&identity(), &all_valid()).unwrap();
    assert_close(report.net_score, 1.0);
    assert_close(report.bus_factor_latency, 0.005);

    let value = serde_json::to_value(&report).unwrap();
    for key in [
        "URL",
        "NetScore",
        "NetScore_Latency",
        "RampUp",
        "RampUp_Latency",
        "Correctness",
        "BusFactor",
        "ResponsiveMaintainer",
        "License",
        "GoodPinningPractice",
        "PullRequest_Latency",
    ] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
}

#[tokio::test]
async fn test_run_named() {
    let tree = licensed_tree();
    let source = healthy_source(tree.path().to_path_buf());
    let ctx = MetricContext {
        snapshot: snapshot(&source),
        source: Arc::new(source),
        workspace: None,
        config: config(),
        now: super::common::now(),
    };

    let result = runner::run_named("RampUp", &ctx).await.unwrap();
    assert_eq!(result.metric, MetricName::RampUp);

    let unknown = runner::run_named("Popularity", &ctx).await;
    assert!(matches!(unknown, Err(ScoreError::UnknownMetric(name)) if name == "Popularity"));
}

#[tokio::test]
async fn test_scorer_single_url() {
    let tree = licensed_tree();
    let scorer = Scorer::new(
        Arc::new(healthy_source(tree.path().to_path_buf())),
        config(),
    );

    let report = scorer
        .score("git+https://github.com/acme/widget.git")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(report.url, "git+https://github.com/acme/widget.git");
    assert_close(report.net_score, expected_net_score());
}

#[tokio::test]
async fn test_scorer_snapshot_failure_is_gated() {
    let tree = licensed_tree();
    let mut fake = healthy_source(tree.path().to_path_buf());
    fake.snapshot_data = None;
    let scorer = Scorer::new(Arc::new(fake), config());

    let outcome = scorer.score("https://github.com/acme/widget").await.unwrap();
    assert!(outcome.is_none());
}

#[tokio::test]
async fn test_score_all_keeps_input_order() {
    let tree = licensed_tree();
    let scorer = Scorer::new(
        Arc::new(healthy_source(tree.path().to_path_buf())),
        config(),
    );
    let urls = vec![
        "https://github.com/acme/widget".to_string(),
        "not a repository".to_string(),
        "https://github.com/acme/gadget".to_string(),
    ];

    let results: Vec<_> = scorer.score_all(urls.clone()).collect().await;
    let seen: Vec<&String> = results.iter().map(|(url, _)| url).collect();
    assert_eq!(seen, urls.iter().collect::<Vec<_>>());

    assert!(matches!(results[0].1, Ok(Some(_))));
    assert!(matches!(results[1].1, Err(ScoreError::Fetch(_))));
    assert!(matches!(results[2].1, Ok(Some(_))));
}
