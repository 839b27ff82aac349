//! Type definitions for metric scoring

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::github::FetchError;

/// Errors raised by the scoring core and its driver
#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Missing score for metric {0}")]
    MissingMetric(MetricName),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScoreResult<T> = Result<T, ScoreError>;

/// Why a single metric could not be computed
#[derive(Error, Debug)]
pub enum MetricError {
    #[error("Missing data: {0}")]
    MissingData(String),

    #[error("Malformed data: {0}")]
    Malformed(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// The closed set of metrics that make up a net score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MetricName {
    BusFactor,
    Correctness,
    RampUp,
    ResponsiveMaintainer,
    License,
    GoodPinningPractice,
    PullRequest,
}

impl MetricName {
    pub const ALL: [MetricName; 7] = [
        MetricName::BusFactor,
        MetricName::Correctness,
        MetricName::RampUp,
        MetricName::ResponsiveMaintainer,
        MetricName::License,
        MetricName::GoodPinningPractice,
        MetricName::PullRequest,
    ];

    /// Name used in report fields and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BusFactor => "BusFactor",
            Self::Correctness => "Correctness",
            Self::RampUp => "RampUp",
            Self::ResponsiveMaintainer => "ResponsiveMaintainer",
            Self::License => "License",
            Self::GoodPinningPractice => "GoodPinningPractice",
            Self::PullRequest => "PullRequest",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricName {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ScoreError::UnknownMetric(s.to_string()))
    }
}

/// Either a computed score or the reason it could not be computed.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricOutcome {
    Score(f64),
    Invalid(String),
}

/// Result of one metric run
#[derive(Debug, Clone, PartialEq)]
pub struct MetricResult {
    pub metric: MetricName,
    pub outcome: MetricOutcome,
    pub latency: Duration,
}

impl MetricResult {
    /// A computed score, clamped to [0,1]. Non-finite values are invalid.
    #[must_use]
    pub fn valid(metric: MetricName, score: f64, latency: Duration) -> Self {
        if !score.is_finite() {
            return Self::invalid(metric, format!("non-finite score {score}"));
        }
        Self {
            metric,
            outcome: MetricOutcome::Score(score.clamp(0.0, 1.0)),
            latency,
        }
    }

    #[must_use]
    pub fn invalid(metric: MetricName, reason: impl Into<String>) -> Self {
        Self {
            metric,
            outcome: MetricOutcome::Invalid(reason.into()),
            latency: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn score(&self) -> Option<f64> {
        match self.outcome {
            MetricOutcome::Score(s) => Some(s),
            MetricOutcome::Invalid(_) => None,
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self.outcome, MetricOutcome::Score(_))
    }
}

/// Weighted sum of the metric scores and the time spent summing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetScore {
    pub score: f64,
    pub latency: Duration,
}

/// Final per-package record, one NDJSON line per input URL.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ScoreReport {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "NetScore")]
    pub net_score: f64,
    #[serde(rename = "NetScore_Latency")]
    pub net_score_latency: f64,
    #[serde(rename = "RampUp")]
    pub ramp_up: f64,
    #[serde(rename = "RampUp_Latency")]
    pub ramp_up_latency: f64,
    #[serde(rename = "Correctness")]
    pub correctness: f64,
    #[serde(rename = "Correctness_Latency")]
    pub correctness_latency: f64,
    #[serde(rename = "BusFactor")]
    pub bus_factor: f64,
    #[serde(rename = "BusFactor_Latency")]
    pub bus_factor_latency: f64,
    #[serde(rename = "ResponsiveMaintainer")]
    pub responsive_maintainer: f64,
    #[serde(rename = "ResponsiveMaintainer_Latency")]
    pub responsive_maintainer_latency: f64,
    #[serde(rename = "License")]
    pub license: f64,
    #[serde(rename = "License_Latency")]
    pub license_latency: f64,
    #[serde(rename = "GoodPinningPractice")]
    pub good_pinning_practice: f64,
    #[serde(rename = "GoodPinningPractice_Latency")]
    pub good_pinning_practice_latency: f64,
    #[serde(rename = "PullRequest")]
    pub pull_request: f64,
    #[serde(rename = "PullRequest_Latency")]
    pub pull_request_latency: f64,
}

impl ScoreReport {
    /// Score and latency (seconds) recorded for `metric`.
    #[must_use]
    pub fn metric(&self, metric: MetricName) -> (f64, f64) {
        match metric {
            MetricName::BusFactor => (self.bus_factor, self.bus_factor_latency),
            MetricName::Correctness => (self.correctness, self.correctness_latency),
            MetricName::RampUp => (self.ramp_up, self.ramp_up_latency),
            MetricName::ResponsiveMaintainer => (
                self.responsive_maintainer,
                self.responsive_maintainer_latency,
            ),
            MetricName::License => (self.license, self.license_latency),
            MetricName::GoodPinningPractice => (
                self.good_pinning_practice,
                self.good_pinning_practice_latency,
            ),
            MetricName::PullRequest => (self.pull_request, self.pull_request_latency),
        }
    }
}
