//! Run-scoped configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::scoring::ScoreError;

/// How the orchestrator dispatches the seven metric runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// One worker task per metric, joined together.
    #[default]
    Concurrent,
    /// Metrics awaited one after another on the calling task.
    Sequential,
}

/// Verbosity selected through `LOG_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    #[default]
    Silent,
    Info,
    Debug,
}

impl LogLevel {
    /// Parse the numeric `LOG_LEVEL` convention (0, 1, 2).
    pub fn parse(value: &str) -> Result<Self, ScoreError> {
        match value.trim() {
            "" | "0" => Ok(Self::Silent),
            "1" => Ok(Self::Info),
            "2" => Ok(Self::Debug),
            other => Err(ScoreError::Config(format!(
                "LOG_LEVEL must be 0, 1 or 2, got '{other}'"
            ))),
        }
    }

    #[must_use]
    pub fn as_filter(self) -> log::LevelFilter {
        match self {
            Self::Silent => log::LevelFilter::Off,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
        }
    }
}

/// Immutable settings for one scoring run.
///
/// Read once at startup and shared by `Arc`; nothing below the driver reads
/// the process environment.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub github_token: Option<String>,
    pub log_level: LogLevel,
    pub log_file: Option<PathBuf>,
    /// Where clones are kept. `None` uses a private temp dir per client.
    pub clone_root: Option<PathBuf>,
    pub github_api_base: Option<String>,
    pub npm_registry: String,
    pub concurrency_limit: usize,
    pub api_timeout: Duration,
    pub clone_timeout: Duration,
    pub max_file_size: usize,
    pub max_repo_size: u64,
    /// Cap on pull requests summed by code review. `None` lists them all.
    pub max_review_pull_requests: Option<usize>,
    pub contributor_stats_attempts: u32,
    pub responsiveness_window_months: u32,
    pub clone_cache_capacity: usize,
    pub dispatch: DispatchMode,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            github_token: None,
            log_level: LogLevel::Silent,
            log_file: None,
            clone_root: None,
            github_api_base: None,
            npm_registry: "https://registry.npmjs.org".to_string(),
            concurrency_limit: 10,
            api_timeout: Duration::from_secs(10),
            clone_timeout: Duration::from_secs(120),
            max_file_size: 10_485_760,    // 10MB
            max_repo_size: 1_073_741_824, // 1GB
            max_review_pull_requests: None,
            contributor_stats_attempts: 3,
            responsiveness_window_months: 1,
            clone_cache_capacity: 64,
            dispatch: DispatchMode::Concurrent,
        }
    }
}

impl RunConfig {
    /// Build a configuration from the process environment.
    pub fn from_env() -> Result<Self, ScoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        config.github_token = non_empty("GITHUB_TOKEN");
        if let Some(level) = lookup("LOG_LEVEL") {
            config.log_level = LogLevel::parse(&level)?;
        }
        config.log_file = non_empty("LOG_FILE").map(PathBuf::from);
        config.clone_root = non_empty("NETSCORE_CLONE_DIR").map(PathBuf::from);
        config.github_api_base = non_empty("GITHUB_API_URL");
        if let Some(registry) = non_empty("NPM_REGISTRY_URL") {
            config.npm_registry = registry.trim_end_matches('/').to_string();
        }

        Ok(config)
    }
}
