//! GitHub API client wrapper
//!
//! Bundles the Octocrab client, the npm registry HTTP client and the clone
//! workspace behind one cheap-to-clone handle that implements
//! [`RepositorySource`](crate::scoring::RepositorySource).
//!
//! # Examples
//!
//! ```rust,no_run
//! use netscore::{GitHubClient, RunConfig, Scorer};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Arc::new(RunConfig::from_env()?);
//!     let gh = GitHubClient::from_config(config.clone())?;
//!
//!     let scorer = Scorer::new(Arc::new(gh), config);
//!     if let Some(report) = scorer.score("https://github.com/lodash/lodash").await? {
//!         println!("{}", serde_json::to_string(&report)?);
//!     }
//!
//!     Ok(())
//! }
//! ```

use crate::config::RunConfig;
use crate::github::clone_repository::CloneWorkspace;
use crate::github::error::{FetchError, FetchResult};
use octocrab::Octocrab;
use std::sync::Arc;

mod source;

/// User agent sent to the npm registry.
pub(crate) const USER_AGENT: &str = concat!("netscore/", env!("CARGO_PKG_VERSION"));

/// GitHub API client wrapper that encapsulates Octocrab.
///
/// Cloning is cheap (Arc clone).
#[derive(Clone)]
pub struct GitHubClient {
    inner: Arc<Octocrab>,
    http: reqwest::Client,
    workspace: Arc<CloneWorkspace>,
    config: Arc<RunConfig>,
}

impl GitHubClient {
    /// Create a new client builder
    #[must_use]
    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::new()
    }

    /// Convenience: token and API base taken from `config`.
    pub fn from_config(config: Arc<RunConfig>) -> FetchResult<Self> {
        let mut builder = Self::builder();
        if let Some(token) = &config.github_token {
            builder = builder.personal_token(token.clone());
        }
        if let Some(uri) = &config.github_api_base {
            builder = builder.base_uri(uri.clone());
        }
        builder.config(config).build()
    }

    /// Get inner Octocrab client
    #[must_use]
    pub fn inner(&self) -> &Arc<Octocrab> {
        &self.inner
    }

    #[must_use]
    pub fn config(&self) -> &Arc<RunConfig> {
        &self.config
    }
}

/// Builder for creating `GitHubClient`
pub struct GitHubClientBuilder {
    token: Option<String>,
    base_uri: Option<String>,
    config: Option<Arc<RunConfig>>,
}

impl GitHubClientBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            token: None,
            base_uri: None,
            config: None,
        }
    }

    /// Set personal access token for authentication
    #[must_use]
    pub fn personal_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set base URI (for GitHub Enterprise)
    #[must_use]
    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = Some(uri.into());
        self
    }

    /// Run configuration; defaults to `RunConfig::default()`.
    #[must_use]
    pub fn config(mut self, config: Arc<RunConfig>) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the `GitHubClient`
    pub fn build(self) -> FetchResult<GitHubClient> {
        let config = self.config.unwrap_or_default();
        let mut builder = Octocrab::builder();

        if let Some(token) = self.token {
            builder = builder.personal_token(token);
        }

        if let Some(uri) = self.base_uri {
            builder = builder
                .base_uri(&uri)
                .map_err(|e| FetchError::InvalidInput(format!("GitHub API base {uri}: {e}")))?;
        }

        let octocrab = builder
            .build()
            .map_err(|e| FetchError::Api(format!("Client setup failed: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(config.api_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(GitHubClient {
            inner: Arc::new(octocrab),
            http,
            workspace: Arc::new(CloneWorkspace::new(&config)?),
            config,
        })
    }
}

impl Default for GitHubClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
