//! Pre-fetched repository data shared by every metric of a run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Which repository is being scored and how the user named it.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct RepoIdentity {
    pub owner: String,
    pub repo: String,
    /// Always `https://github.com/<owner>/<repo>`.
    pub canonical_url: String,
    /// The URL exactly as it appeared in the input.
    pub input_url: String,
}

impl RepoIdentity {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        input_url: impl Into<String>,
    ) -> Self {
        let (owner, repo) = (owner.into(), repo.into());
        Self {
            canonical_url: format!("https://github.com/{owner}/{repo}"),
            owner,
            repo,
            input_url: input_url.into(),
        }
    }

    /// `owner/repo`
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Immutable bundle handed to every metric.
///
/// `data` is `None` when the GraphQL fetch failed; metrics that need it
/// report themselves invalid.
#[derive(Clone, Debug, PartialEq)]
pub struct RepositorySnapshot {
    pub identity: RepoIdentity,
    pub data: Option<RepositoryData>,
}

/// Parsed GraphQL repository payload
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RepositoryData {
    pub license_info: Option<LicenseInfo>,
    /// README text keyed by candidate file name (`README.md`, ...).
    pub readme: HashMap<String, String>,
    /// Examples directory entries keyed by directory name.
    pub examples: HashMap<String, Vec<String>>,
    pub open_issues: Option<ItemConnection>,
    pub closed_issues: Option<ItemConnection>,
    pub pull_requests: Option<ItemConnection>,
    pub is_archived: bool,
    pub disk_usage_kb: Option<u64>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LicenseInfo {
    pub key: Option<String>,
    pub name: Option<String>,
    pub spdx_id: Option<String>,
}

/// A page of issues or pull requests plus the repository-wide total.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemConnection {
    pub total_count: u64,
    #[serde(default)]
    pub nodes: Vec<ItemNode>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemNode {
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub closed: bool,
}

/// One row of the contributor statistics endpoint.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ContributorActivity {
    pub total_commits: u64,
    pub author_login: Option<String>,
}

/// Dependency tables and license field of a `package.json`.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub peer_dependencies: BTreeMap<String, String>,
    /// String in modern manifests, `{type, url}` in legacy ones.
    #[serde(default)]
    pub license: Option<serde_json::Value>,
}

impl PackageManifest {
    /// Whether the manifest declares any license at all.
    #[must_use]
    pub fn declares_license(&self) -> bool {
        license_field_present(self.license.as_ref())
    }

    /// All specifiers across the three tables; later tables win on name clashes.
    #[must_use]
    pub fn merged_dependencies(&self) -> BTreeMap<&str, &str> {
        self.dependencies
            .iter()
            .chain(&self.dev_dependencies)
            .chain(&self.peer_dependencies)
            .map(|(name, spec)| (name.as_str(), spec.as_str()))
            .collect()
    }
}

/// A `license` value counts when it is a non-empty string or a legacy
/// object with a non-empty `type`.
pub(crate) fn license_field_present(value: Option<&serde_json::Value>) -> bool {
    match value {
        Some(serde_json::Value::String(s)) => !s.trim().is_empty(),
        Some(serde_json::Value::Object(o)) => o
            .get("type")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|t| !t.trim().is_empty()),
        _ => false,
    }
}
