//! GraphQL snapshot query and payload parsing
//!
//! README candidates and examples folders are requested as aliased `object`
//! lookups, one alias per candidate name. Parsing maps the aliases back to
//! file names so metrics can probe a plain name-keyed map.

use lazy_static::lazy_static;
use log::warn;
use serde::Deserialize;
use std::collections::HashMap;

use crate::github::error::{FetchError, FetchResult};
use crate::scoring::metrics::{EXAMPLES_DIRS, readme_candidates};
use crate::scoring::{
    ItemConnection, LicenseInfo, RepoIdentity, RepositoryData, RepositorySnapshot,
};

/// Nodes requested per issue/PR connection (GitHub maximum).
const PAGE_SIZE: u32 = 100;

lazy_static! {
    static ref SNAPSHOT_QUERY: String = build_snapshot_query();
}

/// GraphQL alias for a README candidate (`README.md` -> `readme_README_md`).
#[must_use]
pub fn readme_alias(file_name: &str) -> String {
    format!("readme_{}", sanitize(file_name))
}

/// GraphQL alias for an examples directory (`examples` -> `examples_examples`).
#[must_use]
pub fn examples_alias(dir_name: &str) -> String {
    format!("examples_{}", sanitize(dir_name))
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Query text taking `$owner` and `$name` variables.
#[must_use]
pub fn snapshot_query() -> &'static str {
    &SNAPSHOT_QUERY
}

fn build_snapshot_query() -> String {
    let connection = |alias: &str, field: &str, filter: &str| {
        format!(
            "    {alias}: {field}({filter}first: {PAGE_SIZE}, orderBy: {{field: CREATED_AT, direction: DESC}}) {{\n      totalCount\n      nodes {{ createdAt updatedAt closedAt closed }}\n    }}\n"
        )
    };

    let mut query = String::from(
        "query($owner: String!, $name: String!) {\n  repository(owner: $owner, name: $name) {\n    isArchived\n    diskUsage\n    licenseInfo { key name spdxId }\n",
    );
    query.push_str(&connection("openIssues", "issues", "states: OPEN, "));
    query.push_str(&connection("closedIssues", "issues", "states: CLOSED, "));
    query.push_str(&connection("pullRequests", "pullRequests", ""));

    for name in readme_candidates() {
        query.push_str(&format!(
            "    {}: object(expression: \"HEAD:{name}\") {{ ... on Blob {{ text }} }}\n",
            readme_alias(name)
        ));
    }
    for dir in EXAMPLES_DIRS {
        query.push_str(&format!(
            "    {}: object(expression: \"HEAD:{dir}\") {{ ... on Tree {{ entries {{ name }} }} }}\n",
            examples_alias(dir)
        ));
    }

    query.push_str("  }\n}\n");
    query
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<GraphQlData>,
    #[serde(default)]
    errors: Vec<GraphQlMessage>,
}

#[derive(Deserialize)]
struct GraphQlData {
    repository: Option<RepositoryPayload>,
}

#[derive(Deserialize)]
struct GraphQlMessage {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryPayload {
    #[serde(default)]
    is_archived: bool,
    disk_usage: Option<u64>,
    license_info: Option<LicenseInfo>,
    open_issues: Option<ItemConnection>,
    closed_issues: Option<ItemConnection>,
    pull_requests: Option<ItemConnection>,
    #[serde(flatten)]
    objects: HashMap<String, serde_json::Value>,
}

/// Turn a raw GraphQL response body into a snapshot.
///
/// Partial data with errors is kept (the errors are logged); a missing
/// repository is `NotFound`.
pub fn parse_snapshot_payload(
    identity: RepoIdentity,
    body: serde_json::Value,
) -> FetchResult<RepositorySnapshot> {
    let response: GraphQlResponse = serde_json::from_value(body)?;
    let messages = response
        .errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");

    let Some(repository) = response.data.and_then(|d| d.repository) else {
        if messages.is_empty() {
            return Err(FetchError::NotFound(identity.full_name()));
        }
        return Err(FetchError::GraphQl(messages));
    };
    if !messages.is_empty() {
        warn!(
            "GraphQL returned partial data for {}: {messages}",
            identity.full_name()
        );
    }

    let mut readme = HashMap::new();
    for name in readme_candidates() {
        if let Some(text) = repository
            .objects
            .get(&readme_alias(name))
            .and_then(|o| o.get("text"))
            .and_then(serde_json::Value::as_str)
        {
            readme.insert(name.clone(), text.to_string());
        }
    }

    let mut examples = HashMap::new();
    for dir in EXAMPLES_DIRS {
        if let Some(entries) = repository
            .objects
            .get(&examples_alias(dir))
            .and_then(|o| o.get("entries"))
            .and_then(serde_json::Value::as_array)
        {
            let names = entries
                .iter()
                .filter_map(|e| e.get("name").and_then(serde_json::Value::as_str))
                .map(str::to_string)
                .collect();
            examples.insert(dir.to_string(), names);
        }
    }

    Ok(RepositorySnapshot {
        identity,
        data: Some(RepositoryData {
            license_info: repository.license_info,
            readme,
            examples,
            open_issues: repository.open_issues,
            closed_issues: repository.closed_issues,
            pull_requests: repository.pull_requests,
            is_archived: repository.is_archived,
            disk_usage_kb: repository.disk_usage,
        }),
    })
}
