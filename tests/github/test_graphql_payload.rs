//! Tests for the snapshot query and GraphQL payload parsing.

use netscore::FetchError;
use netscore::github::graphql::{examples_alias, readme_alias};
use netscore::github::{parse_snapshot_payload, snapshot_query};
use netscore::scoring::RepoIdentity;
use serde_json::json;

fn identity() -> RepoIdentity {
    RepoIdentity::new("acme", "widget", "https://www.npmjs.com/package/widget")
}

#[test]
fn test_query_requests_every_candidate() {
    let query = snapshot_query();
    assert!(query.contains("repository(owner: $owner, name: $name)"));
    assert!(query.contains("isArchived"));
    assert!(query.contains("licenseInfo"));
    let readme = format!(
        "{}: object(expression: \"HEAD:README.md\")",
        readme_alias("README.md")
    );
    let examples = format!(
        "{}: object(expression: \"HEAD:Examples\")",
        examples_alias("Examples")
    );
    assert!(query.contains(&readme));
    assert!(query.contains(&examples));
    assert_eq!(query.matches("... on Blob").count(), 50);
    assert_eq!(query.matches("... on Tree").count(), 4);
}

#[test]
fn test_aliases_are_graphql_names() {
    assert_eq!(readme_alias("README.md"), "readme_README_md");
    assert_eq!(readme_alias("readme"), "readme_readme");
    assert_eq!(examples_alias("examples"), "examples_examples");
}

#[test]
fn test_parses_repository() {
    let body = json!({
        "data": {
            "repository": {
                "isArchived": false,
                "diskUsage": 2048,
                "licenseInfo": {"key": "mit", "name": "MIT License", "spdxId": "MIT"},
                "openIssues": {
                    "totalCount": 12,
                    "nodes": [{"createdAt": "2024-06-01T00:00:00Z", "updatedAt": null, "closedAt": null, "closed": false}]
                },
                "closedIssues": {"totalCount": 30, "nodes": []},
                "pullRequests": {
                    "totalCount": 1,
                    "nodes": [{"createdAt": "2024-05-20T10:00:00Z", "updatedAt": "2024-05-21T10:00:00Z", "closedAt": "2024-05-21T10:00:00Z", "closed": true}]
                },
                "readme_README_md": {"text": "# widget\n"},
                "readme_readme_rst": null,
                "examples_examples": {"entries": [{"name": "basic.js"}, {"name": "advanced.js"}]},
                "examples_Examples": null
            }
        }
    });

    let snapshot = parse_snapshot_payload(identity(), body).unwrap();
    assert_eq!(snapshot.identity.canonical_url, "https://github.com/acme/widget");

    let data = snapshot.data.unwrap();
    assert!(!data.is_archived);
    assert_eq!(data.disk_usage_kb, Some(2048));
    assert_eq!(data.license_info.and_then(|l| l.spdx_id).as_deref(), Some("MIT"));
    assert_eq!(data.open_issues.as_ref().map(|c| c.total_count), Some(12));
    assert_eq!(data.closed_issues.as_ref().map(|c| c.nodes.len()), Some(0));
    assert!(data.pull_requests.as_ref().unwrap().nodes[0].closed);
    assert_eq!(data.readme.get("README.md").map(String::as_str), Some("# widget\n"));
    assert!(!data.readme.contains_key("readme.rst"));
    assert_eq!(
        data.examples.get("examples"),
        Some(&vec!["basic.js".to_string(), "advanced.js".to_string()])
    );
    assert!(!data.examples.contains_key("Examples"));
}

#[test]
fn test_partial_data_is_kept() {
    let body = json!({
        "data": {"repository": {"isArchived": true}},
        "errors": [{"message": "Something went wrong while executing your query"}]
    });
    let data = parse_snapshot_payload(identity(), body).unwrap().data.unwrap();
    assert!(data.is_archived);
    assert!(data.open_issues.is_none());
}

#[test]
fn test_missing_repository() {
    let body = json!({"data": {"repository": null}});
    assert!(matches!(
        parse_snapshot_payload(identity(), body),
        Err(FetchError::NotFound(_))
    ));

    let body = json!({
        "data": null,
        "errors": [{"message": "Could not resolve to a Repository"}]
    });
    assert!(matches!(
        parse_snapshot_payload(identity(), body),
        Err(FetchError::GraphQl(msg)) if msg.contains("Could not resolve")
    ));
}
