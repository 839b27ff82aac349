//! Tests for `package.json` parsing.

use netscore::github::parse_package_manifest;

#[test]
fn test_dependency_tables() {
    let manifest = parse_package_manifest(
        r#"{
            "name": "widget",
            "dependencies": {"lodash": "^4.17.21"},
            "devDependencies": {"jest": "29.7.0", "lodash": "4.17.21"},
            "peerDependencies": {"react": ">=18.0.0"},
            "license": "MIT"
        }"#,
    )
    .unwrap();

    assert_eq!(manifest.dependencies.len(), 1);
    assert_eq!(manifest.dev_dependencies.len(), 2);
    assert!(manifest.declares_license());

    let merged = manifest.merged_dependencies();
    assert_eq!(merged.len(), 3);
    assert_eq!(merged.get("lodash"), Some(&"4.17.21"));
}

#[test]
fn test_missing_tables_default_empty() {
    let manifest = parse_package_manifest(r#"{"name": "bare"}"#).unwrap();
    assert!(manifest.merged_dependencies().is_empty());
    assert!(!manifest.declares_license());
}

#[test]
fn test_legacy_license_object() {
    let manifest =
        parse_package_manifest(r#"{"license": {"type": "MIT", "url": "https://x.org"}}"#).unwrap();
    assert!(manifest.declares_license());
}

#[test]
fn test_malformed_manifest() {
    assert!(parse_package_manifest("{ not json").is_err());
    assert!(parse_package_manifest(r#"{"dependencies": ["lodash"]}"#).is_err());
}
