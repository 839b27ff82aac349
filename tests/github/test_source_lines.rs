//! Tests for source line counting over a working tree.

use netscore::github::count_source_lines;
use std::fs;

const MAX: usize = 10_485_760;

#[test]
fn test_counts_source_files_only() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("src/lib")).unwrap();
    fs::write(root.join("index.js"), "a\nb\nc\n").unwrap();
    fs::write(root.join("src/lib/util.ts"), "x\ny\n").unwrap();
    fs::write(root.join("README.md"), "one\ntwo\nthree\nfour\n").unwrap();

    assert_eq!(count_source_lines(root, MAX).unwrap(), 5);
}

#[test]
fn test_skips_hidden_and_vendored() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    for skipped in [".git", "node_modules/left-pad", "vendor"] {
        fs::create_dir_all(root.join(skipped)).unwrap();
        fs::write(root.join(skipped).join("index.js"), "1\n2\n3\n").unwrap();
    }
    fs::write(root.join("main.rs"), "fn main() {}\n").unwrap();

    assert_eq!(count_source_lines(root, MAX).unwrap(), 1);
}

#[test]
fn test_skips_oversized_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("big.py"), "x = 1\n".repeat(100)).unwrap();
    fs::write(dir.path().join("small.py"), "y\n").unwrap();

    assert_eq!(count_source_lines(dir.path(), 64).unwrap(), 1);
}

#[test]
fn test_missing_tree_is_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(count_source_lines(&dir.path().join("absent"), MAX).is_err());
}
