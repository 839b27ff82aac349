//! Source line counting over a working tree.

use crate::github::error::{FetchError, FetchResult};
use crate::github::helpers::{SOURCE_EXTENSIONS, check_file_size, is_hidden, is_vendor_dir};
use log::warn;
use std::path::Path;
use walkdir::WalkDir;

/// Total lines of every source file under `root`.
///
/// Hidden and vendored directories are skipped, as are files larger than
/// `max_file_size` and files that are not UTF-8.
pub fn count_source_lines(root: &Path, max_file_size: usize) -> FetchResult<u64> {
    if !root.is_dir() {
        return Err(FetchError::NotFound(format!(
            "working tree {}",
            root.display()
        )));
    }

    let mut total_lines = 0u64;
    for entry in WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_hidden(e) && !is_vendor_dir(e))
        .filter_map(std::result::Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        if !SOURCE_EXTENSIONS.contains(&ext) {
            continue;
        }

        if let Err(e) = check_file_size(path, max_file_size) {
            warn!("Source file skipped: {e}");
            continue;
        }

        if let Ok(content) = std::fs::read_to_string(path) {
            total_lines += content.lines().count() as u64;
        }
    }

    Ok(total_lines)
}
