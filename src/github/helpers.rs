//! Helper utility functions for working-tree scans

use std::path::Path;

/// Extensions counted as source code.
pub(crate) const SOURCE_EXTENSIONS: [&str; 24] = [
    "rs", "py", "js", "jsx", "mjs", "cjs", "ts", "tsx", "go", "java", "c", "h", "cpp", "cc",
    "cxx", "hpp", "rb", "php", "swift", "kt", "kts", "cs", "sh", "bash",
];

/// Helper function to check if entry is hidden
pub(crate) fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|s| s.starts_with('.'))
}

/// Helper function to check if entry is `vendor/node_modules`
pub(crate) fn is_vendor_dir(entry: &walkdir::DirEntry) -> bool {
    let name = entry.file_name().to_str().unwrap_or("");
    name == "node_modules" || name == "vendor" || name == "target"
}

/// Helper function to check if a file's size is within the allowed limit
pub(crate) fn check_file_size(path: &Path, max_size: usize) -> Result<(), String> {
    let metadata =
        std::fs::metadata(path).map_err(|e| format!("Failed to get file metadata: {e}"))?;

    if metadata.len() > max_size as u64 {
        return Err(format!(
            "File too large: {} bytes (max: {} bytes)",
            metadata.len(),
            max_size
        ));
    }

    Ok(())
}
