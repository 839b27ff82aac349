//! License presence

use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use std::path::Path;

use crate::github::helpers::check_file_size;
use crate::scoring::snapshot::license_field_present;
use crate::scoring::types::MetricError;

use super::MetricContext;

/// Look for a license in a working tree.
///
/// Checked in order: a `LICENSE` file at the root, a `license` field in
/// `package.json`, a `# License` heading (any level) in `README.md`. Any
/// read or parse failure counts as "not found".
#[must_use]
pub fn detect_license(root: &Path, max_file_size: usize) -> bool {
    lazy_static! {
        static ref LICENSE_HEADING_RE: Result<Regex, regex::Error> =
            Regex::new(r"(?m)^(#+)\s*License\b");
    }

    if root.join("LICENSE").is_file() {
        return true;
    }

    let manifest = root.join("package.json");
    if manifest.is_file()
        && check_file_size(&manifest, max_file_size).is_ok()
        && let Ok(content) = std::fs::read_to_string(&manifest)
        && let Ok(value) = serde_json::from_str::<serde_json::Value>(&content)
        && license_field_present(value.get("license"))
    {
        return true;
    }

    let readme = root.join("README.md");
    if let Err(e) = check_file_size(&readme, max_file_size) {
        debug!("README.md not inspected for a license heading: {e}");
        return false;
    }
    let Ok(content) = std::fs::read_to_string(&readme) else {
        return false;
    };
    match LICENSE_HEADING_RE.as_ref() {
        Ok(re) => re.is_match(&content),
        Err(_) => false,
    }
}

pub(crate) async fn measure(ctx: &MetricContext) -> Result<f64, MetricError> {
    let Some(root) = ctx.workspace.as_deref() else {
        warn!(
            "No working tree for {}, reporting no license",
            ctx.snapshot.identity.full_name()
        );
        return Ok(0.0);
    };

    Ok(if detect_license(root, ctx.config.max_file_size) {
        1.0
    } else {
        0.0
    })
}
