//! Dependency-version pinning ("good pinning practice")

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::github::util::join_task;
use crate::scoring::snapshot::PackageManifest;
use crate::scoring::types::MetricError;

use super::MetricContext;

lazy_static! {
    /// Specifier shapes that pin at least a major.minor line to a full version.
    static ref PINNED_RES: Result<Vec<Regex>, regex::Error> = [
        r"^\d+\.\d+\.\d+$",
        r"^\d+\.\d+\.[xX*]$",
        r"^~\d+\.\d+(\.\d+)?$",
        r"^\^\d+\.\d+\.\d+$",
        r"^(>=|<=|>|<)\s*\d+\.\d+\.\d+$",
        r"^\d+\.\d+\.\d+\s+-\s+\d+\.\d+\.\d+$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern))
    .collect();
}

/// Whether a version specifier pins its dependency.
///
/// Exact versions, minor wildcards, tilde ranges, carets on a full version,
/// single comparators on a full version and explicit hyphen ranges are
/// pinned. Bare wildcards, tags such as `latest` and `v`-prefixed versions
/// are not.
#[must_use]
pub fn is_version_pinned(spec: &str) -> bool {
    let spec = spec.trim();
    match PINNED_RES.as_ref() {
        Ok(patterns) => patterns.iter().any(|re| re.is_match(spec)),
        Err(_) => false,
    }
}

/// Fraction of pinned specifiers; 1.0 when there is nothing to pin.
#[must_use]
pub fn pinning_score(manifest: Option<&PackageManifest>) -> f64 {
    let Some(manifest) = manifest else {
        return 1.0;
    };
    let deps = manifest.merged_dependencies();
    if deps.is_empty() {
        return 1.0;
    }

    let pinned = deps.values().filter(|spec| is_version_pinned(spec)).count();
    pinned as f64 / deps.len() as f64
}

pub(crate) async fn measure(ctx: &MetricContext) -> Result<f64, MetricError> {
    let manifest = join_task(ctx.source.fetch_package_manifest(ctx.owner(), ctx.repo())).await?;
    if manifest.is_none() {
        debug!(
            "No package.json in {}, nothing to pin",
            ctx.snapshot.identity.full_name()
        );
    }
    Ok(pinning_score(manifest.as_ref()))
}
