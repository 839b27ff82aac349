//! Input URL resolution to a GitHub repository.

use crate::github::error::{FetchError, FetchResult};
use crate::github::util::spawn_task;
use crate::runtime::AsyncTask;
use crate::scoring::RepoIdentity;
use log::debug;
use reqwest::{Client, StatusCode, Url};

/// `(owner, repo)` of a GitHub web, git or shorthand URL.
///
/// Accepts `https://github.com/o/r[.git][/...]`, `git+https://...`,
/// `git://...`, `git+ssh://git@github.com/o/r.git`, `git@github.com:o/r.git`,
/// `github:o/r` and bare `o/r`.
#[must_use]
pub fn parse_github_url(url: &str) -> Option<(String, String)> {
    let url = url.trim();
    let url = url.strip_prefix("git+").unwrap_or(url);

    if let Some(short) = url.strip_prefix("github:") {
        return split_owner_repo(short);
    }
    if let Some(rest) = url.strip_prefix("git@github.com:") {
        return split_owner_repo(rest);
    }
    if !url.contains(':') && url.matches('/').count() == 1 {
        return split_owner_repo(url);
    }

    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    if host != "github.com" && host != "www.github.com" {
        return None;
    }
    let mut segments = parsed.path_segments()?;
    let owner = segments.next()?;
    let repo = segments.next()?;
    split_owner_repo(&format!("{owner}/{repo}"))
}

fn split_owner_repo(path: &str) -> Option<(String, String)> {
    let mut parts = path.trim_matches('/').splitn(3, '/');
    let owner = parts.next()?.trim();
    let repo = parts.next()?.trim();
    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    let repo = repo.split(['#', '?']).next().unwrap_or(repo);
    if owner.is_empty() || repo.is_empty() {
        return None;
    }
    Some((owner.to_string(), repo.to_string()))
}

/// Package name of an npmjs.com package page, including a `@scope/` prefix.
#[must_use]
pub fn parse_npm_package(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?;
    if host != "www.npmjs.com" && host != "npmjs.com" {
        return None;
    }
    let segments: Vec<&str> = parsed.path_segments()?.filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        ["package", scope, name, ..] if scope.starts_with('@') => Some(format!("{scope}/{name}")),
        ["package", name, ..] => Some((*name).to_string()),
        _ => None,
    }
}

/// Repository URL recorded in an npm registry document.
///
/// `repository` is either a string or an object with a `url` field.
#[must_use]
pub fn npm_repository_url(document: &serde_json::Value) -> Option<&str> {
    match document.get("repository")? {
        serde_json::Value::String(url) => Some(url.as_str()),
        serde_json::Value::Object(repo) => repo.get("url")?.as_str(),
        _ => None,
    }
}

fn registry_url(registry: &str, package: &str) -> String {
    // The registry wants a literal `@` and an escaped `/` for scoped names.
    let encoded = match package.strip_prefix('@') {
        Some(scoped) => format!("@{}", urlencoding::encode(scoped)),
        None => urlencoding::encode(package).into_owned(),
    };
    format!("{}/{encoded}", registry.trim_end_matches('/'))
}

/// Resolve a GitHub or npm URL to the GitHub repository behind it.
pub(crate) fn resolve_repository(
    http: Client,
    registry: String,
    input_url: impl Into<String>,
) -> AsyncTask<FetchResult<RepoIdentity>> {
    let input_url = input_url.into();
    spawn_task(async move {
        if let Some((owner, repo)) = parse_github_url(&input_url) {
            return Ok(RepoIdentity::new(owner, repo, input_url));
        }

        let package = parse_npm_package(&input_url).ok_or_else(|| {
            FetchError::InvalidInput(format!("Not a GitHub or npm package URL: {input_url}"))
        })?;

        let url = registry_url(&registry, &package);
        debug!("Resolving npm package {package} via {url}");
        let response = http.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(format!("npm package {package}")));
        }
        let document: serde_json::Value = response.error_for_status()?.json().await?;

        let repository = npm_repository_url(&document).ok_or_else(|| {
            FetchError::NotFound(format!("npm package {package} declares no repository"))
        })?;
        let (owner, repo) = parse_github_url(repository).ok_or_else(|| {
            FetchError::InvalidInput(format!(
                "npm package {package} is not hosted on GitHub: {repository}"
            ))
        })?;

        Ok(RepoIdentity::new(owner, repo, input_url))
    })
}
