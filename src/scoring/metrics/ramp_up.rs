//! Documentation quality ("ramp-up")

use lazy_static::lazy_static;

use crate::scoring::snapshot::RepositoryData;
use crate::scoring::types::MetricError;

use super::MetricContext;

/// Filename casings probed for a README.
pub const README_STEMS: [&str; 5] = ["README", "readme", "Readme", "ReadMe", "readMe"];

/// Extension styles probed for a README, in preference order.
pub const README_EXTENSIONS: [&str; 10] = [
    ".md",
    "",
    ".markdown",
    ".rst",
    ".txt",
    ".adoc",
    ".asciidoc",
    ".org",
    ".rdoc",
    ".textile",
];

/// Directory names probed for usage examples, in preference order.
pub const EXAMPLES_DIRS: [&str; 4] = ["examples", "Examples", "example", "Example"];

/// README lines above which a README counts as long.
const LONG_README_LINES: usize = 75;

/// Examples folder entries above which the folder counts as large.
const LARGE_EXAMPLES_ENTRIES: usize = 5;

lazy_static! {
    static ref README_CANDIDATES: Vec<String> = README_STEMS
        .iter()
        .flat_map(|stem| README_EXTENSIONS.iter().map(move |ext| format!("{stem}{ext}")))
        .collect();
}

/// All README file names, stem-major (`README.md`, `README`, `README.markdown`, ...).
#[must_use]
pub fn readme_candidates() -> &'static [String] {
    &README_CANDIDATES
}

/// First non-empty README among the candidates.
#[must_use]
pub fn find_readme(data: &RepositoryData) -> Option<&str> {
    readme_candidates()
        .iter()
        .filter_map(|name| data.readme.get(name))
        .map(String::as_str)
        .find(|text| !text.trim().is_empty())
}

/// Entries of the first examples folder that exists.
#[must_use]
pub fn find_examples(data: &RepositoryData) -> Option<&[String]> {
    EXAMPLES_DIRS
        .iter()
        .find_map(|dir| data.examples.get(*dir))
        .map(Vec::as_slice)
}

/// Decision table over README length, a "documentation" mention and the
/// examples folder.
///
/// Long READMEs that point elsewhere for docs score low; short,
/// self-contained ones score high. No README at all scores 0.9.
#[must_use]
pub fn ramp_up_score(readme: Option<&str>, examples: Option<&[String]>) -> f64 {
    let Some(readme) = readme else {
        return 0.9;
    };

    let lines = readme.lines().count();
    let mentions_docs = readme.contains("documentation");
    let examples_present = examples.is_some_and(|e| !e.is_empty());
    let examples_large = examples.is_some_and(|e| e.len() > LARGE_EXAMPLES_ENTRIES);

    if lines > LONG_README_LINES {
        return match (mentions_docs, examples_present) {
            (true, true) => 0.1,
            (true, false) | (false, true) => 0.2,
            (false, false) => 0.5,
        };
    }

    match (mentions_docs, examples_large) {
        (true, true) => 0.2,
        (true, false) => 0.3,
        (false, true) => 0.4,
        (false, false) => match lines {
            0..=5 => 0.9,
            6..=20 => 0.8,
            21..=35 => 0.7,
            36..=50 => 0.6,
            _ => 0.5,
        },
    }
}

pub(crate) async fn measure(ctx: &MetricContext) -> Result<f64, MetricError> {
    let data = ctx.data("ramp-up")?;
    let readme = find_readme(data);
    let examples = readme.and_then(|_| find_examples(data));
    Ok(ramp_up_score(readme, examples))
}
