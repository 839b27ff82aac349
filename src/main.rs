// Batch scorer
//
// Reads a file of GitHub/npm URLs (one per line) and prints one NDJSON
// score report per URL, in input order, on stdout.

use anyhow::{Context, Result, bail};
use futures::StreamExt;
use log::error;
use netscore::{GitHubClient, RunConfig, Scorer, init_logging};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Both ring and aws-lc can be linked in through the dependency graph.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let Some(url_file) = std::env::args().nth(1) else {
        bail!("usage: netscore <URL_FILE>");
    };

    let config = Arc::new(RunConfig::from_env()?);
    if config.github_token.is_none() {
        bail!("GITHUB_TOKEN must be set");
    }
    init_logging(&config)?;

    let contents = tokio::fs::read_to_string(&url_file)
        .await
        .with_context(|| format!("reading URL file {url_file}"))?;
    let urls: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    let client = GitHubClient::from_config(config.clone())?;
    let scorer = Scorer::new(Arc::new(client), config);

    let mut failed = false;
    let mut session = scorer.score_all(urls);
    while let Some((url, outcome)) = session.next().await {
        match outcome {
            Ok(Some(report)) => println!("{}", serde_json::to_string(&report)?),
            Ok(None) => failed = true,
            Err(e) => {
                error!("Failed to score {url}: {e}");
                failed = true;
            }
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
