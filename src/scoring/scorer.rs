//! URL-to-report pipeline and batch streaming

use futures::Stream;
use futures::stream::{self, StreamExt};
use log::{info, warn};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc::Receiver;
use tokio_stream::wrappers::ReceiverStream;

use crate::config::RunConfig;
use crate::github::util::join_task;

use super::orchestrator::Orchestrator;
use super::snapshot::RepositorySnapshot;
use super::source::RepositorySource;
use super::types::{ScoreReport, ScoreResult};

/// One scored input line: the URL as given and its outcome.
pub type ScoredUrl = (String, ScoreResult<Option<ScoreReport>>);

/// Streaming batch session, yielding results in input order
pub struct ScoreSession {
    inner: ReceiverStream<ScoredUrl>,
}

impl ScoreSession {
    fn new(rx: Receiver<ScoredUrl>) -> Self {
        Self {
            inner: ReceiverStream::new(rx),
        }
    }
}

impl Stream for ScoreSession {
    type Item = ScoredUrl;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

/// Resolves input URLs, fetches snapshots and hands them to the orchestrator.
#[derive(Clone)]
pub struct Scorer {
    source: Arc<dyn RepositorySource>,
    orchestrator: Orchestrator,
    config: Arc<RunConfig>,
}

impl Scorer {
    pub fn new(source: Arc<dyn RepositorySource>, config: Arc<RunConfig>) -> Self {
        Self {
            orchestrator: Orchestrator::new(source.clone(), config.clone()),
            source,
            config,
        }
    }

    /// Score a single GitHub or npm URL.
    ///
    /// `Ok(None)` means the repository was reached but a required metric
    /// could not be computed. A failed snapshot fetch is not an error here:
    /// the orchestrator sees a snapshot without data and gates it.
    pub async fn score(&self, url: &str) -> ScoreResult<Option<ScoreReport>> {
        let identity = join_task(self.source.resolve_repository(url)).await?;
        info!("Scoring {} as {}", url, identity.full_name());

        let snapshot = match join_task(self.source.fetch_repository_snapshot(&identity)).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Snapshot fetch failed for {}: {e}", identity.full_name());
                RepositorySnapshot {
                    identity,
                    data: None,
                }
            }
        };

        Ok(self.orchestrator.calculate_metrics(Arc::new(snapshot)).await)
    }

    /// Score a batch of URLs, up to `concurrency_limit` at a time.
    pub fn score_all(&self, urls: Vec<String>) -> ScoreSession {
        let (tx, rx) = tokio::sync::mpsc::channel(self.config.concurrency_limit.max(1));
        let scorer = self.clone();

        tokio::spawn(async move {
            let limit = scorer.config.concurrency_limit.max(1);
            let mut results = stream::iter(urls)
                .map(|url| {
                    let scorer = scorer.clone();
                    async move {
                        let outcome = scorer.score(&url).await;
                        (url, outcome)
                    }
                })
                .buffered(limit);

            while let Some(item) = results.next().await {
                // Receiver dropped; stop scoring.
                if tx.send(item).await.is_err() {
                    break;
                }
            }
        });

        ScoreSession::new(rx)
    }
}
