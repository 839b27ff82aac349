//! Fetch task utilities

use crate::github::error::{FetchError, FetchResult};
use crate::runtime::AsyncTask;
use std::future::Future;
use std::time::Duration;

/// Spawn an async task for a fetch operation.
#[inline]
pub fn spawn_task<T, F>(work: F) -> AsyncTask<T>
where
    T: Send + 'static,
    F: Future<Output = T> + Send + 'static,
{
    AsyncTask::spawn_async(work)
}

/// Await a fetch task, folding a dropped worker into `FetchError::TaskDropped`.
pub async fn join_task<T>(task: AsyncTask<FetchResult<T>>) -> FetchResult<T>
where
    T: Send + 'static,
{
    task.await?
}

/// Bound a request by `duration`, reporting `operation` on timeout.
pub(crate) async fn with_timeout<T, F>(
    operation: impl Into<String>,
    duration: Duration,
    work: F,
) -> FetchResult<T>
where
    F: Future<Output = FetchResult<T>>,
{
    match tokio::time::timeout(duration, work).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout {
            operation: operation.into(),
            duration,
        }),
    }
}
