//! GitHub API utilities

use crate::github::error::{ScoreError, ScoreResult};
use crate::runtime::AsyncTask;
use std::future::Future;
use std::time::Duration;

/// Spawn an async task for scoring operations.
///
/// This is a convenience wrapper around `AsyncTask::spawn_async`.
#[inline]
pub fn spawn_task<T, F>(work: F) -> AsyncTask<T>
where
    T: Send + 'static,
    F: Future<Output = T> + Send + 'static,
{
    AsyncTask::spawn_async(work)
}

/// Run one upstream call under a fixed deadline.
///
/// Expiry surfaces as `ScoreError::Timeout`, which callers treat like any
/// other upstream failure.
pub(crate) async fn with_deadline<T, F>(
    operation: impl Into<String>,
    deadline: Duration,
    call: F,
) -> ScoreResult<T>
where
    F: Future<Output = ScoreResult<T>>,
{
    tokio::time::timeout(deadline, call)
        .await
        .map_err(|_| ScoreError::Timeout {
            operation: operation.into(),
            duration: deadline,
        })?
}
