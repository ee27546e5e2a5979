//! Scoring error types

use std::time::Duration;
use thiserror::Error;

/// Error types for resolution, fetching and scoring.
///
/// Failures inside a single metric calculator never surface here; a
/// calculator that cannot finish reports its floor score instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// The package URL could not be interpreted (e.g. npm URL without a package path)
    #[error("Invalid package identifier: {0}")]
    InvalidIdentifier(String),

    /// The repository address could not be split into owner and repository
    #[error("Invalid repository address: {0}")]
    InvalidAddress(String),

    /// The npm package carries no `repository.url`
    #[error("No source repository found for package: {0}")]
    NoRepositoryFound(String),

    /// A required upstream call answered with a non-success status or could not be decoded
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// A required upstream call did not answer before its deadline
    #[error("Upstream call timed out: {operation} after {duration:?}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    /// No repository API credential in the environment
    #[error("Missing credential: {0} is not set")]
    MissingCredential(&'static str),

    /// Client setup/configuration error
    #[error("Client setup failed: {0}")]
    ClientSetup(String),
}

impl ScoreError {
    /// True for every failure caused by an upstream call, deadline expiry included.
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_) | Self::Timeout { .. })
    }
}

/// Convenience result alias for scoring operations
pub type ScoreResult<T> = Result<T, ScoreError>;

impl From<octocrab::Error> for ScoreError {
    fn from(e: octocrab::Error) -> Self {
        ScoreError::Upstream(e.to_string())
    }
}

impl From<reqwest::Error> for ScoreError {
    fn from(e: reqwest::Error) -> Self {
        ScoreError::Upstream(e.to_string())
    }
}
