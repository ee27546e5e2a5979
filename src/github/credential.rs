//! Repository API credential

use crate::github::error::{ScoreError, ScoreResult};
use std::fmt;

/// Environment variable holding the repository API token
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Bearer credential passed to every repository API call.
///
/// Resolved once per scoring invocation and shared read-only afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap an explicit token. Blank tokens are rejected.
    pub fn new(token: impl Into<String>) -> ScoreResult<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(ScoreError::MissingCredential(TOKEN_ENV_VAR));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Read the token from `GITHUB_TOKEN`.
    pub fn from_env() -> ScoreResult<Self> {
        let token =
            std::env::var(TOKEN_ENV_VAR).map_err(|_| ScoreError::MissingCredential(TOKEN_ENV_VAR))?;
        Self::new(token)
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("token {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
