//! Canonical repository addresses.

use crate::github::error::{ScoreError, ScoreResult};
use std::fmt;
use std::str::FromStr;

/// Canonical source-hosting domain
pub const GITHUB_HOST: &str = "github.com";

/// A validated `(host, owner, repository)` triple.
///
/// Owner and repository are never empty; the host is always the canonical
/// source-hosting domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryAddress {
    host: String,
    owner: String,
    repo: String,
}

impl RepositoryAddress {
    /// Build an address from its parts.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> ScoreResult<Self> {
        let (owner, repo) = (owner.into(), repo.into());
        let owner = owner.trim();
        let repo = repo.trim().trim_end_matches(".git");
        if owner.is_empty() || repo.is_empty() {
            return Err(ScoreError::InvalidAddress(format!("{owner}/{repo}")));
        }
        Ok(Self {
            host: GITHUB_HOST.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Parse any GitHub URL form into an address.
    ///
    /// Accepts `https://github.com/o/r`, `http://www.github.com/o/r/tree/main`,
    /// `git@github.com:o/r.git`, `ssh://git@github.com/o/r` and `github:o/r`.
    /// Query strings and fragments are dropped.
    pub fn parse(url: &str) -> ScoreResult<Self> {
        let trimmed = url.trim().trim_end_matches('/');

        let path = if let Some(shorthand) = trimmed.strip_prefix("github:") {
            shorthand
        } else {
            let idx = trimmed
                .find(GITHUB_HOST)
                .ok_or_else(|| ScoreError::InvalidAddress(url.to_string()))?;
            let rest = &trimmed[idx + GITHUB_HOST.len()..];
            rest.strip_prefix('/')
                .or_else(|| rest.strip_prefix(':'))
                .ok_or_else(|| ScoreError::InvalidAddress(url.to_string()))?
        };

        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut segments = path.split('/').map(str::trim);
        match (segments.next(), segments.next()) {
            (Some(owner), Some(repo)) => {
                Self::new(owner, repo).map_err(|_| ScoreError::InvalidAddress(url.to_string()))
            }
            _ => Err(ScoreError::InvalidAddress(url.to_string())),
        }
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Repository API route, e.g. `/repos/owner/repo`
    #[must_use]
    pub fn api_route(&self) -> String {
        format!("/repos/{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for RepositoryAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "https://{}/{}/{}", self.host, self.owner, self.repo)
    }
}

impl FromStr for RepositoryAddress {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
