//! GitHub API client wrapper
//!
//! Provides the repository API (through Octocrab) and plain HTTP access for
//! raw file downloads and the npm registry, all sharing one credential.
//!
//! # Examples
//!
//! ```rust,no_run
//! use netscore::{Credential, GitHubClient};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gh = GitHubClient::builder()
//!         .credential(Credential::from_env()?)
//!         .build()?;
//!     # let _ = gh;
//!     Ok(())
//! }
//! ```

use crate::github::credential::Credential;
use crate::github::error::{ScoreError, ScoreResult};
use crate::netscore::config::DEFAULT_GITHUB_API_BASE;
use octocrab::Octocrab;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use std::sync::Arc;

/// User-Agent header for registry and raw download requests
pub(crate) const USER_AGENT: &str = concat!("netscore/", env!("CARGO_PKG_VERSION"));

/// GitHub API client wrapper that encapsulates Octocrab.
///
/// Cloning is cheap (Arc clone).
#[derive(Clone, Debug)]
pub struct GitHubClient {
    inner: Arc<Octocrab>,
    http: reqwest::Client,
    credential: Credential,
    api_base: String,
}

impl GitHubClient {
    /// Create a new client builder
    #[must_use]
    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::new()
    }

    /// Convenience: create client with an explicit token against api.github.com
    pub fn with_token(token: impl Into<String>) -> ScoreResult<Self> {
        Self::builder().credential(Credential::new(token)?).build()
    }

    /// Get inner Octocrab client
    #[must_use]
    pub fn inner(&self) -> &Arc<Octocrab> {
        &self.inner
    }

    /// Plain HTTP client for raw downloads and the npm registry
    #[must_use]
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    #[must_use]
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// API base without trailing slash, e.g. `https://api.github.com`
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

/// Builder for creating `GitHubClient`
pub struct GitHubClientBuilder {
    credential: Option<Credential>,
    base_uri: Option<String>,
}

impl GitHubClientBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            credential: None,
            base_uri: None,
        }
    }

    /// Set the credential sent as `Authorization: token <value>`
    #[must_use]
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Set base URI (for GitHub Enterprise or a local mock)
    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = Some(uri.into());
        self
    }

    /// Build the `GitHubClient`.
    ///
    /// Fails with `MissingCredential` when no credential was supplied, before
    /// any connection is attempted.
    pub fn build(self) -> ScoreResult<GitHubClient> {
        let credential = self
            .credential
            .ok_or(ScoreError::MissingCredential(crate::github::credential::TOKEN_ENV_VAR))?;

        // Both rustls backends may be linked in; pick one explicitly.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let api_base = self
            .base_uri
            .map(|uri| uri.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_GITHUB_API_BASE.to_string());

        let octocrab = Octocrab::builder()
            .add_header(AUTHORIZATION, credential.authorization())
            .base_uri(&api_base)
            .map_err(|e| ScoreError::ClientSetup(e.to_string()))?
            .build()
            .map_err(|e| ScoreError::ClientSetup(e.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            HeaderValue::from_static(USER_AGENT),
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ScoreError::ClientSetup(e.to_string()))?;

        Ok(GitHubClient {
            inner: Arc::new(octocrab),
            http,
            credential,
            api_base,
        })
    }
}

impl Default for GitHubClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
