//! Package identifier resolution (npm -> GitHub).

use crate::github::address::{GITHUB_HOST, RepositoryAddress};
use crate::github::client::USER_AGENT;
use crate::github::error::{ScoreError, ScoreResult};
use crate::github::util::with_deadline;
use crate::netscore::config::ScoreConfig;
use log::{debug, info};
use serde::Deserialize;
use std::time::Duration;

/// Domain marking an npm package page
const NPM_DOMAIN: &str = "npmjs.com";

/// Path segment preceding the package name on npm package pages
const NPM_PACKAGE_SEGMENT: &str = "npmjs.com/package/";

#[derive(Deserialize)]
struct NpmPackageInfo {
    #[serde(default)]
    repository: Option<NpmRepository>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NpmRepository {
    Url(String),
    Object {
        #[serde(default)]
        url: Option<String>,
    },
}

impl NpmRepository {
    fn into_url(self) -> Option<String> {
        let url = match self {
            Self::Url(url) => Some(url),
            Self::Object { url } => url,
        };
        url.filter(|u| !u.trim().is_empty())
    }
}

/// Converts package URLs into canonical repository addresses.
///
/// npm package pages are resolved through the registry's package metadata;
/// GitHub addresses pass through without a network call.
#[derive(Debug, Clone)]
pub struct PackageResolver {
    http: reqwest::Client,
    registry_base: String,
    deadline: Duration,
}

impl PackageResolver {
    /// Resolver using the registry base and deadline from `config`.
    pub fn new(config: &ScoreConfig) -> ScoreResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ScoreError::ClientSetup(e.to_string()))?;
        Ok(Self::with_client(http, config))
    }

    /// Resolver reusing an existing HTTP client.
    #[must_use]
    pub fn with_client(http: reqwest::Client, config: &ScoreConfig) -> Self {
        Self {
            http,
            registry_base: config.npm_registry_base.trim_end_matches('/').to_string(),
            deadline: config.api_timeout,
        }
    }

    /// Resolve a package URL to its repository address.
    pub async fn resolve(&self, url: &str) -> ScoreResult<RepositoryAddress> {
        let url = url.trim();

        if url.contains(NPM_DOMAIN) {
            let package = npm_package_name(url)?;
            let repository = self.registry_repository_url(&package).await?;
            let normalized = normalize_repository_url(&repository);
            info!("Resolved npm package {package} to {normalized}");
            return RepositoryAddress::parse(&normalized);
        }

        if url.contains(GITHUB_HOST) {
            return RepositoryAddress::parse(url);
        }

        Err(ScoreError::InvalidIdentifier(url.to_string()))
    }

    /// Query the registry for `repository.url`.
    async fn registry_repository_url(&self, package: &str) -> ScoreResult<String> {
        let api_url = format!("{}/{package}", self.registry_base);
        debug!("GET {api_url}");

        let info = with_deadline(format!("npm_metadata_{package}"), self.deadline, async {
            let response = self.http.get(&api_url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ScoreError::Upstream(format!(
                    "npm registry returned {status} for {package}"
                )));
            }
            Ok(response.json::<NpmPackageInfo>().await?)
        })
        .await?;

        info.repository
            .and_then(NpmRepository::into_url)
            .ok_or_else(|| ScoreError::NoRepositoryFound(package.to_string()))
    }
}

/// Extract the package name from an npm package page URL.
///
/// Scoped packages keep their scope (`@scope/name`); version suffixes such as
/// `/v/1.2.3`, query strings and fragments are dropped.
pub fn npm_package_name(url: &str) -> ScoreResult<String> {
    let path = url
        .split_once(NPM_PACKAGE_SEGMENT)
        .map(|(_, path)| path)
        .ok_or_else(|| ScoreError::InvalidIdentifier(url.to_string()))?;
    let path = path.split(['?', '#']).next().unwrap_or_default();

    let mut segments = path.split('/').filter(|s| !s.is_empty());
    let name = match segments.next() {
        Some(scope) if scope.starts_with('@') => match segments.next() {
            Some(name) => format!("{scope}/{name}"),
            None => return Err(ScoreError::InvalidIdentifier(url.to_string())),
        },
        Some(name) => name.to_string(),
        None => return Err(ScoreError::InvalidIdentifier(url.to_string())),
    };
    Ok(name)
}

/// Normalise an npm `repository.url` value into a browsable https URL.
///
/// Strips a `git+` prefix, maps the `git:` scheme to `https:` and removes a
/// trailing `.git`.
#[must_use]
pub fn normalize_repository_url(raw: &str) -> String {
    let mut url = raw.trim();
    url = url.strip_prefix("git+").unwrap_or(url);

    let mut normalized = match url.strip_prefix("git:") {
        Some(rest) => format!("https:{rest}"),
        None => url.to_string(),
    };

    while normalized.ends_with('/') {
        normalized.pop();
    }
    if let Some(stripped) = normalized.strip_suffix(".git") {
        normalized = stripped.to_string();
    }
    normalized
}
