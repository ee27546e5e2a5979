//! GitHub repository metadata retrieval operation.

use crate::github::address::RepositoryAddress;
use crate::github::client::GitHubClient;
use crate::github::error::ScoreResult;
use crate::github::util::with_deadline;
use chrono::{DateTime, Utc};
use log::debug;
use serde::Deserialize;
use std::time::Duration;

/// License name reported when the repository declares none
pub const NO_LICENSE: &str = "No license";

#[derive(Deserialize, Default)]
#[serde(default)]
struct RepositoryPayload {
    stargazers_count: Option<u64>,
    forks_count: Option<u64>,
    open_issues_count: Option<u64>,
    license: Option<LicensePayload>,
    updated_at: Option<String>,
    contributors_url: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct LicensePayload {
    name: Option<String>,
}

/// Repository metadata used by the scoring engine.
///
/// Missing counts default to 0, a missing license to [`NO_LICENSE`].
#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryMetadata {
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    pub license: String,
    pub updated_at: Option<DateTime<Utc>>,
    /// API URL listing the contributors, when the payload carried one
    pub contributors_url: Option<String>,
}

impl From<RepositoryPayload> for RepositoryMetadata {
    fn from(payload: RepositoryPayload) -> Self {
        Self {
            stars: payload.stargazers_count.unwrap_or(0),
            forks: payload.forks_count.unwrap_or(0),
            open_issues: payload.open_issues_count.unwrap_or(0),
            license: payload
                .license
                .and_then(|l| l.name)
                .unwrap_or_else(|| NO_LICENSE.to_string()),
            updated_at: payload.updated_at.as_deref().and_then(parse_timestamp),
            contributors_url: payload.contributors_url.filter(|u| !u.is_empty()),
        }
    }
}

/// Lenient RFC 3339 parsing; malformed timestamps read as absent.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Fetch stars, forks, open-issue count, license and contributors reference.
pub(crate) async fn get_repository(
    client: &GitHubClient,
    address: &RepositoryAddress,
    deadline: Duration,
) -> ScoreResult<RepositoryMetadata> {
    let route = address.api_route();
    debug!("GET {route}");

    let payload: RepositoryPayload = with_deadline(format!("repository_{address}"), deadline, async {
        Ok(client.inner().get(&route, None::<&()>).await?)
    })
    .await?;

    Ok(payload.into())
}
