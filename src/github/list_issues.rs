//! GitHub Issues listing operation.

use crate::github::address::RepositoryAddress;
use crate::github::client::GitHubClient;
use crate::github::error::ScoreResult;
use crate::github::get_repository::parse_timestamp;
use crate::github::util::with_deadline;
use crate::netscore::config::ScoreConfig;
use chrono::{DateTime, Months, SecondsFormat, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Default)]
#[serde(default)]
struct IssuePayload {
    number: Option<u64>,
    created_at: Option<String>,
    closed_at: Option<String>,
    pull_request: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct IssueQuery<'a> {
    state: &'a str,
    since: &'a str,
    per_page: u8,
}

/// One issue as seen by the responsiveness metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRecord {
    pub number: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    /// The issues endpoint also lists pull requests. They stay in the lists
    /// and count as issues for responsiveness.
    pub is_pull_request: bool,
}

impl From<IssuePayload> for IssueRecord {
    fn from(payload: IssuePayload) -> Self {
        Self {
            number: payload.number.unwrap_or(0),
            created_at: payload.created_at.as_deref().and_then(parse_timestamp),
            closed_at: payload.closed_at.as_deref().and_then(parse_timestamp),
            is_pull_request: payload.pull_request.is_some_and(|v| !v.is_null()),
        }
    }
}

/// Issues opened and closed within the activity window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueLists {
    pub open: Vec<IssueRecord>,
    pub closed: Vec<IssueRecord>,
}

/// Start of the activity window: `now` minus `months`.
pub(crate) fn window_start(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(months)).unwrap_or(now)
}

/// Fetch open and closed issues updated within the configured window.
///
/// The two requests run concurrently; either failing fails the pair.
pub(crate) async fn list_issues(
    client: &GitHubClient,
    address: &RepositoryAddress,
    config: &ScoreConfig,
) -> ScoreResult<IssueLists> {
    let since = window_start(Utc::now(), config.issue_window_months)
        .to_rfc3339_opts(SecondsFormat::Secs, true);

    let (open, closed) = tokio::try_join!(
        list_issues_in_state(client, address, config, "open", &since),
        list_issues_in_state(client, address, config, "closed", &since),
    )?;

    Ok(IssueLists { open, closed })
}

async fn list_issues_in_state(
    client: &GitHubClient,
    address: &RepositoryAddress,
    config: &ScoreConfig,
    state: &str,
    since: &str,
) -> ScoreResult<Vec<IssueRecord>> {
    let route = format!("{}/issues", address.api_route());
    let query = IssueQuery {
        state,
        since,
        per_page: config.api_page_size,
    };
    debug!("GET {route}?state={state}&since={since}");

    let payload: Vec<IssuePayload> = with_deadline(
        format!("{state}_issues_{address}"),
        config.api_timeout,
        async { Ok(client.inner().get(&route, Some(&query)).await?) },
    )
    .await?;

    Ok(payload.into_iter().map(IssueRecord::from).collect())
}
