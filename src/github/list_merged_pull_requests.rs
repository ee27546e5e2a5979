//! Merged pull requests with their approval state.

use crate::github::address::RepositoryAddress;
use crate::github::client::GitHubClient;
use crate::github::error::ScoreResult;
use crate::github::get_repository::parse_timestamp;
use crate::github::util::with_deadline;
use crate::netscore::config::ScoreConfig;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Review state marking an approval
const APPROVED: &str = "APPROVED";

#[derive(Deserialize, Default)]
#[serde(default)]
struct PullPayload {
    number: Option<u64>,
    merged_at: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ReviewPayload {
    state: Option<String>,
}

#[derive(Serialize)]
struct PullQuery {
    state: &'static str,
    per_page: u8,
    page: u32,
}

#[derive(Serialize)]
struct ReviewQuery {
    per_page: u8,
}

/// A closed pull request with a merge timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedPullRequest {
    pub number: u64,
    pub merged_at: Option<DateTime<Utc>>,
    /// At least one review on the pull request is an approval
    pub approved: bool,
}

/// Fetch every merged pull request and whether it was approved.
///
/// Closed pull requests are paged through until a short page; review lists
/// are then fetched concurrently (bounded by `review_concurrency`). A review
/// list that cannot be read marks its pull request as unreviewed.
pub(crate) async fn list_merged_pull_requests(
    client: &GitHubClient,
    address: &RepositoryAddress,
    config: &ScoreConfig,
) -> ScoreResult<Vec<MergedPullRequest>> {
    let merged = list_merged(client, address, config).await?;
    debug!("{address}: {} merged pull requests", merged.len());

    let reviewed = stream::iter(merged)
        .map(|(number, merged_at)| async move {
            let approved = match has_approval(client, address, config, number).await {
                Ok(approved) => approved,
                Err(e) => {
                    warn!("Failed to fetch reviews for {address}#{number}: {e}");
                    false
                }
            };
            MergedPullRequest {
                number,
                merged_at,
                approved,
            }
        })
        .buffer_unordered(config.review_concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    Ok(reviewed)
}

async fn list_merged(
    client: &GitHubClient,
    address: &RepositoryAddress,
    config: &ScoreConfig,
) -> ScoreResult<Vec<(u64, Option<DateTime<Utc>>)>> {
    let route = format!("{}/pulls", address.api_route());
    let per_page = config.api_page_size.max(1);
    let mut merged = Vec::new();
    let mut page = 1u32;

    loop {
        let query = PullQuery {
            state: "closed",
            per_page,
            page,
        };
        debug!("GET {route}?state=closed&page={page}");

        let pulls: Vec<PullPayload> = with_deadline(
            format!("pulls_{address}_page_{page}"),
            config.api_timeout,
            async { Ok(client.inner().get(&route, Some(&query)).await?) },
        )
        .await?;

        let fetched = pulls.len();
        merged.extend(pulls.into_iter().filter_map(|pull| {
            let merged_at = pull.merged_at?;
            Some((pull.number.unwrap_or(0), parse_timestamp(&merged_at)))
        }));

        if fetched < usize::from(per_page) {
            break;
        }
        page += 1;
    }

    Ok(merged)
}

async fn has_approval(
    client: &GitHubClient,
    address: &RepositoryAddress,
    config: &ScoreConfig,
    number: u64,
) -> ScoreResult<bool> {
    let route = format!("{}/pulls/{number}/reviews", address.api_route());
    let query = ReviewQuery {
        per_page: config.api_page_size,
    };

    let reviews: Vec<ReviewPayload> =
        with_deadline(format!("reviews_{address}#{number}"), config.api_timeout, async {
            Ok(client.inner().get(&route, Some(&query)).await?)
        })
        .await?;

    Ok(reviews
        .iter()
        .any(|review| review.state.as_deref() == Some(APPROVED)))
}
