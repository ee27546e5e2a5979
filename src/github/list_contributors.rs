//! GitHub contributors counting operation.

use crate::github::client::GitHubClient;
use crate::github::error::{ScoreError, ScoreResult};
use crate::github::util::with_deadline;
use crate::netscore::config::ScoreConfig;
use log::debug;
use serde::Serialize;

#[derive(Serialize)]
struct ContributorQuery {
    per_page: u8,
}

/// Turn a contributors reference (an absolute API URL) into an API route.
///
/// The reference must live under `<api base>/repos/`; anything else is
/// rejected as `InvalidAddress` rather than followed.
pub(crate) fn contributors_route<'a>(api_base: &str, reference: &'a str) -> ScoreResult<&'a str> {
    let prefix = format!("{api_base}/repos/");
    if !reference.starts_with(&prefix) {
        return Err(ScoreError::InvalidAddress(format!(
            "contributors reference '{reference}' is not under {prefix}"
        )));
    }
    Ok(&reference[api_base.len()..])
}

/// Count the contributors behind a contributors reference (first page only).
pub(crate) async fn count_contributors(
    client: &GitHubClient,
    reference: &str,
    config: &ScoreConfig,
) -> ScoreResult<u64> {
    let route = contributors_route(client.api_base(), reference)?;
    let query = ContributorQuery {
        per_page: config.api_page_size,
    };
    debug!("GET {route}");

    let contributors: Vec<serde_json::Value> =
        with_deadline(format!("contributors_{route}"), config.api_timeout, async {
            Ok(client.inner().get(route, Some(&query)).await?)
        })
        .await?;

    Ok(contributors.len() as u64)
}
