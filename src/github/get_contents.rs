//! GitHub top-level contents and manifest retrieval.

use crate::github::address::RepositoryAddress;
use crate::github::client::GitHubClient;
use crate::github::error::{ScoreError, ScoreResult};
use crate::github::util::with_deadline;
use log::debug;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use std::time::Duration;

#[derive(Deserialize, Default)]
#[serde(default)]
struct ContentPayload {
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    download_url: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ManifestPayload {
    dependencies: Option<JsonValue>,
    dev_dependencies: Option<JsonValue>,
}

/// Kind of a listing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Symlinks, submodules and anything unrecognised
    Other,
}

impl EntryKind {
    fn from_api(kind: Option<&str>) -> Self {
        match kind {
            Some("file") => Self::File,
            Some("dir") => Self::Directory,
            _ => Self::Other,
        }
    }
}

/// One entry of the repository root listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    pub name: String,
    pub kind: EntryKind,
    pub download_url: Option<String>,
}

impl ContentEntry {
    #[must_use]
    pub fn file(name: impl Into<String>, download_url: Option<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
            download_url,
        }
    }

    #[must_use]
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
            download_url: None,
        }
    }
}

/// Declared dependencies of a `package.json`-style manifest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageManifest {
    pub dependencies: Map<String, JsonValue>,
    pub dev_dependencies: Map<String, JsonValue>,
}

impl PackageManifest {
    /// Parse manifest JSON. Non-object dependency sections read as empty.
    pub fn from_json(raw: &str) -> ScoreResult<Self> {
        let payload: ManifestPayload = serde_json::from_str(raw)
            .map_err(|e| ScoreError::Upstream(format!("Invalid manifest: {e}")))?;
        Ok(payload.into())
    }
}

impl From<ManifestPayload> for PackageManifest {
    fn from(payload: ManifestPayload) -> Self {
        fn object(value: Option<JsonValue>) -> Map<String, JsonValue> {
            match value {
                Some(JsonValue::Object(map)) => map,
                _ => Map::new(),
            }
        }
        Self {
            dependencies: object(payload.dependencies),
            dev_dependencies: object(payload.dev_dependencies),
        }
    }
}

/// List the repository root.
pub(crate) async fn get_top_level_contents(
    client: &GitHubClient,
    address: &RepositoryAddress,
    deadline: Duration,
) -> ScoreResult<Vec<ContentEntry>> {
    let route = format!("{}/contents", address.api_route());
    debug!("GET {route}");

    let payload: Vec<ContentPayload> =
        with_deadline(format!("contents_{address}"), deadline, async {
            Ok(client.inner().get(&route, None::<&()>).await?)
        })
        .await?;

    Ok(payload
        .into_iter()
        .filter_map(|item| {
            let kind = EntryKind::from_api(item.kind.as_deref());
            item.name.map(|name| ContentEntry {
                name,
                kind,
                download_url: item.download_url.filter(|u| !u.is_empty()),
            })
        })
        .collect())
}

/// Download and parse a manifest listed in the repository root.
pub(crate) async fn get_manifest(
    client: &GitHubClient,
    entry: &ContentEntry,
    deadline: Duration,
) -> ScoreResult<PackageManifest> {
    let url = entry.download_url.as_deref().ok_or_else(|| {
        ScoreError::Upstream(format!("{} has no download URL", entry.name))
    })?;
    debug!("GET {url}");

    let body = with_deadline(format!("manifest_{}", entry.name), deadline, async {
        let response = client
            .http()
            .get(url)
            .header(AUTHORIZATION, client.credential().authorization())
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScoreError::Upstream(format!(
                "manifest download returned {status} for {url}"
            )));
        }
        Ok(response.text().await?)
    })
    .await?;

    PackageManifest::from_json(&body)
}
