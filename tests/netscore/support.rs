//! Shared fixtures: an in-memory repository source and sample data.

use netscore::{
    ContentEntry, IssueLists, IssueRecord, MergedPullRequest, PackageManifest,
    RepositoryAddress, RepositoryMetadata, RepositorySnapshot, RepositorySource, ScoreError,
    ScoreResult,
};
use std::collections::HashMap;

pub const MANIFEST_URL: &str = "mem://acme/widget/package.json";

/// Serves fixed data; `None` fields fail with an upstream error.
#[derive(Debug, Clone)]
pub struct StaticSource {
    pub metadata: Option<RepositoryMetadata>,
    pub issues: Option<IssueLists>,
    pub contributors: Option<u64>,
    pub contents: Option<Vec<ContentEntry>>,
    pub manifests: HashMap<String, String>,
    pub merged: Option<Vec<MergedPullRequest>>,
}

fn missing(what: &str) -> ScoreError {
    ScoreError::Upstream(format!("{what} unavailable"))
}

impl RepositorySource for StaticSource {
    async fn repository(&self, _address: &RepositoryAddress) -> ScoreResult<RepositoryMetadata> {
        self.metadata.clone().ok_or_else(|| missing("metadata"))
    }

    async fn issues(&self, _address: &RepositoryAddress) -> ScoreResult<IssueLists> {
        self.issues.clone().ok_or_else(|| missing("issues"))
    }

    async fn contributor_count(&self, _reference: &str) -> ScoreResult<u64> {
        self.contributors.ok_or_else(|| missing("contributors"))
    }

    fn default_contributors_reference(&self, address: &RepositoryAddress) -> String {
        format!("mem:/{}/contributors", address.api_route())
    }

    async fn top_level_contents(&self, _address: &RepositoryAddress) -> ScoreResult<Vec<ContentEntry>> {
        self.contents.clone().ok_or_else(|| missing("contents"))
    }

    async fn manifest(&self, entry: &ContentEntry) -> ScoreResult<PackageManifest> {
        let url = entry.download_url.as_deref().unwrap_or_default();
        let body = self.manifests.get(url).ok_or_else(|| missing(url))?;
        PackageManifest::from_json(body)
    }

    async fn merged_pull_requests(
        &self,
        _address: &RepositoryAddress,
    ) -> ScoreResult<Vec<MergedPullRequest>> {
        self.merged.clone().ok_or_else(|| missing("pull requests"))
    }
}

pub fn address() -> RepositoryAddress {
    RepositoryAddress::new("acme", "widget").unwrap()
}

pub fn issues(count: u64) -> Vec<IssueRecord> {
    (1..=count)
        .map(|number| IssueRecord {
            number,
            created_at: None,
            closed_at: None,
            is_pull_request: false,
        })
        .collect()
}

pub fn approved(number: u64) -> MergedPullRequest {
    MergedPullRequest {
        number,
        merged_at: None,
        approved: true,
    }
}

/// 12 contributors, 3 open issues, 6 closed in the window, MIT licensed,
/// README/src/test/package.json at the root, one fully pinned manifest and
/// two approved merged pull requests.
pub fn healthy_source() -> StaticSource {
    StaticSource {
        metadata: Some(RepositoryMetadata {
            stars: 420,
            forks: 17,
            open_issues: 3,
            license: "MIT License".to_string(),
            updated_at: None,
            contributors_url: None,
        }),
        issues: Some(IssueLists {
            open: issues(3),
            closed: issues(6),
        }),
        contributors: Some(12),
        contents: Some(vec![
            ContentEntry::file("README.md", None),
            ContentEntry::directory("src"),
            ContentEntry::directory("test"),
            ContentEntry::file("package.json", Some(MANIFEST_URL.to_string())),
        ]),
        manifests: HashMap::from([(
            MANIFEST_URL.to_string(),
            r#"{"name":"widget","dependencies":{"x":"1.0.0"}}"#.to_string(),
        )]),
        merged: Some(vec![approved(1), approved(2)]),
    }
}

/// Every read fails.
pub fn failing_source() -> StaticSource {
    StaticSource {
        metadata: None,
        issues: None,
        contributors: None,
        contents: None,
        manifests: HashMap::new(),
        merged: None,
    }
}

/// The snapshot `healthy_source` yields for `acme/widget`.
pub fn healthy_snapshot() -> RepositorySnapshot {
    let source = healthy_source();
    let contents = source.contents.clone().unwrap();
    let manifest = PackageManifest::from_json(&source.manifests[MANIFEST_URL]);

    RepositorySnapshot {
        address: address(),
        stars: 420,
        forks: 17,
        open_issue_count: 3,
        license: "MIT License".to_string(),
        updated_at: None,
        contributor_count: 12,
        open_issues: issues(3),
        closed_issues: issues(6),
        top_level_contents: Ok(contents),
        manifests: vec![manifest],
        merged_pull_requests: Ok(vec![approved(1), approved(2)]),
    }
}
