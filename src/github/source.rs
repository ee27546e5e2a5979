//! Repository data source seam.

use crate::github::address::RepositoryAddress;
use crate::github::client::GitHubClient;
use crate::github::error::ScoreResult;
use crate::github::get_contents::{
    ContentEntry, PackageManifest, get_manifest, get_top_level_contents,
};
use crate::github::get_repository::{RepositoryMetadata, get_repository};
use crate::github::list_contributors::count_contributors;
use crate::github::list_issues::{IssueLists, list_issues};
use crate::github::list_merged_pull_requests::{MergedPullRequest, list_merged_pull_requests};
use crate::netscore::config::ScoreConfig;
use std::future::Future;
use std::sync::Arc;

/// Read operations the scoring engine needs from a source-hosting service.
///
/// Every operation is an independent read; implementations hold no mutable
/// state shared between calls.
pub trait RepositorySource: Send + Sync + 'static {
    /// Stars, forks, open-issue count, license and contributors reference.
    fn repository(
        &self,
        address: &RepositoryAddress,
    ) -> impl Future<Output = ScoreResult<RepositoryMetadata>> + Send;

    /// Issues opened and closed within the activity window.
    fn issues(
        &self,
        address: &RepositoryAddress,
    ) -> impl Future<Output = ScoreResult<IssueLists>> + Send;

    /// Number of contributors behind a contributors reference.
    fn contributor_count(&self, reference: &str)
    -> impl Future<Output = ScoreResult<u64>> + Send;

    /// Conventional contributors reference for `address`, used when the
    /// metadata carried none.
    fn default_contributors_reference(&self, address: &RepositoryAddress) -> String;

    /// Entries of the repository root.
    fn top_level_contents(
        &self,
        address: &RepositoryAddress,
    ) -> impl Future<Output = ScoreResult<Vec<ContentEntry>>> + Send;

    /// Download and parse a manifest found in the root listing.
    fn manifest(
        &self,
        entry: &ContentEntry,
    ) -> impl Future<Output = ScoreResult<PackageManifest>> + Send;

    /// Merged pull requests with their approval state.
    fn merged_pull_requests(
        &self,
        address: &RepositoryAddress,
    ) -> impl Future<Output = ScoreResult<Vec<MergedPullRequest>>> + Send;
}

/// `RepositorySource` backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubSource {
    client: GitHubClient,
    config: Arc<ScoreConfig>,
}

impl GitHubSource {
    #[must_use]
    pub fn new(client: GitHubClient, config: Arc<ScoreConfig>) -> Self {
        Self { client, config }
    }

    #[must_use]
    pub fn client(&self) -> &GitHubClient {
        &self.client
    }
}

impl RepositorySource for GitHubSource {
    async fn repository(&self, address: &RepositoryAddress) -> ScoreResult<RepositoryMetadata> {
        get_repository(&self.client, address, self.config.api_timeout).await
    }

    async fn issues(&self, address: &RepositoryAddress) -> ScoreResult<IssueLists> {
        list_issues(&self.client, address, &self.config).await
    }

    async fn contributor_count(&self, reference: &str) -> ScoreResult<u64> {
        count_contributors(&self.client, reference, &self.config).await
    }

    fn default_contributors_reference(&self, address: &RepositoryAddress) -> String {
        format!(
            "{}{}/contributors",
            self.client.api_base(),
            address.api_route()
        )
    }

    async fn top_level_contents(&self, address: &RepositoryAddress) -> ScoreResult<Vec<ContentEntry>> {
        get_top_level_contents(&self.client, address, self.config.api_timeout).await
    }

    async fn manifest(&self, entry: &ContentEntry) -> ScoreResult<PackageManifest> {
        get_manifest(&self.client, entry, self.config.api_timeout).await
    }

    async fn merged_pull_requests(
        &self,
        address: &RepositoryAddress,
    ) -> ScoreResult<Vec<MergedPullRequest>> {
        list_merged_pull_requests(&self.client, address, &self.config).await
    }
}
