//! NetScore scoring engine
//!
//! Resolves a package URL to its repository, fetches the data every metric
//! depends on, runs the seven metric calculators concurrently and folds
//! their results into a [`ScoreReport`].

pub mod config;
pub mod metrics;
pub mod types;

pub use config::{
    BusFactorSteps, Indicator, IndicatorKind, MetricWeights, RampUpIndicators, ScoreConfig,
};
pub use types::{
    FAILED_NET_SCORE, FailedScore, Metric, MetricResult, RepositorySnapshot, ScoreReport, round2,
};

use crate::github::{
    ContentEntry, Credential, GitHubClient, GitHubSource, PackageManifest, PackageResolver,
    RepositoryAddress, RepositorySource, ScoreError, ScoreResult, spawn_task,
};
use futures::future::join_all;
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Instant;

/// The score aggregator.
///
/// Cloning is cheap; the source and configuration are shared read-only.
pub struct Scorer<S: RepositorySource> {
    source: Arc<S>,
    resolver: PackageResolver,
    config: Arc<ScoreConfig>,
}

impl<S: RepositorySource> Clone for Scorer<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            resolver: self.resolver.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl Scorer<GitHubSource> {
    /// Scorer configured from the environment (`GITHUB_TOKEN` plus the
    /// overrides read by [`ScoreConfig::from_env`]).
    ///
    /// Fails with `MissingCredential` before any network call when the token
    /// is absent.
    pub fn from_env() -> ScoreResult<Self> {
        let credential = Credential::from_env()?;
        Self::github(credential, ScoreConfig::from_env())
    }

    /// Scorer backed by the GitHub REST API.
    pub fn github(credential: Credential, config: ScoreConfig) -> ScoreResult<Self> {
        config.weights.validate().map_err(ScoreError::ClientSetup)?;

        let client = GitHubClient::builder()
            .credential(credential)
            .base_uri(config.github_api_base.clone())
            .build()?;
        let resolver = PackageResolver::with_client(client.http().clone(), &config);
        let config = Arc::new(config);
        let source = GitHubSource::new(client, Arc::clone(&config));

        Ok(Self {
            source: Arc::new(source),
            resolver,
            config,
        })
    }
}

impl<S: RepositorySource> Scorer<S> {
    /// Scorer over an arbitrary repository source.
    pub fn with_source(source: S, config: ScoreConfig) -> ScoreResult<Self> {
        config.weights.validate().map_err(ScoreError::ClientSetup)?;
        let resolver = PackageResolver::new(&config)?;
        Ok(Self {
            source: Arc::new(source),
            resolver,
            config: Arc::new(config),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }

    #[must_use]
    pub fn resolver(&self) -> &PackageResolver {
        &self.resolver
    }

    /// Resolve, fetch and score a package URL (npm or GitHub).
    pub async fn score_url(&self, url: &str) -> ScoreResult<ScoreReport> {
        let started = Instant::now();
        let address = self.resolver.resolve(url).await?;
        let snapshot = self.snapshot(&address).await?;
        Ok(self.score_since(snapshot, started).await.with_url(url.trim()))
    }

    /// Fetch and score a repository address.
    pub async fn score_address(&self, address: &RepositoryAddress) -> ScoreResult<ScoreReport> {
        let started = Instant::now();
        let snapshot = self.snapshot(address).await?;
        Ok(self.score_since(snapshot, started).await)
    }

    /// Score an already-fetched snapshot.
    pub async fn score_snapshot(&self, snapshot: RepositorySnapshot) -> ScoreReport {
        self.score_since(snapshot, Instant::now()).await
    }

    /// Fetch everything the calculators read.
    ///
    /// Metadata comes first (it carries the contributors reference). Issues
    /// and contributors are then fetched alongside the root listing, its
    /// manifests and the merged pull requests. Only the first three are
    /// required: their failure fails the whole invocation, while the others
    /// are kept as failed reads for their metrics to degrade on.
    pub async fn snapshot(&self, address: &RepositoryAddress) -> ScoreResult<RepositorySnapshot> {
        let metadata = self.source.repository(address).await?;
        let reference = metadata
            .contributors_url
            .clone()
            .unwrap_or_else(|| self.source.default_contributors_reference(address));

        let required = async {
            tokio::try_join!(
                self.source.issues(address),
                self.source.contributor_count(&reference),
            )
        };
        let (required, (top_level_contents, manifests), merged_pull_requests) = tokio::join!(
            required,
            self.contents_and_manifests(address),
            self.source.merged_pull_requests(address),
        );
        let (issues, contributor_count) = required?;
        debug!(
            "{address}: {} open / {} closed issues in window, {contributor_count} contributors",
            issues.open.len(),
            issues.closed.len()
        );
        if let Err(e) = &merged_pull_requests {
            warn!("PullRequestReview will score 0 for {address}: {e}");
        }

        Ok(RepositorySnapshot {
            address: address.clone(),
            stars: metadata.stars,
            forks: metadata.forks,
            open_issue_count: metadata.open_issues,
            license: metadata.license,
            updated_at: metadata.updated_at,
            contributor_count,
            open_issues: issues.open,
            closed_issues: issues.closed,
            top_level_contents,
            manifests,
            merged_pull_requests,
        })
    }

    /// Read the root listing once, then the manifests it names.
    async fn contents_and_manifests(
        &self,
        address: &RepositoryAddress,
    ) -> (
        ScoreResult<Vec<ContentEntry>>,
        Vec<ScoreResult<PackageManifest>>,
    ) {
        let contents = self.source.top_level_contents(address).await;
        let manifests = match &contents {
            Ok(entries) => {
                join_all(
                    metrics::manifest_entries(entries, &self.config.manifest_file_names)
                        .into_iter()
                        .map(|entry| self.source.manifest(entry)),
                )
                .await
            }
            Err(e) => {
                warn!("RampUp and PinnedDependencies will score 0 for {address}: {e}");
                Vec::new()
            }
        };

        for failure in manifests.iter().filter_map(|m| m.as_ref().err()) {
            warn!("Manifest in {address} will score 0: {failure}");
        }
        (contents, manifests)
    }

    /// Run all seven calculators concurrently and reduce their results.
    ///
    /// Each calculator runs as its own task and is timed from dispatch to
    /// completion. A task that dies without a result scores 0, so the join
    /// never fails. The overall latency runs until the report is built.
    async fn score_since(&self, snapshot: RepositorySnapshot, started: Instant) -> ScoreReport {
        let snapshot = Arc::new(snapshot);

        let tasks = Metric::ALL.map(|metric| {
            let snapshot = Arc::clone(&snapshot);
            let config = Arc::clone(&self.config);

            let dispatched = Instant::now();
            let task = spawn_task(async move { metrics::evaluate(metric, &snapshot, &config) });

            async move {
                let score = match task.await {
                    Ok(score) => score,
                    Err(e) => {
                        error!("{metric} calculator ended without a result ({e}); scoring it 0");
                        0.0
                    }
                };
                MetricResult::new(metric, score, dispatched.elapsed())
            }
        });

        let results = join_all(tasks).await;
        let report = ScoreReport::from_results(&results, &self.config.weights)
            .with_total_latency(started.elapsed());

        info!(
            "Scored {}: NetScore {:.2} in {} ms",
            snapshot.address, report.net_score, report.net_score_latency
        );
        report
    }
}
