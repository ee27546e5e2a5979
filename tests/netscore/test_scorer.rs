//! Tests for the score aggregator over an in-memory source.

use super::support::{
    StaticSource, address, approved, failing_source, healthy_snapshot, healthy_source,
};
use netscore::{
    ContentEntry, IssueLists, IssueRecord, Metric, MergedPullRequest, MetricWeights,
    PackageManifest, RepositoryAddress, RepositoryMetadata, RepositorySource, ScoreConfig,
    ScoreError, ScoreReport, ScoreResult, Scorer,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn scorer(source: StaticSource) -> Scorer<StaticSource> {
    Scorer::with_source(source, ScoreConfig::default()).unwrap()
}

fn without_latencies(mut report: ScoreReport) -> ScoreReport {
    report.net_score_latency = 0;
    for latency in [
        &mut report.ramp_up_latency,
        &mut report.correctness_latency,
        &mut report.bus_factor_latency,
        &mut report.responsive_maintainer_latency,
        &mut report.license_latency,
        &mut report.pinned_dependencies_latency,
        &mut report.pull_request_review_latency,
    ] {
        *latency = 0;
    }
    report
}

#[tokio::test]
async fn test_healthy_repository_scores() {
    let report = scorer(healthy_source())
        .score_address(&address())
        .await
        .unwrap();

    assert_eq!(report.bus_factor, 1.0);
    assert_eq!(report.correctness, 0.42);
    assert_eq!(report.ramp_up, 0.5);
    assert_eq!(report.responsive_maintainer, 1.0);
    assert_eq!(report.license, 1.0);
    assert_eq!(report.pinned_dependencies, 1.0);
    assert_eq!(report.pull_request_review, 1.0);
    assert_eq!(report.net_score, 0.78);
    assert!(report.url.is_none());
}

#[tokio::test]
async fn test_snapshot_scoring_is_idempotent() {
    let scorer = scorer(healthy_source());

    let first = scorer.score_snapshot(healthy_snapshot()).await;
    let second = scorer.score_snapshot(healthy_snapshot()).await;

    assert_eq!(without_latencies(first), without_latencies(second));
}

#[tokio::test]
async fn test_snapshot_scoring_ignores_the_source() {
    let healthy = scorer(healthy_source())
        .score_snapshot(healthy_snapshot())
        .await;
    let failing = scorer(failing_source())
        .score_snapshot(healthy_snapshot())
        .await;

    assert_eq!(failing.net_score, 0.78);
    assert_eq!(without_latencies(healthy), without_latencies(failing));
}

#[tokio::test]
async fn test_failed_reads_in_snapshot_degrade_their_metrics() {
    let mut snapshot = healthy_snapshot();
    snapshot.top_level_contents = Err(ScoreError::Upstream("contents unavailable".to_string()));
    snapshot.manifests.clear();
    snapshot.merged_pull_requests = Err(ScoreError::Timeout {
        operation: "pulls".to_string(),
        duration: std::time::Duration::from_secs(10),
    });

    let report = scorer(healthy_source()).score_snapshot(snapshot).await;

    assert_eq!(report.ramp_up, 0.0);
    assert_eq!(report.pinned_dependencies, 0.0);
    assert_eq!(report.pull_request_review, 0.0);
    assert_eq!(report.net_score, 0.6);
}

/// Counts root listing reads.
struct CountingSource {
    inner: StaticSource,
    listings: Arc<AtomicUsize>,
}

impl RepositorySource for CountingSource {
    async fn repository(&self, address: &RepositoryAddress) -> ScoreResult<RepositoryMetadata> {
        self.inner.repository(address).await
    }

    async fn issues(&self, address: &RepositoryAddress) -> ScoreResult<IssueLists> {
        self.inner.issues(address).await
    }

    async fn contributor_count(&self, reference: &str) -> ScoreResult<u64> {
        self.inner.contributor_count(reference).await
    }

    fn default_contributors_reference(&self, address: &RepositoryAddress) -> String {
        self.inner.default_contributors_reference(address)
    }

    async fn top_level_contents(&self, address: &RepositoryAddress) -> ScoreResult<Vec<ContentEntry>> {
        self.listings.fetch_add(1, Ordering::SeqCst);
        self.inner.top_level_contents(address).await
    }

    async fn manifest(&self, entry: &ContentEntry) -> ScoreResult<PackageManifest> {
        self.inner.manifest(entry).await
    }

    async fn merged_pull_requests(
        &self,
        address: &RepositoryAddress,
    ) -> ScoreResult<Vec<MergedPullRequest>> {
        self.inner.merged_pull_requests(address).await
    }
}

#[tokio::test]
async fn test_listing_is_read_once_per_invocation() {
    let listings = Arc::new(AtomicUsize::new(0));
    let source = CountingSource {
        inner: healthy_source(),
        listings: Arc::clone(&listings),
    };
    let scorer = Scorer::with_source(source, ScoreConfig::default()).unwrap();

    let report = scorer.score_address(&address()).await.unwrap();

    assert_eq!(listings.load(Ordering::SeqCst), 1);
    assert_eq!(report.ramp_up, 0.5);
    assert_eq!(report.pinned_dependencies, 1.0);
}

#[tokio::test]
async fn test_pull_requests_in_issue_lists_count_as_issues() {
    let mut snapshot = healthy_snapshot();
    snapshot.closed_issues.truncate(1);
    snapshot.closed_issues.push(IssueRecord {
        number: 99,
        created_at: None,
        closed_at: None,
        is_pull_request: true,
    });

    // 2 closed (one a pull request) over 3 open
    let report = scorer(healthy_source()).score_snapshot(snapshot).await;
    assert_eq!(report.responsive_maintainer, 0.67);
}

#[tokio::test]
async fn test_snapshot_matches_fetched_data() {
    let snapshot = scorer(healthy_source()).snapshot(&address()).await.unwrap();
    assert_eq!(snapshot, healthy_snapshot());
}

#[tokio::test]
async fn test_score_url_attaches_input_url() {
    let report = scorer(healthy_source())
        .score_url("https://github.com/acme/widget")
        .await
        .unwrap();

    assert_eq!(report.url.as_deref(), Some("https://github.com/acme/widget"));
    assert_eq!(report.net_score, 0.78);
}

#[tokio::test]
async fn test_unsupported_url_fails_before_fetching() {
    let err = scorer(healthy_source())
        .score_url("https://gitlab.com/acme/widget")
        .await
        .unwrap_err();
    assert!(matches!(err, ScoreError::InvalidIdentifier(_)));
}

#[tokio::test]
async fn test_missing_required_data_fails_invocation() {
    let mut source = healthy_source();
    source.issues = None;

    let err = scorer(source).score_address(&address()).await.unwrap_err();
    assert!(err.is_upstream());

    let mut source = healthy_source();
    source.contributors = None;
    assert!(scorer(source).score_address(&address()).await.is_err());
}

#[tokio::test]
async fn test_optional_data_failures_degrade_locally() {
    let mut source = healthy_source();
    source.contents = None;
    source.merged = None;

    let report = scorer(source).score_address(&address()).await.unwrap();

    assert_eq!(report.ramp_up, 0.0);
    assert_eq!(report.pinned_dependencies, 0.0);
    assert_eq!(report.pull_request_review, 0.0);
    assert_eq!(report.bus_factor, 1.0);
    assert_eq!(report.responsive_maintainer, 1.0);
    // 0.10 + 0.25 * 0.4191 + 0.30 + 0.10
    assert_eq!(report.net_score, 0.6);
}

#[tokio::test]
async fn test_unreadable_manifest_scores_zero() {
    let mut source = healthy_source();
    source.manifests.clear();

    let report = scorer(source).score_address(&address()).await.unwrap();
    assert_eq!(report.pinned_dependencies, 0.0);
    assert_eq!(report.ramp_up, 0.5);
}

#[tokio::test]
async fn test_no_open_issues_is_not_responsive() {
    let mut snapshot = healthy_snapshot();
    snapshot.open_issues.clear();
    snapshot.open_issue_count = 0;

    let report = scorer(healthy_source()).score_snapshot(snapshot).await;

    assert_eq!(report.responsive_maintainer, 0.0);
    assert_eq!(report.correctness, 1.0);
}

#[tokio::test]
async fn test_partial_review_approval() {
    let mut source = healthy_source();
    source.merged = Some(vec![
        approved(1),
        MergedPullRequest {
            number: 2,
            merged_at: None,
            approved: false,
        },
    ]);

    let report = scorer(source).score_address(&address()).await.unwrap();
    assert_eq!(report.pull_request_review, 0.5);
}

#[tokio::test]
async fn test_net_score_stays_in_range() {
    let report = scorer(healthy_source())
        .score_snapshot(healthy_snapshot())
        .await;

    for metric in Metric::ALL {
        let score = report.score(metric);
        assert!((0.0..=1.0).contains(&score), "{metric} out of range: {score}");
    }
    assert!((0.0..=1.0).contains(&report.net_score));
}

#[test]
fn test_invalid_weights_are_rejected() {
    let config = ScoreConfig {
        weights: MetricWeights {
            license: 0.5,
            ..MetricWeights::default()
        },
        ..ScoreConfig::default()
    };

    let err = Scorer::with_source(healthy_source(), config).err().unwrap();
    assert!(matches!(err, ScoreError::ClientSetup(_)));
}
