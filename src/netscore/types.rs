//! Type definitions for scoring

use crate::github::{
    ContentEntry, IssueRecord, MergedPullRequest, PackageManifest, RepositoryAddress, ScoreResult,
};
use crate::netscore::config::MetricWeights;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// NetScore reported for a package that could not be scored
pub const FAILED_NET_SCORE: f64 = -1.0;

/// Round to two decimal places, half away from zero.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The seven metrics folded into the NetScore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    BusFactor,
    Correctness,
    RampUp,
    ResponsiveMaintainer,
    License,
    PinnedDependencies,
    PullRequestReview,
}

impl Metric {
    /// All metrics, in report order.
    pub const ALL: [Metric; 7] = [
        Metric::BusFactor,
        Metric::Correctness,
        Metric::RampUp,
        Metric::ResponsiveMaintainer,
        Metric::License,
        Metric::PinnedDependencies,
        Metric::PullRequestReview,
    ];

    #[inline]
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::BusFactor => "BusFactor",
            Self::Correctness => "Correctness",
            Self::RampUp => "RampUp",
            Self::ResponsiveMaintainer => "ResponsiveMaintainer",
            Self::License => "License",
            Self::PinnedDependencies => "PinnedDependencies",
            Self::PullRequestReview => "PullRequestReview",
        }
    }

    #[must_use]
    pub fn weight(&self, weights: &MetricWeights) -> f64 {
        match self {
            Self::BusFactor => weights.bus_factor,
            Self::Correctness => weights.correctness,
            Self::RampUp => weights.ramp_up,
            Self::ResponsiveMaintainer => weights.responsive_maintainer,
            Self::License => weights.license,
            Self::PinnedDependencies => weights.pinned_dependencies,
            Self::PullRequestReview => weights.pull_request_review,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one calculator run.
///
/// `score` is unrounded and always within [0,1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricResult {
    pub metric: Metric,
    pub score: f64,
    pub latency_ms: u64,
}

impl MetricResult {
    #[must_use]
    pub fn new(metric: Metric, score: f64, latency: Duration) -> Self {
        let score = if score.is_finite() {
            score.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            metric,
            score,
            latency_ms: u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
        }
    }

    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.metric.label()
    }
}

/// Everything the calculators read, fetched once per invocation.
///
/// Built fresh per invocation and never mutated afterwards; scoring the same
/// snapshot twice gives the same scores. The listing, manifests and merged
/// pull requests keep their fetch outcome so that a failed read degrades
/// only the metrics built on it.
#[derive(Debug, Clone, PartialEq)]
pub struct RepositorySnapshot {
    pub address: RepositoryAddress,
    pub stars: u64,
    pub forks: u64,
    pub open_issue_count: u64,
    pub license: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub contributor_count: u64,
    pub open_issues: Vec<IssueRecord>,
    pub closed_issues: Vec<IssueRecord>,
    pub top_level_contents: ScoreResult<Vec<ContentEntry>>,
    /// Manifests named in the listing, in listing order
    pub manifests: Vec<ScoreResult<PackageManifest>>,
    pub merged_pull_requests: ScoreResult<Vec<MergedPullRequest>>,
}

/// Final scoring output with stable, downstream-facing field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    #[serde(rename = "URL", skip_serializing_if = "Option::is_none", default)]
    pub url: Option<String>,
    #[serde(rename = "NetScore")]
    pub net_score: f64,
    #[serde(rename = "NetScoreLatency")]
    pub net_score_latency: u64,
    #[serde(rename = "RampUp")]
    pub ramp_up: f64,
    #[serde(rename = "RampUpLatency")]
    pub ramp_up_latency: u64,
    #[serde(rename = "Correctness")]
    pub correctness: f64,
    #[serde(rename = "CorrectnessLatency")]
    pub correctness_latency: u64,
    #[serde(rename = "BusFactor")]
    pub bus_factor: f64,
    #[serde(rename = "BusFactorLatency")]
    pub bus_factor_latency: u64,
    #[serde(rename = "ResponsiveMaintainer")]
    pub responsive_maintainer: f64,
    #[serde(rename = "ResponsiveMaintainerLatency")]
    pub responsive_maintainer_latency: u64,
    #[serde(rename = "License")]
    pub license: f64,
    #[serde(rename = "LicenseLatency")]
    pub license_latency: u64,
    #[serde(rename = "PinnedDependencies")]
    pub pinned_dependencies: f64,
    #[serde(rename = "PinnedDependenciesLatency")]
    pub pinned_dependencies_latency: u64,
    #[serde(rename = "PullRequestReview")]
    pub pull_request_review: f64,
    #[serde(rename = "PullRequestReviewLatency")]
    pub pull_request_review_latency: u64,
}

impl ScoreReport {
    /// Fold seven metric results into a report.
    ///
    /// NetScore is the weighted sum of the unrounded sub-scores, rounded to
    /// two decimals; reported sub-scores are rounded individually. The
    /// overall latency starts at 0; see [`ScoreReport::with_total_latency`].
    #[must_use]
    pub fn from_results(results: &[MetricResult], weights: &MetricWeights) -> Self {
        let find = |metric: Metric| {
            results
                .iter()
                .find(|r| r.metric == metric)
                .copied()
                .unwrap_or(MetricResult {
                    metric,
                    score: 0.0,
                    latency_ms: 0,
                })
        };

        let net: f64 = Metric::ALL
            .iter()
            .map(|m| m.weight(weights) * find(*m).score)
            .sum();

        let bus_factor = find(Metric::BusFactor);
        let correctness = find(Metric::Correctness);
        let ramp_up = find(Metric::RampUp);
        let responsive = find(Metric::ResponsiveMaintainer);
        let license = find(Metric::License);
        let pinned = find(Metric::PinnedDependencies);
        let review = find(Metric::PullRequestReview);

        Self {
            url: None,
            net_score: round2(net.clamp(0.0, 1.0)),
            net_score_latency: 0,
            ramp_up: round2(ramp_up.score),
            ramp_up_latency: ramp_up.latency_ms,
            correctness: round2(correctness.score),
            correctness_latency: correctness.latency_ms,
            bus_factor: round2(bus_factor.score),
            bus_factor_latency: bus_factor.latency_ms,
            responsive_maintainer: round2(responsive.score),
            responsive_maintainer_latency: responsive.latency_ms,
            license: round2(license.score),
            license_latency: license.latency_ms,
            pinned_dependencies: round2(pinned.score),
            pinned_dependencies_latency: pinned.latency_ms,
            pull_request_review: round2(review.score),
            pull_request_review_latency: review.latency_ms,
        }
    }

    /// Record the invocation's overall latency.
    #[must_use]
    pub fn with_total_latency(mut self, total: Duration) -> Self {
        self.net_score_latency = u64::try_from(total.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Attach the scored input URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Reported (rounded) score for one metric.
    #[must_use]
    pub fn score(&self, metric: Metric) -> f64 {
        match metric {
            Metric::BusFactor => self.bus_factor,
            Metric::Correctness => self.correctness,
            Metric::RampUp => self.ramp_up,
            Metric::ResponsiveMaintainer => self.responsive_maintainer,
            Metric::License => self.license,
            Metric::PinnedDependencies => self.pinned_dependencies,
            Metric::PullRequestReview => self.pull_request_review,
        }
    }

    /// Reported latency for one metric, in milliseconds.
    #[must_use]
    pub fn latency_ms(&self, metric: Metric) -> u64 {
        match metric {
            Metric::BusFactor => self.bus_factor_latency,
            Metric::Correctness => self.correctness_latency,
            Metric::RampUp => self.ramp_up_latency,
            Metric::ResponsiveMaintainer => self.responsive_maintainer_latency,
            Metric::License => self.license_latency,
            Metric::PinnedDependencies => self.pinned_dependencies_latency,
            Metric::PullRequestReview => self.pull_request_review_latency,
        }
    }

    /// Rating threshold check: every sub-score reaches `min`.
    #[must_use]
    pub fn meets_threshold(&self, min: f64) -> bool {
        Metric::ALL.iter().all(|m| self.score(*m) >= min)
    }
}

/// Record emitted instead of a report when scoring a package failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedScore {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "NetScore")]
    pub net_score: f64,
}

impl FailedScore {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            net_score: FAILED_NET_SCORE,
        }
    }
}
