//! Metric calculators
//!
//! Each calculator is a pure function reducing snapshot data to a value in
//! [0,1]. None of them fails: a calculator whose input could not be fetched
//! returns its floor score.

mod bus_factor;
mod correctness;
mod license;
mod pinned_dependencies;
mod pull_request_review;
mod ramp_up;
mod responsiveness;

pub use bus_factor::bus_factor_score;
pub use correctness::correctness_score;
pub use license::license_score;
pub use pinned_dependencies::{
    is_pinned, manifest_entries, manifest_pin_ratio, pinned_dependencies_score,
};
pub use pull_request_review::pull_request_review_score;
pub use ramp_up::ramp_up_score;
pub use responsiveness::responsiveness_score;

use crate::netscore::config::ScoreConfig;
use crate::netscore::types::{Metric, RepositorySnapshot};
use pinned_dependencies::evaluate_pinned_dependencies;
use pull_request_review::evaluate_pull_request_review;
use ramp_up::evaluate_ramp_up;

/// Compute one metric's unrounded score from the snapshot alone.
pub(crate) fn evaluate(metric: Metric, snapshot: &RepositorySnapshot, config: &ScoreConfig) -> f64 {
    match metric {
        Metric::BusFactor => bus_factor_score(snapshot.contributor_count, &config.bus_factor_steps),
        Metric::Correctness => correctness_score(snapshot.open_issue_count),
        Metric::RampUp => evaluate_ramp_up(&snapshot.top_level_contents, &config.ramp_up),
        Metric::ResponsiveMaintainer => {
            responsiveness_score(snapshot.open_issues.len(), snapshot.closed_issues.len())
        }
        Metric::License => license_score(&snapshot.license, &config.license_allow_list),
        Metric::PinnedDependencies => {
            evaluate_pinned_dependencies(&snapshot.top_level_contents, &snapshot.manifests)
        }
        Metric::PullRequestReview => evaluate_pull_request_review(&snapshot.merged_pull_requests),
    }
}
