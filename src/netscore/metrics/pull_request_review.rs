//! Pull request review: share of merged pull requests that were approved

use crate::github::{MergedPullRequest, ScoreResult};

/// `approved / merged`; a repository without merged pull requests scores 0.
#[must_use]
pub fn pull_request_review_score(merged: &[MergedPullRequest]) -> f64 {
    if merged.is_empty() {
        return 0.0;
    }
    let approved = merged.iter().filter(|pr| pr.approved).count();
    approved as f64 / merged.len() as f64
}

/// Unreadable pull requests score 0.
pub(crate) fn evaluate_pull_request_review(
    merged: &ScoreResult<Vec<MergedPullRequest>>,
) -> f64 {
    merged.as_ref().map_or(0.0, |merged| pull_request_review_score(merged))
}
