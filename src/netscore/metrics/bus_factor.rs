//! Bus factor: contributor-concentration risk

use crate::netscore::config::BusFactorSteps;

/// Step function over the contributor count.
///
/// With the default steps: ≥10 → 1.0, ≥5 → 0.7, ≥2 → 0.4, otherwise 0.1.
#[must_use]
pub fn bus_factor_score(contributor_count: u64, steps: &BusFactorSteps) -> f64 {
    steps
        .steps
        .iter()
        .find(|(min_contributors, _)| contributor_count >= *min_contributors)
        .map_or(steps.floor, |(_, score)| *score)
}
