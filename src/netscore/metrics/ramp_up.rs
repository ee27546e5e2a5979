//! Ramp-up: how easy the repository is to pick up for a new developer

use crate::github::{ContentEntry, EntryKind, ScoreResult};
use crate::netscore::config::{Indicator, IndicatorKind, RampUpIndicators};

fn matches(indicator: &Indicator, entry: &ContentEntry) -> bool {
    let kind_ok = match indicator.kind {
        IndicatorKind::Any => true,
        IndicatorKind::File => entry.kind == EntryKind::File,
        IndicatorKind::Directory => entry.kind == EntryKind::Directory,
    };
    kind_ok
        && indicator
            .names
            .iter()
            .any(|name| name.eq_ignore_ascii_case(&entry.name))
}

/// Count the satisfied indicators and normalise by `max_score`.
#[must_use]
pub fn ramp_up_score(entries: &[ContentEntry], indicators: &RampUpIndicators) -> f64 {
    if indicators.max_score <= 0.0 {
        return 0.0;
    }
    let present = indicators
        .indicators
        .iter()
        .filter(|indicator| entries.iter().any(|entry| matches(indicator, entry)))
        .count();

    (present as f64 / indicators.max_score).min(1.0)
}

/// An unreadable listing scores 0.
pub(crate) fn evaluate_ramp_up(
    contents: &ScoreResult<Vec<ContentEntry>>,
    indicators: &RampUpIndicators,
) -> f64 {
    contents
        .as_ref()
        .map_or(0.0, |entries| ramp_up_score(entries, indicators))
}
