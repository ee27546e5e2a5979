//! Responsive maintainer: closed versus open issues in the activity window

/// `min(1, closed / open)`; zero open issues score 0 rather than a perfect 1.
#[must_use]
pub fn responsiveness_score(open_count: usize, closed_count: usize) -> f64 {
    if open_count == 0 {
        return 0.0;
    }
    let ratio = closed_count as f64 / open_count as f64;
    ratio.min(1.0)
}
