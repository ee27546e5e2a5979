//! Correctness from the open-issue count

/// `1 / (1 + ln(1 + issues))`, with a perfect 1.0 for zero open issues.
#[must_use]
pub fn correctness_score(open_issue_count: u64) -> f64 {
    if open_issue_count == 0 {
        return 1.0;
    }
    let issues = open_issue_count as f64;
    1.0 / (1.0 + issues.ln_1p())
}
