//! License compatibility

/// 1.0 when `license_name` is on the allow-list (exact match), else 0.0.
#[must_use]
pub fn license_score(license_name: &str, allow_list: &[String]) -> f64 {
    if allow_list.iter().any(|allowed| allowed == license_name) {
        1.0
    } else {
        0.0
    }
}
