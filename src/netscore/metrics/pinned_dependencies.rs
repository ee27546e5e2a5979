//! Pinned dependencies: share of manifest dependencies fixed to one version

use crate::github::{ContentEntry, PackageManifest, ScoreResult};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

/// True for an exact `major.minor.patch` literal such as `1.2.3`.
#[must_use]
pub fn is_pinned(version: &str) -> bool {
    lazy_static! {
        static ref PINNED_RE: Result<Regex, regex::Error> = Regex::new(r"^\d+\.\d+\.\d+$");
    }
    PINNED_RE.as_ref().is_ok_and(|re| re.is_match(version))
}

/// Pinned fraction of one manifest.
///
/// `dependencies` and `devDependencies` are merged on their keys (the
/// `dependencies` entry wins a collision); non-string constraints are
/// ignored. A manifest without dependencies scores 1.0.
#[must_use]
pub fn manifest_pin_ratio(manifest: &PackageManifest) -> f64 {
    let mut seen = HashSet::new();
    let constraints: Vec<&str> = manifest
        .dependencies
        .iter()
        .chain(manifest.dev_dependencies.iter())
        .filter(|&(name, _)| seen.insert(name.as_str()))
        .filter_map(|(_, version)| version.as_str())
        .collect();

    if constraints.is_empty() {
        return 1.0;
    }

    let pinned = constraints.iter().filter(|v| is_pinned(v)).count();
    pinned as f64 / constraints.len() as f64
}

/// Mean pinned fraction across manifests, each weighted equally.
///
/// No manifests scores 1.0; a manifest that could not be fetched or parsed
/// contributes 0.0.
#[must_use]
pub fn pinned_dependencies_score(manifests: &[ScoreResult<PackageManifest>]) -> f64 {
    if manifests.is_empty() {
        return 1.0;
    }
    let total: f64 = manifests
        .iter()
        .map(|manifest| manifest.as_ref().map_or(0.0, manifest_pin_ratio))
        .sum();
    total / manifests.len() as f64
}

/// Root listing entries that are package manifests.
#[must_use]
pub fn manifest_entries<'a>(
    entries: &'a [ContentEntry],
    manifest_file_names: &[String],
) -> Vec<&'a ContentEntry> {
    entries
        .iter()
        .filter(|entry| {
            manifest_file_names
                .iter()
                .any(|name| name.eq_ignore_ascii_case(&entry.name))
        })
        .collect()
}

/// An unreadable listing scores 0; otherwise the fetched manifests are scored.
pub(crate) fn evaluate_pinned_dependencies(
    contents: &ScoreResult<Vec<ContentEntry>>,
    manifests: &[ScoreResult<PackageManifest>],
) -> f64 {
    if contents.is_err() {
        return 0.0;
    }
    pinned_dependencies_score(manifests)
}
