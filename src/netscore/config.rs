//! Configuration for scoring operations

use log::warn;
use std::time::Duration;

/// Default repository API base
pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";

/// Default npm registry read API base
pub const DEFAULT_NPM_REGISTRY_BASE: &str = "https://registry.npmjs.org";

/// Relative weight of each metric in the composite NetScore.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricWeights {
    pub bus_factor: f64,
    pub correctness: f64,
    pub ramp_up: f64,
    pub responsive_maintainer: f64,
    pub license: f64,
    pub pinned_dependencies: f64,
    pub pull_request_review: f64,
}

impl MetricWeights {
    /// Sum of all seven weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.bus_factor
            + self.correctness
            + self.ramp_up
            + self.responsive_maintainer
            + self.license
            + self.pinned_dependencies
            + self.pull_request_review
    }

    /// Weights must be non-negative and sum to 1.0, otherwise NetScore leaves [0,1].
    pub fn validate(&self) -> Result<(), String> {
        let all = [
            self.bus_factor,
            self.correctness,
            self.ramp_up,
            self.responsive_maintainer,
            self.license,
            self.pinned_dependencies,
            self.pull_request_review,
        ];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err("metric weights must be finite and non-negative".to_string());
        }
        let total = self.total();
        if (total - 1.0).abs() > 1e-9 {
            return Err(format!("metric weights must sum to 1.0, got {total}"));
        }
        Ok(())
    }
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            bus_factor: 0.10,
            correctness: 0.25,
            ramp_up: 0.15,
            responsive_maintainer: 0.30,
            license: 0.10,
            pinned_dependencies: 0.05,
            pull_request_review: 0.05,
        }
    }
}

/// Step function mapping a contributor count to a bus factor score.
///
/// Steps are checked in order; the first whose `min_contributors` is reached wins.
#[derive(Debug, Clone, PartialEq)]
pub struct BusFactorSteps {
    pub steps: Vec<(u64, f64)>,
    pub floor: f64,
}

impl Default for BusFactorSteps {
    fn default() -> Self {
        Self {
            steps: vec![(10, 1.0), (5, 0.7), (2, 0.4)],
            floor: 0.1,
        }
    }
}

/// What kind of listing entry satisfies an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorKind {
    File,
    Directory,
    Any,
}

/// One ramp-up check: present when any listing entry matches one of `names`
/// (case-insensitive) with the right kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Indicator {
    pub label: &'static str,
    pub kind: IndicatorKind,
    pub names: Vec<String>,
}

impl Indicator {
    fn new(label: &'static str, kind: IndicatorKind, names: &[&str]) -> Self {
        Self {
            label,
            kind,
            names: names.iter().map(|n| (*n).to_string()).collect(),
        }
    }
}

/// Ramp-up indicators and the divisor that normalises their count.
#[derive(Debug, Clone, PartialEq)]
pub struct RampUpIndicators {
    pub indicators: Vec<Indicator>,
    pub max_score: f64,
}

impl Default for RampUpIndicators {
    fn default() -> Self {
        Self {
            indicators: vec![
                Indicator::new("readme", IndicatorKind::Any, &["readme.md"]),
                Indicator::new("contributing", IndicatorKind::Any, &["contributing.md"]),
                Indicator::new("source directory", IndicatorKind::Directory, &["src"]),
                Indicator::new("test directory", IndicatorKind::Directory, &["test"]),
                Indicator::new(
                    "manifest",
                    IndicatorKind::Any,
                    &["package.json", "requirements.txt", "build.gradle", "pom.xml"],
                ),
                // The root listing only shows `.circleci` and `.github`, not
                // the workflow files inside them.
                Indicator::new(
                    "ci config",
                    IndicatorKind::Any,
                    &[".travis.yml", ".circleci", ".github"],
                ),
            ],
            // Room for two indicators not yet checked
            max_score: 8.0,
        }
    }
}

/// Configuration for scoring operations
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    pub weights: MetricWeights,
    pub bus_factor_steps: BusFactorSteps,
    pub ramp_up: RampUpIndicators,
    pub license_allow_list: Vec<String>,
    pub manifest_file_names: Vec<String>,
    pub issue_window_months: u32,
    pub api_page_size: u8,
    pub review_concurrency: usize,
    pub api_timeout: Duration,
    pub github_api_base: String,
    pub npm_registry_base: String,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            weights: MetricWeights::default(),
            bus_factor_steps: BusFactorSteps::default(),
            ramp_up: RampUpIndicators::default(),
            license_allow_list: [
                "GNU General Public License v2.0",
                "GNU General Public License v3.0",
                "GNU Lesser General Public License v2.1",
                "GNU Lesser General Public License v3.0",
                "MIT License",
                "ISC License",
            ]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
            manifest_file_names: vec!["package.json".to_string()],
            issue_window_months: 3,
            api_page_size: 100, // GitHub API max
            review_concurrency: 10,
            api_timeout: Duration::from_secs(10),
            github_api_base: DEFAULT_GITHUB_API_BASE.to_string(),
            npm_registry_base: DEFAULT_NPM_REGISTRY_BASE.to_string(),
        }
    }
}

impl ScoreConfig {
    /// Defaults overlaid with `NETSCORE_API_TIMEOUT_SECS`, `GITHUB_API_URL`
    /// and `NPM_REGISTRY_URL` when they are set.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(secs) = std::env::var("NETSCORE_API_TIMEOUT_SECS") {
            match secs.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.api_timeout = Duration::from_secs(secs),
                _ => warn!("Ignoring invalid NETSCORE_API_TIMEOUT_SECS value '{secs}'"),
            }
        }
        if let Ok(base) = std::env::var("GITHUB_API_URL")
            && !base.trim().is_empty()
        {
            config.github_api_base = base.trim().trim_end_matches('/').to_string();
        }
        if let Ok(base) = std::env::var("NPM_REGISTRY_URL")
            && !base.trim().is_empty()
        {
            config.npm_registry_base = base.trim().trim_end_matches('/').to_string();
        }

        config
    }
}
