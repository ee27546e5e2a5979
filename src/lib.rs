//! `netscore` - composite trust scoring for open-source packages
//!
//! Resolves npm and GitHub package URLs to their GitHub repository, fetches
//! repository data through octocrab and folds seven metrics (bus factor,
//! correctness, ramp-up, responsiveness, license, pinned dependencies and
//! pull request review) into a weighted NetScore in [0,1].

// Module declarations
pub mod github;
pub mod netscore;
pub mod runtime;

// Re-export runtime types
pub use runtime::AsyncTask;

// Re-export GitHub client types
pub use github::{Credential, GitHubClient, GitHubClientBuilder};

// Re-export error types
pub use github::{ScoreError, ScoreResult};

// Re-export repository access
pub use github::{
    ContentEntry, EntryKind, GitHubSource, IssueLists, IssueRecord, MergedPullRequest,
    NO_LICENSE, PackageManifest, PackageResolver, RepositoryAddress, RepositoryMetadata,
    RepositorySource, normalize_repository_url, npm_package_name,
};

// Re-export scoring types
pub use netscore::{
    FAILED_NET_SCORE, FailedScore, Metric, MetricResult, MetricWeights, RepositorySnapshot,
    ScoreConfig, ScoreReport, Scorer, metrics,
};
