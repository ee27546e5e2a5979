//! Repository API adapters
//!
//! Resolves package identifiers and reads repository data from GitHub
//! (through octocrab) and the npm registry.

pub mod address;
pub mod client;
pub mod credential;
pub mod error;
pub mod source;
pub mod util;

// Re-export client types
pub use client::{GitHubClient, GitHubClientBuilder};
pub use credential::Credential;

// Re-export error types
pub use error::{ScoreError, ScoreResult};
pub use util::spawn_task;

pub use address::RepositoryAddress;
pub use resolve_package::{PackageResolver, normalize_repository_url, npm_package_name};
pub use source::{GitHubSource, RepositorySource};

// Data types returned by the read operations
pub use get_contents::{ContentEntry, EntryKind, PackageManifest};
pub use get_repository::{NO_LICENSE, RepositoryMetadata};
pub use list_issues::{IssueLists, IssueRecord};
pub use list_merged_pull_requests::MergedPullRequest;

// Read operations (internal)
pub(crate) mod get_contents;
pub(crate) mod get_repository;
pub(crate) mod list_contributors;
pub(crate) mod list_issues;
pub(crate) mod list_merged_pull_requests;
pub(crate) mod resolve_package;
