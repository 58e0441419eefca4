//! Core building blocks for sdk-release
//!
//! - **config**: release.toml parsing, defaults and validation
//! - **context**: everything a release run needs, built once in main
//! - **error**: error types with contextual help messages and exit codes
//! - **vcs**: git operations (SystemGit)

pub mod config;
pub mod context;
pub mod error;
pub mod vcs;
