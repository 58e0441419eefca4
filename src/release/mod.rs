//! Release pipeline for the SDK
//!
//! A release is one linear run with no branches, retries or rollback:
//!
//! ```text
//! Start → VersionBumped → DocsUpdated → Tagged → Done
//! ```
//!
//! - **version**: find and replace `"<key>": "<version>"` literals in tracked files
//! - **tools**: external collaborators (package manager, docs generator)
//! - **phases**: bump_version, generate_docs, add_tag
//!
//! A failure in any phase aborts the run. Whatever earlier phases committed
//! and pushed stays committed and pushed.

pub mod phases;
pub mod tools;
pub mod version;

pub use phases::{add_tag, bump_version, generate_docs};

/// Commit message for the generated docs
pub const DOCS_COMMIT_MESSAGE: &str = "Update docs";

/// The two version strings a release moves between
///
/// Both are opaque: no semver parsing, no check that they differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDescriptor {
  pub old_version: String,
  pub new_version: String,
}

impl ReleaseDescriptor {
  pub fn new(old_version: impl Into<String>, new_version: impl Into<String>) -> Self {
    Self {
      old_version: old_version.into(),
      new_version: new_version.into(),
    }
  }

  /// Message of the version bump commit
  pub fn commit_message(&self) -> String {
    format!("Version {}", self.new_version)
  }

  /// Name of the release tag
  pub fn tag_name(&self, prefix: &str) -> String {
    format!("{}{}", prefix, self.new_version)
  }

  /// Annotation message of the release tag
  pub fn tag_message(&self) -> String {
    format!("version {}", self.new_version)
  }
}
