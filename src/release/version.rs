//! Version literal replacement
//!
//! Target files are treated as plain text. A literal is the exact fragment
//! `"<key>": "<version>"`, so `package.json` is never parsed as JSON and the
//! test fixture in `__tests__` (a JS file) works the same way.
//!
//! Edits are split in two steps so a release can verify every target before
//! it writes any of them:
//!
//! 1. [`VersionEdit::prepare`] reads the file, checks the old literal is
//!    present and computes the new contents
//! 2. [`VersionEdit::apply`] writes the new contents back

use crate::core::error::{ReleaseResult, ResultExt, VersionError};
use std::fs;
use std::path::{Path, PathBuf};

/// Render the literal for `key` at `version`
pub fn version_literal(key: &str, version: &str) -> String {
  format!("\"{}\": \"{}\"", key, version)
}

/// A verified, not yet written, version replacement in one file
#[derive(Debug)]
pub struct VersionEdit {
  path: PathBuf,
  old_literal: String,
  new_literal: String,
  contents: String,
  occurrences: usize,
}

impl VersionEdit {
  /// Read `path` and replace every `old_literal` with `new_literal` in memory
  ///
  /// Fails without touching the file when `old_literal` does not appear
  /// verbatim.
  pub fn prepare(path: &Path, old_literal: &str, new_literal: &str) -> ReleaseResult<Self> {
    let original =
      fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let occurrences = original.matches(old_literal).count();
    if occurrences == 0 {
      return Err(
        VersionError::LiteralNotFound {
          path: path.to_path_buf(),
          literal: old_literal.to_string(),
        }
        .into(),
      );
    }

    Ok(Self {
      path: path.to_path_buf(),
      old_literal: old_literal.to_string(),
      new_literal: new_literal.to_string(),
      contents: original.replace(old_literal, new_literal),
      occurrences,
    })
  }

  /// Write the replaced contents back to disk
  pub fn apply(&self) -> ReleaseResult<()> {
    fs::write(&self.path, &self.contents).with_context(|| format!("Failed to write {}", self.path.display()))?;
    log::debug!(
      "{}: replaced {} occurrence(s) of {} with {}",
      self.path.display(),
      self.occurrences,
      self.old_literal,
      self.new_literal
    );
    Ok(())
  }

  /// Number of literals that will be replaced
  pub fn occurrences(&self) -> usize {
    self.occurrences
  }
}
