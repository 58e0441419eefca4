//! Release context - build once, pass to every phase
//!
//! ```text
//! main.rs:
//!   ReleaseContext::build() -> &ReleaseContext
//!   |
//!   v
//! release phases: bump_version, generate_docs, add_tag
//! ```

use crate::core::config::ReleaseConfig;
use crate::core::error::ReleaseResult;
use crate::core::vcs::SystemGit;
use crate::release::ReleaseDescriptor;
use std::path::{Path, PathBuf};

/// Shared state for one release run
pub struct ReleaseContext {
  /// Working tree root, every configured path resolves against it
  pub root: PathBuf,

  /// Loaded configuration (defaults when no release.toml exists)
  pub config: ReleaseConfig,

  /// Git backend rooted at `root`
  pub git: SystemGit,

  /// Old and new version
  pub release: ReleaseDescriptor,

  /// Print what would happen instead of doing it
  pub dry_run: bool,
}

impl ReleaseContext {
  /// Build the release context from the directory sdk-release runs in.
  ///
  /// Opens the git repository first so a wrong working directory fails
  /// before any file is read or written. `cwd` may be anywhere inside the
  /// working tree; an explicit `config_path` is taken relative to it.
  pub fn build(
    cwd: &Path,
    config_path: Option<&Path>,
    release: ReleaseDescriptor,
    dry_run: bool,
  ) -> ReleaseResult<Self> {
    let git = SystemGit::open(cwd)?.with_dry_run(dry_run);
    let root = git.work_tree().to_path_buf();
    log::debug!("git work tree: {}", root.display());

    let config_path = config_path.map(|p| cwd.join(p));
    let config = ReleaseConfig::load(&root, config_path.as_deref())?;

    Ok(Self {
      root,
      config,
      git,
      release,
      dry_run,
    })
  }

  /// Resolve a config-relative path against the repository root
  pub fn path(&self, relative: &Path) -> PathBuf {
    self.root.join(relative)
  }
}
