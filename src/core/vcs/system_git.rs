//! System git backend
//!
//! Every operation is one `git` subprocess run against the working tree root.
//! git inherits the caller's environment, so identity, credential helpers and
//! signing keys resolve the same way they do for a plain `git` call.
//! Mutating operations honor dry-run mode: the command line is printed and
//! nothing runs.

use crate::core::error::{GitError, ReleaseError, ReleaseResult, ResultExt};
use crate::utils::{command_line, path_to_git_format};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Git backend using system git
pub struct SystemGit {
  /// Working tree root, every command runs with `-C` here
  pub(crate) work_tree: PathBuf,

  /// Print mutating commands instead of running them
  dry_run: bool,
}

impl SystemGit {
  /// Open the git repository containing `path`
  ///
  /// `path` may be any directory inside the working tree. This performs ONE
  /// subprocess call to get the repository metadata.
  pub fn open(path: &Path) -> ReleaseResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(ReleaseError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(ReleaseError::message(format!("Failed to open git repository: {}", stderr)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let work_tree = stdout.trim();

    Ok(Self {
      work_tree: PathBuf::from(work_tree),
      dry_run: false,
    })
  }

  /// Switch dry-run mode on or off
  pub fn with_dry_run(mut self, dry_run: bool) -> Self {
    self.dry_run = dry_run;
    self
  }

  /// Working tree root reported by git
  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// Stage paths (relative to the working tree root)
  pub fn add(&self, paths: &[PathBuf]) -> ReleaseResult<()> {
    if paths.is_empty() {
      return Ok(());
    }

    let mut args: Vec<OsString> = vec!["add".into(), "--".into()];
    args.extend(paths.iter().map(|p| OsString::from(path_to_git_format(p))));
    self.run_mutating(&args)?;
    Ok(())
  }

  /// Create a commit from the index
  pub fn commit(&self, message: &str) -> ReleaseResult<()> {
    self.run_mutating(&["commit".into(), "-m".into(), message.into()])?;
    Ok(())
  }

  /// Push the current branch to its upstream
  pub fn push(&self) -> ReleaseResult<()> {
    self.push_with(&["push".into()], "upstream")
  }

  /// Create an annotated tag at HEAD
  pub fn tag_annotated(&self, name: &str, message: &str) -> ReleaseResult<()> {
    self.run_mutating(&["tag".into(), "-a".into(), name.into(), "-m".into(), message.into()])?;
    Ok(())
  }

  /// Push all tags to a remote
  pub fn push_tags(&self, remote: &str) -> ReleaseResult<()> {
    self.push_with(&["push".into(), remote.into(), "--tags".into()], remote)
  }

  /// Check whether the index differs from HEAD
  ///
  /// Read-only, so it runs in dry-run mode too.
  pub fn has_staged_changes(&self) -> ReleaseResult<bool> {
    let output = self
      .git_cmd()
      .args(["diff", "--cached", "--quiet"])
      .output()
      .context("Failed to run git diff")?;

    // --quiet exits 1 when there are differences, anything else is an error
    match output.status.code() {
      Some(0) => Ok(false),
      Some(1) => Ok(true),
      _ => Err(ReleaseError::Git(GitError::CommandFailed {
        command: "git diff --cached --quiet".to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
      })),
    }
  }

  fn push_with(&self, args: &[OsString], remote: &str) -> ReleaseResult<()> {
    match self.run_mutating(args) {
      Err(ReleaseError::Git(GitError::CommandFailed { stderr, .. })) => Err(ReleaseError::Git(GitError::PushFailed {
        remote: remote.to_string(),
        reason: stderr.trim().to_string(),
      })),
      other => other.map(|_| ()),
    }
  }

  /// Run a git command that changes the repository or remote
  ///
  /// Returns `None` in dry-run mode.
  fn run_mutating(&self, args: &[OsString]) -> ReleaseResult<Option<Output>> {
    let rendered: Vec<String> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
    let display = command_line("git", &rendered);

    if self.dry_run {
      println!("   [dry-run] {}", display);
      return Ok(None);
    }

    log::debug!("running: {}", display);
    let output = self
      .git_cmd()
      .args(args)
      .output()
      .with_context(|| format!("Failed to execute {}", display))?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      let stdout = String::from_utf8_lossy(&output.stdout);
      // git commit reports "nothing to commit" on stdout
      let detail = if stderr.trim().is_empty() { stdout } else { stderr };
      return Err(ReleaseError::Git(GitError::CommandFailed {
        command: display,
        stderr: detail.to_string(),
      }));
    }

    Ok(Some(output))
  }

  /// Create a git command rooted at the working tree
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.work_tree);
    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII

    cmd
  }
}
