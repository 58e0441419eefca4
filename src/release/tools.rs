//! External collaborators invoked during a release
//!
//! Both tools inherit stdout/stderr so their output shows up live, the same
//! way a developer would see it running them by hand.

use crate::core::error::{ReleaseResult, ToolError};
use crate::utils::command_line;
use std::path::Path;
use std::process::Command;

/// Result of refreshing one sample project
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeOutcome {
  /// Package manager exited successfully
  Upgraded,
  /// Package manager ran and exited non-zero (or was killed)
  Failed { code: Option<i32> },
  /// Package manager could not be started
  NotRun { reason: String },
  /// Dry-run: only printed
  Skipped,
}

impl UpgradeOutcome {
  pub fn is_success(&self) -> bool {
    matches!(self, UpgradeOutcome::Upgraded | UpgradeOutcome::Skipped)
  }
}

/// Run `<manager> upgrade <package> --latest` inside `sample_dir`
///
/// Never fails: a sample that does not upgrade is reported in the outcome and
/// logged, and the release carries on.
pub fn upgrade_sample(manager: &str, package: &str, sample_dir: &Path, dry_run: bool) -> UpgradeOutcome {
  let args = ["upgrade", package, "--latest"];
  let display = command_line(manager, &args);

  if dry_run {
    println!("   [dry-run] (cd {}) {}", sample_dir.display(), display);
    return UpgradeOutcome::Skipped;
  }

  log::debug!("running in {}: {}", sample_dir.display(), display);
  let outcome = match Command::new(manager).args(args).current_dir(sample_dir).status() {
    Ok(status) if status.success() => UpgradeOutcome::Upgraded,
    Ok(status) => UpgradeOutcome::Failed { code: status.code() },
    Err(e) => UpgradeOutcome::NotRun { reason: e.to_string() },
  };

  match &outcome {
    UpgradeOutcome::Failed { code } => log::warn!(
      "{} failed in {} (status {}), continuing",
      display,
      sample_dir.display(),
      code.map(|c| c.to_string()).unwrap_or_else(|| "signal".to_string())
    ),
    UpgradeOutcome::NotRun { reason } => {
      log::warn!("could not run {} in {}: {}", display, sample_dir.display(), reason)
    }
    _ => {}
  }

  outcome
}

/// Run the documentation generator script from the repository root
pub fn run_docs_generator(root: &Path, script: &Path, dry_run: bool) -> ReleaseResult<()> {
  let program = root.join(script);
  let display = program.display().to_string();

  if dry_run {
    println!("   [dry-run] {}", display);
    return Ok(());
  }

  log::debug!("running: {}", display);
  let status = Command::new(&program)
    .current_dir(root)
    .status()
    .map_err(|e| ToolError::Launch {
      program: display.clone(),
      reason: e.to_string(),
    })?;

  if !status.success() {
    return Err(
      ToolError::Failed {
        program: display,
        code: status.code(),
      }
      .into(),
    );
  }

  Ok(())
}
