//! Release command implementation
//!
//! Runs the phases in fixed order and reports progress:
//! bump_version → generate_docs → add_tag → confirmation.

use crate::core::context::ReleaseContext;
use crate::core::error::ReleaseResult;
use crate::release::{self, ReleaseDescriptor};
use std::env;
use std::path::PathBuf;

/// Run a full release of the repository containing the current directory
pub fn run_release(old: String, new: String, config: Option<PathBuf>, dry_run: bool) -> ReleaseResult<()> {
  let root = env::current_dir()?;
  let ctx = ReleaseContext::build(&root, config.as_deref(), ReleaseDescriptor::new(old, new), dry_run)?;

  println!(
    "📦 Releasing {} {} → {}",
    ctx.config.package.name, ctx.release.old_version, ctx.release.new_version
  );
  if dry_run {
    println!("🔍 Dry-run mode (no changes applied)");
  }
  println!();

  println!("1/3 Bumping version");
  let staged = release::bump_version(&ctx)?;
  log::info!("version commit staged {} path(s)", staged.len());

  println!("2/3 Updating docs");
  release::generate_docs(&ctx)?;

  println!("3/3 Tagging release");
  let tag = release::add_tag(&ctx)?;
  log::info!("tagged {}", tag);

  println!();
  if dry_run {
    println!("🔍 Dry run complete, {} was not released", ctx.release.new_version);
  } else {
    println!("🎉 Congratulations! {} is now released!", ctx.release.new_version);
  }

  Ok(())
}
