//! The three release phases, run in order by the release command

use crate::core::context::ReleaseContext;
use crate::core::error::ReleaseResult;
use crate::release::DOCS_COMMIT_MESSAGE;
use crate::release::tools::{run_docs_generator, upgrade_sample};
use crate::release::version::{VersionEdit, version_literal};
use std::path::PathBuf;

/// Bump version literals, refresh samples, commit and push
///
/// Every target file is checked before the first one is written, so a wrong
/// `--old` leaves the working tree untouched.
///
/// Returns the paths that were staged.
pub fn bump_version(ctx: &ReleaseContext) -> ReleaseResult<Vec<PathBuf>> {
  let release = &ctx.release;
  let config = &ctx.config;

  let mut edits = Vec::with_capacity(config.version_files.len());
  for file in &config.version_files {
    let old = version_literal(&file.key, &release.old_version);
    let new = version_literal(&file.key, &release.new_version);
    edits.push((file.path.clone(), VersionEdit::prepare(&ctx.path(&file.path), &old, &new)?));
  }

  let mut staged = Vec::new();
  for (relative, edit) in &edits {
    if ctx.dry_run {
      println!(
        "   [dry-run] would update {} ({} occurrence(s))",
        relative.display(),
        edit.occurrences()
      );
    } else {
      edit.apply()?;
      println!("   Updated {}", relative.display());
    }
    staged.push(relative.clone());
  }

  for dir in &config.samples.dirs {
    let outcome = upgrade_sample(&config.samples.manager, &config.package.name, &ctx.path(dir), ctx.dry_run);
    if !outcome.is_success() {
      println!("   ⚠️  Sample {} was not upgraded", dir.display());
    }
  }

  for lock_file in config.samples.lock_files() {
    if ctx.dry_run || ctx.path(&lock_file).exists() {
      staged.push(lock_file);
    } else {
      log::warn!("{} does not exist, not staging it", lock_file.display());
      println!("   ⚠️  Skipping missing {}", lock_file.display());
    }
  }

  ctx.git.add(&staged)?;
  ctx.git.commit(&release.commit_message())?;
  ctx.git.push()?;
  println!("   Committed and pushed \"{}\"", release.commit_message());

  Ok(staged)
}

/// Regenerate docs, commit and push them
///
/// Returns false when the generator produced no changes and nothing was
/// committed.
pub fn generate_docs(ctx: &ReleaseContext) -> ReleaseResult<bool> {
  let docs = &ctx.config.docs;

  run_docs_generator(&ctx.root, &docs.script, ctx.dry_run)?;
  ctx.git.add(std::slice::from_ref(&docs.output))?;

  if !ctx.dry_run && !ctx.git.has_staged_changes()? {
    println!("   Docs unchanged, nothing to commit");
    return Ok(false);
  }

  ctx.git.commit(DOCS_COMMIT_MESSAGE)?;
  ctx.git.push()?;
  println!("   Committed and pushed \"{}\"", DOCS_COMMIT_MESSAGE);

  Ok(true)
}

/// Create the annotated release tag and push tags
///
/// Returns the tag name.
pub fn add_tag(ctx: &ReleaseContext) -> ReleaseResult<String> {
  let release = &ctx.release;
  let tag = release.tag_name(&ctx.config.tag_prefix);

  ctx.git.tag_annotated(&tag, &release.tag_message())?;
  ctx.git.push_tags(&ctx.config.git.remote)?;
  println!("   Created and pushed tag {}", tag);

  Ok(tag)
}
