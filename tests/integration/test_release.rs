//! Integration tests for a full `sdk-release` run

use crate::helpers::{SAMPLES, TestSdk, git, run_sdk_release, run_sdk_release_ok, run_sdk_release_with_env};
use anyhow::{Context, Result};
use tempfile::TempDir;

#[cfg(unix)]
#[test]
fn test_full_release() -> Result<()> {
  let sdk = TestSdk::new("1.2.0")?;
  let manager = sdk.fake_package_manager()?;
  sdk.write_config(&manager)?;

  let output = run_sdk_release_ok(&sdk.path, &["--old", "1.2.0", "--new", "1.3.0"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  // Both version files bumped
  let package_json = sdk.read_file("package.json")?;
  assert!(package_json.contains(r#""version": "1.3.0""#));
  assert!(!package_json.contains("1.2.0"));
  let fixture = sdk.read_file("__tests__/index.test.js")?;
  assert!(fixture.contains(r#""$lib_version": "1.3.0""#));

  // Version commit followed by docs commit
  assert_eq!(sdk.git_log(2)?, vec!["Update docs", "Version 1.3.0"]);

  let mut version_files = sdk.files_in_commit("HEAD~1")?;
  version_files.sort();
  let mut expected = vec!["__tests__/index.test.js".to_string(), "package.json".to_string()];
  expected.extend(SAMPLES.iter().map(|s| format!("Samples/{}/yarn.lock", s)));
  expected.sort();
  assert_eq!(version_files, expected);

  assert_eq!(sdk.files_in_commit("HEAD")?, vec!["docs/index.html"]);

  // Annotated tag with the release message
  let kind = git(&sdk.path, &["cat-file", "-t", "v1.3.0"])?;
  assert_eq!(String::from_utf8_lossy(&kind.stdout).trim(), "tag");
  let message = git(&sdk.path, &["tag", "-l", "--format=%(contents:subject)", "v1.3.0"])?;
  assert_eq!(String::from_utf8_lossy(&message.stdout).trim(), "version 1.3.0");

  // Everything reached the remote
  assert_eq!(sdk.remote_git(&["rev-parse", "main"])?, sdk.head()?);
  assert!(sdk.remote_git(&["tag", "-l"])?.lines().any(|t| t == "v1.3.0"));

  assert!(stdout.contains("Congratulations! 1.3.0 is now released!"));
  assert_eq!(sdk.status()?, "");

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_wrong_old_version_aborts_without_changes() -> Result<()> {
  let sdk = TestSdk::new("1.2.0")?;
  let head = sdk.head()?;
  let package_json = sdk.read_file("package.json")?;

  let output = run_sdk_release(&sdk.path, &["--old", "9.9.9", "--new", "1.3.0"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr.contains(r#""version": "9.9.9""#));
  assert!(stderr.contains("not found"));
  assert_eq!(sdk.read_file("package.json")?, package_json);
  assert_eq!(sdk.head()?, head);
  assert_eq!(sdk.status()?, "");
  assert_eq!(sdk.remote_git(&["tag", "-l"])?, "");

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_unchanged_docs_skip_docs_commit() -> Result<()> {
  let sdk = TestSdk::new("1.2.0")?;
  let manager = sdk.fake_package_manager()?;
  sdk.write_config(&manager)?;

  run_sdk_release_ok(&sdk.path, &["--old", "1.2.0", "--new", "1.3.0"])?;
  let output = run_sdk_release_ok(&sdk.path, &["--old", "1.3.0", "--new", "1.4.0"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  // The generator writes the same page every time
  assert!(stdout.contains("Docs unchanged"));
  assert_eq!(sdk.git_log(1)?, vec!["Version 1.4.0"]);

  let tags = sdk.remote_git(&["tag", "-l"])?;
  assert!(tags.lines().any(|t| t == "v1.3.0"));
  assert!(tags.lines().any(|t| t == "v1.4.0"));

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_failed_upgrades_do_not_stop_release() -> Result<()> {
  let sdk = TestSdk::new("1.2.0")?;
  git(&sdk.path, &["rm", "-q", "Samples/SimpleMixpanel/yarn.lock"])?;
  git(&sdk.path, &["commit", "-m", "Drop SimpleMixpanel lock file"])?;
  git(&sdk.path, &["push"])?;
  sdk.write_config(std::path::Path::new("sdk-release-no-such-package-manager"))?;

  let output = run_sdk_release_ok(&sdk.path, &["--old", "1.2.0", "--new", "1.3.0"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("was not upgraded"));
  assert!(stdout.contains("Skipping missing"));

  // Lock files were not touched, so only the version files changed
  let mut version_files = sdk.files_in_commit("HEAD~1")?;
  version_files.sort();
  assert_eq!(version_files, vec!["__tests__/index.test.js", "package.json"]);
  assert!(sdk.remote_git(&["tag", "-l"])?.lines().any(|t| t == "v1.3.0"));

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_custom_tag_prefix_and_remote() -> Result<()> {
  let sdk = TestSdk::new("2.0.0")?;
  git(&sdk.path, &["remote", "rename", "origin", "upstream"])?;
  let manager = sdk.fake_package_manager()?;
  std::fs::write(
    sdk.path.join("release.toml"),
    format!(
      "tag_prefix = \"release-\"\n\n[samples]\nmanager = \"{}\"\n\n[git]\nremote = \"upstream\"\n",
      manager.display()
    ),
  )?;
  git(&sdk.path, &["add", "release.toml"])?;
  git(&sdk.path, &["commit", "-m", "Add release config"])?;
  git(&sdk.path, &["push"])?;

  run_sdk_release_ok(&sdk.path, &["--old", "2.0.0", "--new", "2.1.0"])?;

  assert!(sdk.remote_git(&["tag", "-l"])?.lines().any(|t| t == "release-2.1.0"));

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_release_from_subdirectory_uses_repository_root() -> Result<()> {
  let sdk = TestSdk::new("1.2.0")?;
  let manager = sdk.fake_package_manager()?;
  sdk.write_config(&manager)?;

  let sample = sdk.path.join("Samples").join("MixpanelDemo");
  run_sdk_release_ok(&sample, &["--old", "1.2.0", "--new", "1.3.0"])?;

  // release.toml, version files and the docs script were all found at the root
  assert!(sdk.read_file("package.json")?.contains(r#""version": "1.3.0""#));
  assert!(sdk.read_file("__tests__/index.test.js")?.contains(r#""$lib_version": "1.3.0""#));
  assert!(sdk.read_file("Samples/MixpanelDemo/yarn.lock")?.contains("upgrade mixpanel-react-native --latest"));
  assert_eq!(sdk.git_log(2)?, vec!["Update docs", "Version 1.3.0"]);
  assert_eq!(sdk.files_in_commit("HEAD")?, vec!["docs/index.html"]);
  assert!(!sample.join("docs").exists());
  assert!(sdk.remote_git(&["tag", "-l"])?.lines().any(|t| t == "v1.3.0"));
  assert_eq!(sdk.status()?, "");

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_git_identity_from_xdg_config() -> Result<()> {
  let sdk = TestSdk::new("1.2.0")?;
  let manager = sdk.fake_package_manager()?;
  sdk.write_config(&manager)?;
  sdk.drop_local_identity()?;

  let home = TempDir::new()?;
  let xdg = TempDir::new()?;
  std::fs::create_dir_all(xdg.path().join("git"))?;
  std::fs::write(
    xdg.path().join("git").join("config"),
    "[user]\n\tname = Release Bot\n\temail = release-bot@example.com\n",
  )?;

  let home_dir = home.path().to_str().context("utf-8 temp path")?;
  let xdg_dir = xdg.path().to_str().context("utf-8 temp path")?;
  let output = run_sdk_release_with_env(
    &sdk.path,
    &["--old", "1.2.0", "--new", "1.3.0"],
    &[("HOME", home_dir), ("XDG_CONFIG_HOME", xdg_dir), ("GIT_CONFIG_NOSYSTEM", "1")],
  )?;

  assert!(
    output.status.success(),
    "stderr: {}",
    String::from_utf8_lossy(&output.stderr)
  );
  assert_eq!(sdk.author("HEAD~1")?, "Release Bot <release-bot@example.com>");
  assert_eq!(sdk.author("HEAD")?, "Release Bot <release-bot@example.com>");
  let tagger = git(&sdk.path, &["tag", "-l", "--format=%(taggername)", "v1.3.0"])?;
  assert_eq!(String::from_utf8_lossy(&tagger.stdout).trim(), "Release Bot");

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_git_identity_from_environment_variables() -> Result<()> {
  let sdk = TestSdk::new("1.2.0")?;
  let manager = sdk.fake_package_manager()?;
  sdk.write_config(&manager)?;
  sdk.drop_local_identity()?;

  // No global config at all, the identity only exists in the environment
  let empty = TempDir::new()?;
  let empty_dir = empty.path().to_str().context("utf-8 temp path")?;
  let output = run_sdk_release_with_env(
    &sdk.path,
    &["--old", "1.2.0", "--new", "1.3.0"],
    &[
      ("HOME", empty_dir),
      ("XDG_CONFIG_HOME", empty_dir),
      ("GIT_CONFIG_NOSYSTEM", "1"),
      ("GIT_AUTHOR_NAME", "CI Runner"),
      ("GIT_AUTHOR_EMAIL", "ci@example.com"),
      ("GIT_COMMITTER_NAME", "CI Runner"),
      ("GIT_COMMITTER_EMAIL", "ci@example.com"),
    ],
  )?;

  assert!(
    output.status.success(),
    "stderr: {}",
    String::from_utf8_lossy(&output.stderr)
  );
  assert_eq!(sdk.git_log(2)?, vec!["Update docs", "Version 1.3.0"]);
  assert_eq!(sdk.author("HEAD~1")?, "CI Runner <ci@example.com>");
  assert!(sdk.remote_git(&["tag", "-l"])?.lines().any(|t| t == "v1.3.0"));

  Ok(())
}
