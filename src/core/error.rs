//! Error types for sdk-release with contextual messages and exit codes
//!
//! Every failure aborts the release. Phases that already finished are not
//! rolled back, so errors carry enough context (and a help line where one is
//! useful) for a human to pick up from where the run stopped.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for sdk-release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, wrong --old, missing files)
  User = 1,
  /// System error (git, external tools, I/O)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for sdk-release
#[derive(Debug)]
pub enum ReleaseError {
  /// Configuration errors
  Config(ConfigError),

  /// Version literal errors
  Version(VersionError),

  /// Git operation errors
  Git(GitError),

  /// External tool errors (docs generator)
  Tool(ToolError),

  /// I/O errors
  Io { error: io::Error, context: Option<String> },

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },

  /// Categorized error with added context (keeps its exit code and help)
  Contextual { error: Box<ReleaseError>, context: String },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  ///
  /// Categorized variants are wrapped in [`ReleaseError::Contextual`] so
  /// their exit code and help text survive.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      ReleaseError::Io { error, context } => ReleaseError::Io {
        error,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
      },
      ReleaseError::Contextual { error, context } => ReleaseError::Contextual {
        error,
        context: format!("{}\n{}", ctx_str, context),
      },
      error => ReleaseError::Contextual {
        error: Box::new(error),
        context: ctx_str,
      },
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::Config(_) => ExitCode::User,
      ReleaseError::Version(_) => ExitCode::User,
      ReleaseError::Git(_) => ExitCode::System,
      ReleaseError::Tool(_) => ExitCode::System,
      ReleaseError::Io { .. } => ExitCode::System,
      ReleaseError::Message { .. } => ExitCode::User,
      ReleaseError::Contextual { error, .. } => error.exit_code(),
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Config(e) => e.help_message(),
      ReleaseError::Version(e) => e.help_message(),
      ReleaseError::Git(e) => e.help_message(),
      ReleaseError::Tool(e) => e.help_message(),
      ReleaseError::Message { help, .. } => help.clone(),
      ReleaseError::Io { .. } => None,
      ReleaseError::Contextual { error, .. } => error.help_message(),
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Config(e) => write!(f, "{}", e),
      ReleaseError::Version(e) => write!(f, "{}", e),
      ReleaseError::Git(e) => write!(f, "{}", e),
      ReleaseError::Tool(e) => write!(f, "{}", e),
      ReleaseError::Io { error, context } => {
        if let Some(ctx) = context {
          write!(f, "{}\nI/O error: {}", ctx, error)
        } else {
          write!(f, "I/O error: {}", error)
        }
      }
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
      ReleaseError::Contextual { error, context } => write!(f, "{}\n{}", error, context),
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io { error, .. } => Some(error),
      ReleaseError::Contextual { error, .. } => Some(error.as_ref()),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io {
      error: err,
      context: None,
    }
  }
}

impl From<String> for ReleaseError {
  fn from(msg: String) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<&str> for ReleaseError {
  fn from(msg: &str) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<toml_edit::de::Error> for ReleaseError {
  fn from(err: toml_edit::de::Error) -> Self {
    ReleaseError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<ConfigError> for ReleaseError {
  fn from(err: ConfigError) -> Self {
    ReleaseError::Config(err)
  }
}

impl From<VersionError> for ReleaseError {
  fn from(err: VersionError) -> Self {
    ReleaseError::Version(err)
  }
}

impl From<GitError> for ReleaseError {
  fn from(err: GitError) -> Self {
    ReleaseError::Git(err)
  }
}

impl From<ToolError> for ReleaseError {
  fn from(err: ToolError) -> Self {
    ReleaseError::Tool(err)
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Config file passed with --config does not exist
  NotFound { path: PathBuf },

  /// Missing or empty required field
  MissingField { field: String },

  /// Field has a value that cannot be used
  InvalidField { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Drop --config to use release.toml from the repository root, or the built-in defaults.".to_string())
      }
      ConfigError::InvalidField { field, .. } if field.contains("path") || field.contains("dirs") => {
        Some("Paths in release.toml are relative to the repository root.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => {
        write!(f, "Config file not found: {}", path.display())
      }
      ConfigError::MissingField { field } => {
        write!(f, "Missing required field in config: {}", field)
      }
      ConfigError::InvalidField { field, reason } => {
        write!(f, "Invalid value for '{}' in config: {}", field, reason)
      }
    }
  }
}

/// Version literal errors
#[derive(Debug)]
pub enum VersionError {
  /// The old version literal does not appear verbatim in a target file
  LiteralNotFound { path: PathBuf, literal: String },
}

impl VersionError {
  fn help_message(&self) -> Option<String> {
    match self {
      VersionError::LiteralNotFound { path, .. } => Some(format!(
        "Check that --old matches the version currently in {}. No file was modified.",
        path.display()
      )),
    }
  }
}

impl fmt::Display for VersionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      VersionError::LiteralNotFound { path, literal } => {
        write!(f, "Version literal {} not found in {}", literal, path.display())
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },

  /// Push failed
  PushFailed { remote: String, reason: String },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::PushFailed { reason, .. } => {
        if reason.contains("non-fast-forward") || reason.contains("rejected") {
          Some("The remote has commits you don't have. Pull, then push and tag by hand; earlier phases are already committed.".to_string())
        } else if reason.contains("no upstream") {
          Some("Set an upstream for the current branch with `git push -u origin <branch>`.".to_string())
        } else if reason.contains("Permission denied") || reason.contains("403") {
          Some("Check your SSH key or credential helper and your access to the remote.".to_string())
        } else {
          None
        }
      }
      GitError::RepoNotFound { path } => Some(format!(
        "Run sdk-release from inside the SDK checkout (checked: {})",
        path.display()
      )),
      GitError::CommandFailed { stderr, .. } if stderr.contains("nothing to commit") => {
        Some("Is --new the same as --old? Nothing changed in the working tree.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
      GitError::PushFailed { remote, reason } => {
        write!(f, "Push to {} failed: {}", remote, reason)
      }
    }
  }
}

/// External tool errors
#[derive(Debug)]
pub enum ToolError {
  /// Tool could not be started at all
  Launch { program: String, reason: String },

  /// Tool ran and exited unsuccessfully
  Failed { program: String, code: Option<i32> },
}

impl ToolError {
  fn help_message(&self) -> Option<String> {
    match self {
      ToolError::Launch { program, .. } => Some(format!(
        "Make sure {} exists and is executable. The version commit has already been pushed.",
        program
      )),
      ToolError::Failed { .. } => {
        Some("Fix the generator, then commit docs and create the tag by hand.".to_string())
      }
    }
  }
}

impl fmt::Display for ToolError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ToolError::Launch { program, reason } => {
        write!(f, "Failed to launch {}: {}", program, reason)
      }
      ToolError::Failed { program, code: Some(code) } => {
        write!(f, "{} exited with status {}", program, code)
      }
      ToolError::Failed { program, code: None } => {
        write!(f, "{} was terminated by a signal", program)
      }
    }
  }
}

/// Result type alias for sdk-release
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| Into::<ReleaseError>::into(e).context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| Into::<ReleaseError>::into(e).context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
