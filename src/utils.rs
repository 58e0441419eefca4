//! Utility functions for path handling and command display

use std::path::Path;

/// Convert a path to Git format (always forward slashes)
///
/// Git expects paths with forward slashes, even on Windows.
/// This function converts backslashes to forward slashes for use in Git commands.
pub fn path_to_git_format(path: &Path) -> String {
  #[cfg(target_os = "windows")]
  {
    path.to_string_lossy().replace('\\', "/")
  }
  #[cfg(not(target_os = "windows"))]
  {
    path.to_string_lossy().to_string()
  }
}

/// Quote an argument for display when it contains whitespace or quotes
pub fn shell_quote(arg: &str) -> String {
  if !arg.is_empty() && !arg.contains(|c: char| c.is_whitespace() || c == '"' || c == '\'') {
    return arg.to_string();
  }
  format!("\"{}\"", arg.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Render a program and its arguments as a single line for logs and dry-run output
pub fn command_line<S: AsRef<str>>(program: &str, args: &[S]) -> String {
  let mut line = shell_quote(program);
  for arg in args {
    line.push(' ');
    line.push_str(&shell_quote(arg.as_ref()));
  }
  line
}
