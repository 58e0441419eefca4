mod commands;
mod core;
mod release;
mod utils;

use clap::Parser;
use crate::core::error::{ReleaseError, print_error};
use std::path::PathBuf;

/// Release the React Native SDK: bump versions, refresh samples, regenerate docs, tag
#[derive(Parser)]
#[command(name = "sdk-release")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Version being replaced (must appear verbatim in every version file)
  #[arg(long, value_name = "VERSION")]
  old: String,

  /// Version to release
  #[arg(long, value_name = "VERSION")]
  new: String,

  /// Path to release.toml (default: search the repository root, else built-in defaults)
  #[arg(long, value_name = "PATH")]
  config: Option<PathBuf>,

  /// Show every edit and command without changing anything
  #[arg(long)]
  dry_run: bool,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

  // Exits with a usage error before anything else runs when --old or --new is missing
  let cli = Cli::parse();

  if let Err(err) = commands::run_release(cli.old, cli.new, cli.config, cli.dry_run) {
    handle_error(err);
  }
}

fn handle_error(err: ReleaseError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
