mod commands;
mod core;
mod dispatch;
mod graph;
mod passthrough;
mod ui;
mod utils;
mod workspace;

use crate::core::context::WorkspaceContext;
use crate::core::error::{TrafError, print_error};
use crate::dispatch::{AffectedArgs, DispatchOptions};
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Run tasks only for the projects affected since a base revision
#[derive(Parser)]
#[command(name = "traf")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Run a command on affected projects
  ///
  /// Unrecognized flags (e.g. --parallel=3) are forwarded to the delegated
  /// action as --key=value, as is everything after `--`.
  Affected {
    /// Action to run on affected projects ("log" prints them)
    action: Option<String>,
    /// Working directory (default: current directory)
    #[arg(long)]
    cwd: Option<PathBuf>,
    /// Path to the root tsconfig file (default: tsconfig.base.json)
    #[arg(long = "tsConfigFilePath", alias = "ts-config-file-path")]
    ts_config_file_path: Option<PathBuf>,
    /// Base revision to compare against (default: origin/main)
    #[arg(long)]
    base: Option<String>,
    /// Output affected projects as a JSON array
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Magenta))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Magenta))),
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
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

/// Diagnostics go to stderr so `--json` output stays parseable.
/// Level comes from TRAF_LOG (default: warn).
fn init_tracing() {
  let filter = EnvFilter::try_from_env("TRAF_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();
}

fn main() {
  init_tracing();

  // Unknown flags belong to the delegated action; clap only sees the rest
  let split = passthrough::split_args(&Cli::command(), std::env::args_os());
  let cli = Cli::try_parse_from(split.clap_args).unwrap_or_else(|e| e.exit());

  let invocation_dir = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  let result = match cli.command {
    Commands::Affected {
      action,
      cwd,
      ts_config_file_path,
      base,
      json,
    } => {
      let args = AffectedArgs {
        action,
        cwd,
        ts_config_file_path,
        base,
        json,
        extra_args: split.forwarded,
      };
      let cwd = DispatchOptions::resolve_cwd(&args, &invocation_dir);
      WorkspaceContext::build(&cwd).and_then(|ctx| commands::run_affected(&ctx, args))
    }
  };

  match result {
    Ok(outcome) => std::process::exit(outcome.exit_code()),
    Err(err) => handle_error(err),
  }
}

fn handle_error(err: TrafError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
