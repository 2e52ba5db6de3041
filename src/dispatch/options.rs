//! Validated options for one `traf affected` run

use crate::core::config::TrafConfig;
use crate::core::error::{ConfigError, TrafError, TrafResult};
use crate::utils::absolutize;
use std::path::{Path, PathBuf};

pub const DEFAULT_ACTION: &str = "log";
pub const DEFAULT_BASE: &str = "origin/main";
pub const DEFAULT_TS_CONFIG: &str = "tsconfig.base.json";

/// The action handled in-process instead of delegated
pub const LOG_ACTION: &str = "log";

/// Options exactly as parsed from the command line (all optional).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffectedArgs {
  pub action: Option<String>,
  pub cwd: Option<PathBuf>,
  pub ts_config_file_path: Option<PathBuf>,
  pub base: Option<String>,
  pub json: bool,
  /// Re-serialized pass-through flags, then raw args after `--`
  pub extra_args: Vec<String>,
}

/// Fully resolved options for the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOptions {
  /// Workspace directory (absolute)
  pub cwd: PathBuf,
  pub ts_config_file_path: PathBuf,
  pub action: String,
  pub base: String,
  pub json: bool,
  pub extra_args: Vec<String>,
}

impl DispatchOptions {
  /// Absolute working directory for `args`, relative to `invocation_dir`
  pub fn resolve_cwd(args: &AffectedArgs, invocation_dir: &Path) -> PathBuf {
    match &args.cwd {
      Some(cwd) => absolutize(invocation_dir, cwd),
      None => invocation_dir.to_path_buf(),
    }
  }

  /// Resolve CLI args against traf.toml and the built-in defaults.
  ///
  /// Precedence: flag > config > default.
  pub fn resolve(args: AffectedArgs, cwd: PathBuf, config: Option<&TrafConfig>) -> TrafResult<Self> {
    // Any action string is accepted; it only matters once a command is delegated
    let action = args.action.unwrap_or_else(|| DEFAULT_ACTION.to_string());

    let base = args
      .base
      .or_else(|| config.and_then(|c| c.base.clone()))
      .unwrap_or_else(|| DEFAULT_BASE.to_string());
    if base.trim().is_empty() {
      return Err(invalid("base", "the base revision must not be empty"));
    }

    let ts_config_file_path = args
      .ts_config_file_path
      .or_else(|| config.and_then(|c| c.ts_config.clone()))
      .unwrap_or_else(|| PathBuf::from(DEFAULT_TS_CONFIG));

    Ok(Self {
      cwd,
      ts_config_file_path,
      action,
      base,
      json: args.json,
      extra_args: args.extra_args,
    })
  }

  /// Whether the action runs in-process
  pub fn is_log_action(&self) -> bool {
    self.action == LOG_ACTION
  }
}

fn invalid(option: &str, reason: impl Into<String>) -> TrafError {
  TrafError::Config(ConfigError::InvalidOption {
    option: option.to_string(),
    reason: reason.into(),
  })
}
