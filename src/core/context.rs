//! Workspace context - resolved once per invocation, passed everywhere
//!
//! ```text
//! main.rs:
//!   WorkspaceContext::build(cwd) -> &WorkspaceContext
//!   |
//!   v
//! commands/affected.rs:
//!   run_affected(ctx, args)
//! ```

use crate::core::config::TrafConfig;
use crate::core::error::{TrafError, TrafResult, WorkspaceError};
use std::path::{Path, PathBuf};

/// Workspace-level data shared by the affected pipeline.
#[derive(Debug, Clone)]
pub struct WorkspaceContext {
  /// Workspace directory (absolute path)
  pub root: PathBuf,

  /// traf.toml, if the workspace has one
  pub config: Option<TrafConfig>,
}

impl WorkspaceContext {
  /// Build the context for `cwd`, which must already be absolute.
  pub fn build(cwd: &Path) -> TrafResult<Self> {
    if !cwd.is_dir() {
      return Err(TrafError::Workspace(WorkspaceError::MissingRoot {
        path: cwd.to_path_buf(),
      }));
    }

    let config = TrafConfig::load(cwd)?;

    Ok(Self {
      root: cwd.to_path_buf(),
      config,
    })
  }

  /// Config, or the all-defaults config when the workspace has none
  pub fn config_or_default(&self) -> TrafConfig {
    self.config.clone().unwrap_or_default()
  }

  pub fn workspace_root(&self) -> &Path {
    &self.root
  }
}
