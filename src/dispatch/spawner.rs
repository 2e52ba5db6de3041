//! Process spawner for delegated actions

use super::command::DelegatedCommand;
use crate::core::error::TrafResult;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Runs a delegated command to completion.
pub trait ProcessSpawner {
  /// Run `command` in `cwd` with inherited stdio and wait for it.
  ///
  /// Returns the exit code, or `None` when the process had none (killed by a
  /// signal). A non-zero code is not an error.
  fn run(&self, command: &DelegatedCommand, cwd: &Path) -> TrafResult<Option<i32>>;
}

/// Spawner that hands the command line to the platform shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellSpawner;

impl ShellSpawner {
  fn shell_command(line: &str) -> Command {
    #[cfg(windows)]
    {
      let mut cmd = Command::new("cmd");
      cmd.arg("/C").arg(line);
      cmd
    }
    #[cfg(not(windows))]
    {
      let mut cmd = Command::new("sh");
      cmd.arg("-c").arg(line);
      cmd
    }
  }
}

impl ProcessSpawner for ShellSpawner {
  fn run(&self, command: &DelegatedCommand, cwd: &Path) -> TrafResult<Option<i32>> {
    let line = command.to_shell_line();
    tracing::debug!(%line, cwd = %cwd.display(), "spawning delegated command");

    let status = Self::shell_command(&line)
      .current_dir(cwd)
      .stdin(Stdio::inherit())
      .stdout(Stdio::inherit())
      .stderr(Stdio::inherit())
      .status()
      .map_err(|e| io::Error::new(e.kind(), format!("Failed to execute `{}`: {}", line, e)))?;

    tracing::debug!(?status, "delegated command finished");
    Ok(status.code())
  }
}
