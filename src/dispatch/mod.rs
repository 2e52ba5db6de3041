//! Action dispatch for the affected set
//!
//! Decides what happens with the affected project names, in this order:
//! 1. `--json`: print the names as a JSON array (even when empty)
//! 2. nothing affected: say so
//! 3. `log` action: list the names
//! 4. anything else: run `<runner> --target=<action> --projects=<names> <extra>`
//!
//! The dispatcher never exits the process. It returns an `Outcome` and
//! `main` turns that into an exit code.

pub mod command;
pub mod options;
pub mod spawner;

pub use command::DelegatedCommand;
pub use options::{AffectedArgs, DispatchOptions};
pub use spawner::{ProcessSpawner, ShellSpawner};

use crate::core::error::TrafResult;
use crate::ui::Notifier;
use std::io::Write;

/// Result of a dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  /// Handled in-process
  Success,
  /// A delegated command ran; carries the code the host should exit with
  DelegatedExit(i32),
}

impl Outcome {
  /// Process exit code for this outcome
  pub fn exit_code(self) -> i32 {
    match self {
      Outcome::Success => 0,
      Outcome::DelegatedExit(code) => code,
    }
  }
}

/// Routes an affected set to output or a delegated command.
pub struct Dispatcher<'a> {
  notifier: &'a dyn Notifier,
  spawner: &'a dyn ProcessSpawner,
  /// Command prefix for delegated actions
  runner: String,
}

impl<'a> Dispatcher<'a> {
  pub fn new(notifier: &'a dyn Notifier, spawner: &'a dyn ProcessSpawner, runner: impl Into<String>) -> Self {
    Self {
      notifier,
      spawner,
      runner: runner.into(),
    }
  }

  /// Dispatch `affected` according to `options`.
  ///
  /// `out` receives the JSON document in `--json` mode; everything else goes
  /// through the notifier.
  pub fn dispatch(&self, options: &DispatchOptions, affected: &[String], out: &mut dyn Write) -> TrafResult<Outcome> {
    if options.json {
      writeln!(out, "{}", serde_json::to_string(affected)?)?;
      out.flush()?;
      return Ok(Outcome::Success);
    }

    if affected.is_empty() {
      self.notifier.notify("No affected projects");
      return Ok(Outcome::Success);
    }

    if options.is_log_action() {
      let listing: Vec<String> = affected.iter().map(|name| format!(" - {}", name)).collect();
      self
        .notifier
        .notify(&format!("Affected projects:\n{}", listing.join("\n")));
      return Ok(Outcome::Success);
    }

    let command = DelegatedCommand::new(&self.runner, &options.action, affected, &options.extra_args);
    self
      .notifier
      .notify(&format!("Running command: {}", command.to_shell_line()));

    let code = self.spawner.run(&command, &options.cwd)?;
    if code.is_none() {
      tracing::warn!("delegated command terminated without an exit code, reporting success");
    }

    Ok(Outcome::DelegatedExit(code.unwrap_or(0)))
  }
}
