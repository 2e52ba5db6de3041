//! `traf affected [action]` - act on the projects affected since a base revision
//!
//! Pipeline:
//! 1. Load workspace projects (project.json / workspace.json)
//! 2. Keep the eligible ones (build target with a tsConfig)
//! 3. Compute the affected set against the base revision
//! 4. Dispatch: JSON, log, or delegated run-many

use crate::core::context::WorkspaceContext;
use crate::core::error::TrafResult;
use crate::dispatch::{AffectedArgs, DispatchOptions, Dispatcher, Outcome, ProcessSpawner, ShellSpawner};
use crate::graph::{AffectedCalculator, AffectedRequest, GitAffectedCalculator};
use crate::ui::{ConsoleNotifier, Notifier};
use crate::workspace::{NxProjectRepository, ProjectRepository, filter_eligible};
use std::io::Write;

/// The collaborators one affected run talks to.
pub struct AffectedPipeline<'a> {
  pub repository: &'a dyn ProjectRepository,
  pub calculator: &'a dyn AffectedCalculator,
  pub notifier: &'a dyn Notifier,
  pub spawner: &'a dyn ProcessSpawner,
  /// Command prefix for delegated actions
  pub runner: &'a str,
}

impl AffectedPipeline<'_> {
  /// Run the pipeline. Collaborator errors are returned as-is.
  pub fn run(&self, options: &DispatchOptions, out: &mut dyn Write) -> TrafResult<Outcome> {
    let projects = self.repository.load_projects(&options.cwd)?;
    let eligible = filter_eligible(&projects);

    tracing::debug!(
      total = projects.len(),
      eligible = eligible.len(),
      base = %options.base,
      "prepared affected request"
    );

    let request = AffectedRequest {
      cwd: options.cwd.clone(),
      root_ts_config: options.ts_config_file_path.clone(),
      base: options.base.clone(),
      projects: eligible,
    };

    if tracing::enabled!(tracing::Level::TRACE) {
      let json = serde_json::to_string(&request)?;
      tracing::trace!(request = %json, "affected request");
    }

    let affected = self.calculator.calculate(&request)?;
    tracing::debug!(?affected, "affected projects");

    Dispatcher::new(self.notifier, self.spawner, self.runner).dispatch(options, &affected, out)
  }
}

/// Run the affected command with the default collaborators
pub fn run_affected(ctx: &WorkspaceContext, args: AffectedArgs) -> TrafResult<Outcome> {
  let options = DispatchOptions::resolve(args, ctx.workspace_root().to_path_buf(), ctx.config.as_ref())?;
  let config = ctx.config_or_default();

  let repository = NxProjectRepository::new(config.exclude.clone());
  let notifier = ConsoleNotifier::new();

  let pipeline = AffectedPipeline {
    repository: &repository,
    calculator: &GitAffectedCalculator,
    notifier: &notifier,
    spawner: &ShellSpawner,
    runner: config.runner(),
  };

  pipeline.run(&options, &mut std::io::stdout())
}
