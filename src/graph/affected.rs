//! Affected project analysis
//!
//! Given the eligible projects and a base revision, determine:
//! - Which projects directly contain changed files (or whose build tsconfig changed)
//! - Which projects implicitly depend on those
//!
//! The result lists affected projects in request order. Callers treat that
//! order as significant, so it must be stable across runs.

use super::ProjectGraph;
use crate::core::error::TrafResult;
use crate::core::vcs::SystemGit;
use crate::workspace::EligibleProject;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

/// Input to an `AffectedCalculator`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedRequest {
  /// Workspace directory (absolute)
  pub cwd: PathBuf,

  /// Root TypeScript configuration, relative to `cwd` or absolute
  pub root_ts_config: PathBuf,

  /// Revision to compare against
  pub base: String,

  /// Eligible projects, in discovery order
  pub projects: Vec<EligibleProject>,
}

/// Computes the ordered list of affected project names.
pub trait AffectedCalculator {
  fn calculate(&self, request: &AffectedRequest) -> TrafResult<Vec<String>>;
}

/// Calculator backed by `git diff` against the base revision.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitAffectedCalculator;

impl AffectedCalculator for GitAffectedCalculator {
  fn calculate(&self, request: &AffectedRequest) -> TrafResult<Vec<String>> {
    let git = SystemGit::open(&request.cwd)?;
    let changed_files = git.changed_files_since(&request.base)?;

    tracing::debug!(
      work_tree = %git.work_tree().display(),
      base = %request.base,
      changed = changed_files.len(),
      "collected changed files"
    );

    Ok(affected_from_changes(request, &changed_files))
  }
}

/// Map changed files (relative to `request.cwd`) to affected project names.
///
/// Algorithm:
/// 1. A change to the root tsconfig affects every project
/// 2. Otherwise map files → projects by source root or build tsconfig
/// 3. Add everything that implicitly depends on a directly affected project
/// 4. Emit in request order
pub fn affected_from_changes(request: &AffectedRequest, changed_files: &[PathBuf]) -> Vec<String> {
  if changed_files.is_empty() || request.projects.is_empty() {
    return Vec::new();
  }

  let changed: Vec<PathBuf> = changed_files.iter().map(|p| normalize(p)).collect();

  let root_ts_config = normalize(
    request
      .root_ts_config
      .strip_prefix(&request.cwd)
      .unwrap_or(&request.root_ts_config),
  );
  if changed.iter().any(|f| f == &root_ts_config) {
    tracing::debug!(path = %root_ts_config.display(), "root tsconfig changed, every project is affected");
    return request.projects.iter().map(|p| p.name.clone()).collect();
  }

  let direct: Vec<&str> = request
    .projects
    .iter()
    .filter(|project| {
      let source_root = normalize(&project.source_root);
      let ts_config = normalize(&project.ts_config);
      changed.iter().any(|f| f.starts_with(&source_root) || f == &ts_config)
    })
    .map(|project| project.name.as_str())
    .collect();

  tracing::debug!(?direct, "directly affected projects");

  let graph = ProjectGraph::build(&request.projects);
  let affected = graph.with_dependents(direct);

  request
    .projects
    .iter()
    .filter(|project| affected.contains(&project.name))
    .map(|project| project.name.clone())
    .collect()
}

/// Drop `.` components so `./apps/web` and `apps/web` compare equal.
fn normalize(path: &Path) -> PathBuf {
  path.components().filter(|c| !matches!(c, Component::CurDir)).collect()
}
