use serde::Serialize;
use std::path::PathBuf;

/// A workspace build unit as reported by a `ProjectRepository`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
  /// Unique project name
  pub name: String,

  /// Source directory, relative to the workspace root
  pub source_root: PathBuf,

  /// Projects this one depends on without a source reference
  /// `None` when the manifest does not declare the field at all
  pub implicit_dependencies: Option<Vec<String>>,

  /// The `build` target, if the project declares one
  pub build: Option<BuildTarget>,
}

/// The parts of a `build` target traf cares about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildTarget {
  /// `options.tsConfig`, relative to the workspace root
  pub ts_config: Option<PathBuf>,
}

impl Project {
  /// tsConfig of the build target, if both exist
  pub fn build_ts_config(&self) -> Option<&PathBuf> {
    self.build.as_ref().and_then(|b| b.ts_config.as_ref())
  }
}

/// A project that passed the eligibility filter.
///
/// Carries exactly what the affected calculator consumes; the tsConfig is no
/// longer optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibleProject {
  pub name: String,
  pub source_root: PathBuf,
  pub implicit_dependencies: Vec<String>,
  pub ts_config: PathBuf,
}
