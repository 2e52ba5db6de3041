//! Project discovery for Nx-style workspaces
//!
//! Two layouts are supported:
//! - `workspace.json` with a `projects` map (entries are a directory or an inline config)
//! - one `project.json` per project anywhere below the workspace root
//!
//! Discovery order is deterministic (sorted), so two runs over an unchanged
//! workspace always yield the same project sequence.

use super::project::{BuildTarget, Project};
use crate::core::error::{ResultExt, TrafError, TrafResult, WorkspaceError};
use rayon::prelude::*;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Source of workspace projects.
pub trait ProjectRepository {
  /// Load every project of the workspace rooted at `cwd`, in a stable order.
  fn load_projects(&self, cwd: &Path) -> TrafResult<Vec<Project>>;
}

/// Directories never searched for project.json
const EXCLUDED_DIRS: &[&str] = &[
  "node_modules",
  "dist",
  "build",
  "coverage",
  "tmp",
  ".git",
  ".nx",
  ".angular",
  ".next",
];

const PROJECT_MANIFEST: &str = "project.json";
const WORKSPACE_MANIFEST: &str = "workspace.json";

/// Reads Nx project configuration from disk.
#[derive(Debug, Clone, Default)]
pub struct NxProjectRepository {
  /// Extra directory names to skip (from traf.toml)
  exclude: Vec<String>,
}

/// project.json (minimal fields we care about)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectJson {
  #[serde(default)]
  name: Option<String>,
  #[serde(default)]
  root: Option<String>,
  #[serde(default)]
  source_root: Option<String>,
  #[serde(default)]
  implicit_dependencies: Option<Vec<String>>,
  #[serde(default, alias = "architect")]
  targets: HashMap<String, TargetJson>,
}

#[derive(Debug, Default, Deserialize)]
struct TargetJson {
  #[serde(default)]
  options: Option<TargetOptions>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TargetOptions {
  #[serde(default)]
  ts_config: Option<String>,
}

/// workspace.json
#[derive(Debug, Deserialize)]
struct WorkspaceJson {
  #[serde(default)]
  projects: BTreeMap<String, WorkspaceEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WorkspaceEntry {
  /// "web": "apps/web"
  Path(String),
  /// "web": { "root": "apps/web", ... }
  Inline(Box<ProjectJson>),
}

impl NxProjectRepository {
  pub fn new(exclude: Vec<String>) -> Self {
    Self { exclude }
  }

  fn should_exclude(&self, path: &Path) -> bool {
    match path.file_name().and_then(|n| n.to_str()) {
      Some(name) => EXCLUDED_DIRS.contains(&name) || self.exclude.iter().any(|e| e == name),
      None => false,
    }
  }

  /// Recursively collect project.json paths below `dir`, sorted.
  fn collect_manifests(&self, dir: &Path, out: &mut Vec<PathBuf>) -> TrafResult<()> {
    let mut entries = fs::read_dir(dir)
      .with_context(|| format!("Failed to read directory {}", dir.display()))?
      .collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
      let path = entry.path();
      // file_type() does not follow symlinks, which keeps us out of link cycles
      let file_type = entry.file_type().context("Failed to read directory entry")?;

      if file_type.is_dir() {
        if !self.should_exclude(&path) {
          self.collect_manifests(&path, out)?;
        }
      } else if file_type.is_file() && entry.file_name() == PROJECT_MANIFEST {
        out.push(path);
      }
    }

    Ok(())
  }

  fn load_from_workspace_json(&self, cwd: &Path, manifest: &Path) -> TrafResult<Vec<Project>> {
    let workspace: WorkspaceJson = read_json(manifest)?;

    workspace
      .projects
      .into_par_iter()
      .map(|(name, entry)| -> TrafResult<Project> {
        match entry {
          WorkspaceEntry::Path(dir) => {
            let project_manifest = cwd.join(&dir).join(PROJECT_MANIFEST);
            let json: ProjectJson = if project_manifest.is_file() {
              read_json(&project_manifest)?
            } else {
              ProjectJson::default()
            };
            Ok(into_project(json, Some(name), cwd, Path::new(&dir)))
          }
          WorkspaceEntry::Inline(json) => {
            let dir = PathBuf::from(json.root.clone().unwrap_or_default());
            Ok(into_project(*json, Some(name), cwd, &dir))
          }
        }
      })
      .collect()
  }

  fn load_from_project_json(&self, cwd: &Path) -> TrafResult<Vec<Project>> {
    let mut manifests = Vec::new();
    self.collect_manifests(cwd, &mut manifests)?;
    tracing::debug!(count = manifests.len(), "found project.json files");

    manifests
      .par_iter()
      .map(|manifest| -> TrafResult<Project> {
        let json: ProjectJson = read_json(manifest)?;
        let dir = manifest
          .parent()
          .map(|p| p.strip_prefix(cwd))
          .transpose()?
          .map(Path::to_path_buf)
          .unwrap_or_default();
        Ok(into_project(json, None, cwd, &dir))
      })
      .collect()
  }
}

impl ProjectRepository for NxProjectRepository {
  fn load_projects(&self, cwd: &Path) -> TrafResult<Vec<Project>> {
    let workspace_manifest = cwd.join(WORKSPACE_MANIFEST);

    let projects = if workspace_manifest.is_file() {
      tracing::debug!(path = %workspace_manifest.display(), "loading projects from workspace.json");
      self.load_from_workspace_json(cwd, &workspace_manifest)?
    } else {
      self.load_from_project_json(cwd)?
    };

    ensure_unique_names(cwd, &projects)?;
    tracing::debug!(count = projects.len(), "loaded workspace projects");
    Ok(projects)
  }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> TrafResult<T> {
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  serde_json::from_str(&content).map_err(|e| {
    TrafError::Workspace(WorkspaceError::InvalidManifest {
      path: path.to_path_buf(),
      reason: e.to_string(),
    })
  })
}

/// Convert a parsed manifest into a `Project`.
///
/// `dir` is the project directory relative to the workspace root. It names
/// the project when neither workspace.json nor the manifest does, and is the
/// source root when the manifest has none. A project at the workspace root
/// (`dir` empty) falls back to the name of `cwd` itself.
fn into_project(json: ProjectJson, name: Option<String>, cwd: &Path, dir: &Path) -> Project {
  let fallback_name = dir
    .file_name()
    .or_else(|| cwd.file_name())
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_default();

  let build = json.targets.get("build").map(|target| BuildTarget {
    ts_config: target
      .options
      .as_ref()
      .and_then(|o| o.ts_config.as_ref())
      .map(PathBuf::from),
  });

  Project {
    name: name.or(json.name).unwrap_or(fallback_name),
    source_root: json
      .source_root
      .map(PathBuf::from)
      .unwrap_or_else(|| dir.to_path_buf()),
    implicit_dependencies: json.implicit_dependencies,
    build,
  }
}

fn ensure_unique_names(cwd: &Path, projects: &[Project]) -> TrafResult<()> {
  let mut seen: HashMap<&str, &Project> = HashMap::new();
  for project in projects {
    if let Some(first) = seen.insert(&project.name, project) {
      return Err(TrafError::Workspace(WorkspaceError::DuplicateProject {
        name: project.name.clone(),
        first: cwd.join(&first.source_root),
        second: cwd.join(&project.source_root),
      }));
    }
  }
  Ok(())
}
