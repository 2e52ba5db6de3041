//! System git backend
//!
//! Shells out to the `git` binary with an isolated environment. traf only
//! needs two things from git: "is this a checkout" and "which files differ
//! from the base revision" (tracked diffs plus untracked files).

use crate::core::error::{GitError, TrafError, TrafResult};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using system git (zero crate dependencies)
pub struct SystemGit {
  /// Directory git commands run in (the traf working directory)
  pub(crate) repo_path: PathBuf,

  /// Working tree root
  pub(crate) work_tree: PathBuf,
}

impl SystemGit {
  /// Open the git repository containing `path`
  pub fn open(path: &Path) -> TrafResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .map_err(|e| TrafError::Git(GitError::NotInstalled { reason: e.to_string() }))?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(TrafError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(TrafError::Git(GitError::CommandFailed {
        command: "git rev-parse --show-toplevel".to_string(),
        stderr: stderr.trim().to_string(),
      }));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let work_tree = stdout.trim();

    Ok(Self {
      repo_path: path.to_path_buf(),
      work_tree: PathBuf::from(work_tree),
    })
  }

  /// Working tree root of the repository
  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// Files that differ between `base` and the working tree.
  ///
  /// Paths are relative to the directory the repository was opened with;
  /// changes outside that directory are not reported. Uncommitted edits to
  /// tracked files and untracked (non-ignored) files count as changes.
  pub fn changed_files_since(&self, base: &str) -> TrafResult<Vec<PathBuf>> {
    let mut files = self.run_z(&["diff", "--name-only", "--relative", "--no-renames", "-z", base, "--"])?;
    let untracked = self.run_z(&["ls-files", "--others", "--exclude-standard", "-z"])?;

    let mut seen: HashSet<PathBuf> = files.iter().cloned().collect();
    files.extend(untracked.into_iter().filter(|path| seen.insert(path.clone())));

    Ok(files)
  }

  /// Run a git command whose stdout is a NUL-separated path list
  fn run_z(&self, args: &[&str]) -> TrafResult<Vec<PathBuf>> {
    let output = self
      .git_cmd()
      .args(args)
      .output()
      .map_err(|e| TrafError::Git(GitError::NotInstalled { reason: e.to_string() }))?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(TrafError::Git(GitError::CommandFailed {
        command: format!("git {}", args.join(" ")),
        stderr: stderr.trim().to_string(),
      }));
    }

    Ok(parse_name_only_z(&output.stdout))
  }

  /// Build a git command with safe defaults
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    // Set working directory
    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    cmd.arg("-c").arg("core.quotePath=false");

    cmd
  }
}

/// Parse NUL-separated `git diff --name-only -z` output
fn parse_name_only_z(stdout: &[u8]) -> Vec<PathBuf> {
  stdout
    .split(|b| *b == 0)
    .filter(|chunk| !chunk.is_empty())
    .map(|chunk| PathBuf::from(String::from_utf8_lossy(chunk).into_owned()))
    .collect()
}
