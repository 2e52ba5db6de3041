//! Utility functions for path handling

use std::path::{Component, Path, PathBuf};

/// Resolve `path` against `base` and normalize `.` and `..` lexically.
///
/// Does not touch the filesystem, so the result may not exist.
/// Absolute `path` values ignore `base`.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
  let joined = if path.is_absolute() { path.to_path_buf() } else { base.join(path) };

  let mut out = PathBuf::new();
  for component in joined.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        // Never pop past the root
        if !matches!(out.components().next_back(), Some(Component::RootDir | Component::Prefix(_)) | None) {
          out.pop();
        }
      }
      other => out.push(other.as_os_str()),
    }
  }
  out
}
