//! Integration tests for failure modes and exit codes

use crate::helpers::{TestWorkspace, run_traf};
use anyhow::Result;

#[test]
fn test_unknown_subcommand_fails() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_traf(&ws.path, &["unaffected"])?;
  assert!(!output.status.success());
  assert!(output.stdout.is_empty());

  Ok(())
}

#[test]
fn test_missing_base_revision_is_system_error() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_project("a", "libs/a", &[])?;
  ws.commit("Add a")?;

  let output = run_traf(&ws.path, &["affected", "--json", "--base", "does-not-exist"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(2));
  assert!(stderr.contains("Git command failed"), "got: {}", stderr);
  assert!(output.stdout.is_empty());

  Ok(())
}

#[test]
fn test_outside_git_repository() -> Result<()> {
  let dir = tempfile::TempDir::new()?;
  std::fs::write(dir.path().join("project.json"), "{ \"name\": \"solo\" }\n")?;

  let output = run_traf(dir.path(), &["affected", "--base", "main"])?;
  assert_eq!(output.status.code(), Some(2));

  Ok(())
}

#[test]
fn test_invalid_config_is_user_error() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("traf.toml", "runner = \"\"\n")?;

  let output = run_traf(&ws.path, &["affected"])?;
  assert_eq!(output.status.code(), Some(1));

  Ok(())
}

#[test]
fn test_malformed_project_json_is_user_error() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("libs/bad/project.json", "{ not json")?;

  let output = run_traf(&ws.path, &["affected", "--base", "main"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr.contains("project.json"), "got: {}", stderr);

  Ok(())
}

#[test]
fn test_missing_cwd_is_user_error() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_traf(&ws.path, &["affected", "--cwd", "no/such/dir"])?;
  assert_eq!(output.status.code(), Some(1));

  Ok(())
}
