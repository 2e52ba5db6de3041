//! Integration tests for log output and delegated actions

use crate::helpers::{BASE, TestWorkspace, run_traf, run_traf_ok};
use anyhow::Result;

/// Two projects (a, b) changed since `base`
fn changed_workspace() -> Result<TestWorkspace> {
  let ws = TestWorkspace::new()?;
  ws.add_project("a", "libs/a", &[])?;
  ws.add_project("b", "libs/b", &[])?;
  ws.add_project("c", "libs/c", &[])?;
  ws.commit("Add projects")?;
  ws.mark_base()?;

  ws.write_file("libs/a/src/index.ts", "export const value = 10;\n")?;
  ws.write_file("libs/b/src/index.ts", "export const value = 20;\n")?;
  ws.commit("Change a and b")?;
  Ok(ws)
}

#[test]
fn test_default_action_logs_projects() -> Result<()> {
  let ws = changed_workspace()?;

  let output = run_traf_ok(&ws.path, &["affected", "--base", BASE])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("TRAF"), "missing badge: {}", stdout);
  assert!(stdout.contains("Affected projects:\n - a\n - b"), "got: {}", stdout);
  assert!(!stdout.contains(" - c"));

  Ok(())
}

#[test]
fn test_nothing_affected_message() -> Result<()> {
  let ws = changed_workspace()?;
  ws.mark_base()?;

  let output = run_traf_ok(&ws.path, &["affected", "test", "--base", BASE])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("No affected projects"), "got: {}", stdout);
  assert!(!stdout.contains("Running command"));

  Ok(())
}

#[test]
fn test_json_accepts_any_action_text() -> Result<()> {
  let ws = changed_workspace()?;

  let output = run_traf_ok(&ws.path, &["affected", "build all", "--json", "--base", BASE])?;
  assert_eq!(String::from_utf8_lossy(&output.stdout), "[\"a\",\"b\"]\n");

  Ok(())
}

#[test]
fn test_empty_action_with_nothing_affected() -> Result<()> {
  let ws = changed_workspace()?;
  ws.mark_base()?;

  let output = run_traf(&ws.path, &["affected", "", "--base", BASE])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert_eq!(output.status.code(), Some(0));
  assert!(stdout.contains("No affected projects"), "got: {}", stdout);

  Ok(())
}

#[cfg(unix)]
mod delegated {
  use super::*;

  /// Runner script that records its arguments and exits with $EXIT_CODE
  fn install_runner(ws: &TestWorkspace, exit_code: i32) -> Result<()> {
    ws.write_file(
      "record.sh",
      &format!("printf '%s\\n' \"$@\" > args.txt\nexit {}\n", exit_code),
    )?;
    ws.write_file("traf.toml", &format!("base = \"{}\"\nrunner = \"sh record.sh\"\n", BASE))
  }

  #[test]
  fn test_delegated_command_shape() -> Result<()> {
    let ws = changed_workspace()?;
    install_runner(&ws, 0)?;

    let output = run_traf_ok(&ws.path, &["affected", "test", "--parallel=3"])?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(
      stdout.contains("Running command: sh record.sh --target=test --projects=a,b --parallel=3"),
      "got: {}",
      stdout
    );
    assert_eq!(
      ws.read_file("args.txt")?,
      "--target=test\n--projects=a,b\n--parallel=3\n"
    );

    Ok(())
  }

  #[test]
  fn test_pass_through_flag_forms() -> Result<()> {
    let ws = changed_workspace()?;
    install_runner(&ws, 0)?;

    run_traf_ok(
      &ws.path,
      &["affected", "build", "--configuration", "production", "--skip-nx-cache", "--", "--verbose"],
    )?;

    assert_eq!(
      ws.read_file("args.txt")?,
      "--target=build\n--projects=a,b\n--configuration=production\n--skip-nx-cache=true\n--verbose\n"
    );

    Ok(())
  }

  #[test]
  fn test_delegated_exit_code_is_propagated() -> Result<()> {
    let ws = changed_workspace()?;
    install_runner(&ws, 7)?;

    let output = run_traf(&ws.path, &["affected", "lint"])?;
    assert_eq!(output.status.code(), Some(7));

    Ok(())
  }

  #[test]
  fn test_json_never_spawns() -> Result<()> {
    let ws = changed_workspace()?;
    install_runner(&ws, 9)?;

    let output = run_traf_ok(&ws.path, &["affected", "test", "--json"])?;
    assert_eq!(String::from_utf8_lossy(&output.stdout), "[\"a\",\"b\"]\n");
    assert!(!ws.path.join("args.txt").exists());

    Ok(())
  }
}
