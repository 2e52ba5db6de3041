//! Integration tests for affected-set computation (`traf affected --json`)

use crate::helpers::{BASE, TestWorkspace, json_names, run_traf_ok};
use anyhow::Result;

/// web -> ui, api standalone, docs has no build target
fn workspace() -> Result<TestWorkspace> {
  let ws = TestWorkspace::new()?;
  ws.add_project("api", "apps/api", &[])?;
  ws.add_project("web", "apps/web", &["ui"])?;
  ws.add_unbuildable_project("docs", "libs/docs")?;
  ws.add_project("ui", "libs/ui", &[])?;
  ws.commit("Add projects")?;
  ws.mark_base()?;
  Ok(ws)
}

#[test]
fn test_no_changes_is_empty_array() -> Result<()> {
  let ws = workspace()?;

  let output = run_traf_ok(&ws.path, &["affected", "--json", "--base", BASE])?;
  assert_eq!(String::from_utf8_lossy(&output.stdout), "[]\n");

  Ok(())
}

#[test]
fn test_source_change_includes_implicit_dependents() -> Result<()> {
  let ws = workspace()?;
  ws.write_file("libs/ui/src/index.ts", "export const value = 2;\n")?;
  ws.commit("Change ui")?;

  let output = run_traf_ok(&ws.path, &["affected", "--json", "--base", BASE])?;
  assert_eq!(json_names(&output)?, vec!["web", "ui"]);

  Ok(())
}

#[test]
fn test_uncommitted_changes_count() -> Result<()> {
  let ws = workspace()?;
  ws.write_file("apps/api/src/index.ts", "export const value = 3;\n")?;

  let output = run_traf_ok(&ws.path, &["affected", "--json", "--base", BASE])?;
  assert_eq!(json_names(&output)?, vec!["api"]);

  Ok(())
}

#[test]
fn test_untracked_file_counts_as_change() -> Result<()> {
  let ws = workspace()?;
  ws.write_file("libs/ui/src/new.ts", "export const fresh = true;\n")?;

  let output = run_traf_ok(&ws.path, &["affected", "--json", "--base", BASE])?;
  assert_eq!(json_names(&output)?, vec!["web", "ui"]);

  Ok(())
}

#[test]
fn test_projects_without_build_target_are_never_affected() -> Result<()> {
  let ws = workspace()?;
  ws.write_file("libs/docs/src/index.ts", "export const value = 4;\n")?;
  ws.commit("Change docs")?;

  let output = run_traf_ok(&ws.path, &["affected", "--json", "--base", BASE])?;
  assert!(json_names(&output)?.is_empty());

  Ok(())
}

#[test]
fn test_root_tsconfig_change_affects_every_eligible_project() -> Result<()> {
  let ws = workspace()?;
  ws.write_file("tsconfig.base.json", "{ \"compilerOptions\": {} }\n")?;
  ws.commit("Relax compiler options")?;

  let output = run_traf_ok(&ws.path, &["affected", "--json", "--base", BASE])?;
  assert_eq!(json_names(&output)?, vec!["api", "web", "ui"]);

  Ok(())
}

#[test]
fn test_custom_root_tsconfig_path() -> Result<()> {
  let ws = workspace()?;
  ws.write_file("tsconfig.json", "{}\n")?;
  ws.commit("Add tsconfig.json")?;
  ws.mark_base()?;
  ws.write_file("tsconfig.json", "{ \"files\": [] }\n")?;

  let output = run_traf_ok(
    &ws.path,
    &["affected", "--json", "--base", BASE, "--tsConfigFilePath", "tsconfig.json"],
  )?;
  assert_eq!(json_names(&output)?, vec!["api", "web", "ui"]);

  // Without the flag, tsconfig.json is just an unowned file
  let output = run_traf_ok(&ws.path, &["affected", "--json", "--base", BASE])?;
  assert!(json_names(&output)?.is_empty());

  Ok(())
}

#[test]
fn test_cwd_flag_and_config_base() -> Result<()> {
  let ws = workspace()?;
  ws.write_file("traf.toml", &format!("base = \"{}\"\n", BASE))?;
  ws.write_file("apps/web/src/index.ts", "export const value = 5;\n")?;

  let elsewhere = tempfile::TempDir::new()?;
  let cwd = ws.path.to_string_lossy().into_owned();

  let output = run_traf_ok(elsewhere.path(), &["affected", "--json", "--cwd", &cwd])?;
  assert_eq!(json_names(&output)?, vec!["web"]);

  Ok(())
}

#[test]
fn test_workspace_json_layout() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file(
    "workspace.json",
    r#"{
  "version": 2,
  "projects": {
    "shop": {
      "root": "apps/shop",
      "sourceRoot": "apps/shop/src",
      "implicitDependencies": ["*"],
      "architect": { "build": { "options": { "tsConfig": "apps/shop/tsconfig.app.json" } } }
    },
    "cart": {
      "root": "libs/cart",
      "sourceRoot": "libs/cart/src",
      "architect": { "build": { "options": { "tsConfig": "libs/cart/tsconfig.lib.json" } } }
    }
  }
}
"#,
  )?;
  ws.write_file("libs/cart/src/index.ts", "export {};\n")?;
  ws.commit("Add workspace.json")?;
  ws.mark_base()?;

  ws.write_file("libs/cart/src/index.ts", "export const total = 0;\n")?;

  // workspace.json keys are sorted, so cart comes before shop
  let output = run_traf_ok(&ws.path, &["affected", "--json", "--base", BASE])?;
  assert_eq!(json_names(&output)?, vec!["cart", "shop"]);

  Ok(())
}
