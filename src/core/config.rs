use crate::core::error::{ConfigError, ResultExt, TrafError, TrafResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default multi-project task runner
pub const DEFAULT_RUNNER: &str = "npx nx run-many";

/// Optional per-workspace configuration for traf
/// Searched in order: traf.toml, .traf.toml, .config/traf.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrafConfig {
  /// Base revision used when `--base` is not given
  #[serde(default)]
  pub base: Option<String>,

  /// Root tsconfig used when `--tsConfigFilePath` is not given
  #[serde(default)]
  pub ts_config: Option<PathBuf>,

  /// Command prefix for delegated actions (default: "npx nx run-many")
  #[serde(default)]
  pub runner: Option<String>,

  /// Extra directory names to skip during project discovery
  #[serde(default)]
  pub exclude: Vec<String>,
}

impl TrafConfig {
  /// Find config file in the standard locations
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = [
      path.join("traf.toml"),
      path.join(".traf.toml"),
      path.join(".config").join("traf.toml"),
    ];

    candidates.into_iter().find(|p| p.is_file())
  }

  /// Load config if one exists. A missing file is not an error.
  pub fn load(path: &Path) -> TrafResult<Option<Self>> {
    let Some(config_path) = Self::find_config_path(path) else {
      return Ok(None);
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

    let config = Self::parse(&content).map_err(|reason| {
      TrafError::Config(ConfigError::Invalid {
        path: config_path.clone(),
        reason,
      })
    })?;

    tracing::debug!(path = %config_path.display(), ?config, "loaded traf config");
    Ok(Some(config))
  }

  fn parse(content: &str) -> Result<Self, String> {
    let config: TrafConfig = toml_edit::de::from_str(content).map_err(|e| e.to_string())?;

    if let Some(runner) = &config.runner
      && runner.trim().is_empty()
    {
      return Err("`runner` must not be empty".to_string());
    }

    if let Some(base) = &config.base
      && base.trim().is_empty()
    {
      return Err("`base` must not be empty".to_string());
    }

    Ok(config)
  }

  /// Runner prefix, falling back to the Nx default
  pub fn runner(&self) -> &str {
    self.runner.as_deref().unwrap_or(DEFAULT_RUNNER)
  }
}
