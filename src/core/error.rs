//! Error types for traf with contextual messages and exit codes
//!
//! Every error carries a category (which decides the exit code) and, where we
//! know one, a hint pointing the user at the fix.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for traf errors
///
/// Delegated actions never go through this type: their exit code is passed
/// through untouched by `main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid options, malformed project manifests)
  User = 1,
  /// System error (git, I/O)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for traf
#[derive(Debug)]
pub enum TrafError {
  /// Configuration errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// Project discovery errors
  Workspace(WorkspaceError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl TrafError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    TrafError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      TrafError::Message { message, context, help } => TrafError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      TrafError::Io(err) => TrafError::Message {
        message: format!("{}: {}", ctx_str, err),
        context: None,
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      TrafError::Config(_) => ExitCode::User,
      TrafError::Git(_) => ExitCode::System,
      TrafError::Workspace(_) => ExitCode::User,
      TrafError::Io(_) => ExitCode::System,
      TrafError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      TrafError::Config(e) => e.help_message(),
      TrafError::Git(e) => e.help_message(),
      TrafError::Workspace(e) => e.help_message(),
      TrafError::Message { help, .. } => help.clone(),
      TrafError::Io(_) => None,
    }
  }
}

impl fmt::Display for TrafError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TrafError::Config(e) => write!(f, "{}", e),
      TrafError::Git(e) => write!(f, "{}", e),
      TrafError::Workspace(e) => write!(f, "{}", e),
      TrafError::Io(e) => write!(f, "I/O error: {}", e),
      TrafError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for TrafError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      TrafError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for TrafError {
  fn from(err: io::Error) -> Self {
    TrafError::Io(err)
  }
}

impl From<serde_json::Error> for TrafError {
  fn from(err: serde_json::Error) -> Self {
    TrafError::message(format!("JSON error: {}", err))
  }
}

impl From<std::path::StripPrefixError> for TrafError {
  fn from(err: std::path::StripPrefixError) -> Self {
    TrafError::message(format!("Path strip prefix error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// traf.toml could not be parsed
  Invalid { path: PathBuf, reason: String },

  /// An option resolved to an unusable value
  InvalidOption { option: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Invalid { .. } => {
        Some("Supported keys are `base`, `ts_config`, `runner` and `exclude`.".to_string())
      }
      ConfigError::InvalidOption { .. } => Some("Run `traf affected --help` to see valid options.".to_string()),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Invalid { path, reason } => {
        write!(f, "Invalid traf configuration in {}:\n{}", path.display(), reason)
      }
      ConfigError::InvalidOption { option, reason } => {
        write!(f, "Invalid value for --{}: {}", option, reason)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },

  /// git binary could not be started
  NotInstalled { reason: String },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::CommandFailed { stderr, .. } => {
        if stderr.contains("unknown revision") || stderr.contains("bad revision") {
          Some("Check that the --base revision exists locally (you may need `git fetch`).".to_string())
        } else {
          None
        }
      }
      GitError::RepoNotFound { path } => Some(format!(
        "Run traf inside a git checkout or point --cwd at one: {}",
        path.display()
      )),
      GitError::NotInstalled { .. } => Some("Install git and make sure it is on PATH.".to_string()),
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
      GitError::NotInstalled { reason } => {
        write!(f, "Failed to execute git: {}", reason)
      }
    }
  }
}

/// Project discovery errors
#[derive(Debug)]
pub enum WorkspaceError {
  /// The working directory does not exist
  MissingRoot { path: PathBuf },

  /// A project manifest could not be parsed
  InvalidManifest { path: PathBuf, reason: String },

  /// Two manifests declare the same project name
  DuplicateProject { name: String, first: PathBuf, second: PathBuf },
}

impl WorkspaceError {
  fn help_message(&self) -> Option<String> {
    match self {
      WorkspaceError::MissingRoot { .. } => Some("Pass an existing directory with --cwd.".to_string()),
      WorkspaceError::InvalidManifest { .. } => None,
      WorkspaceError::DuplicateProject { .. } => {
        Some("Project names must be unique. Set an explicit `name` in one of the project.json files.".to_string())
      }
    }
  }
}

impl fmt::Display for WorkspaceError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      WorkspaceError::MissingRoot { path } => {
        write!(f, "Workspace directory does not exist: {}", path.display())
      }
      WorkspaceError::InvalidManifest { path, reason } => {
        write!(f, "Failed to parse {}: {}", path.display(), reason)
      }
      WorkspaceError::DuplicateProject { name, first, second } => {
        write!(
          f,
          "Project '{}' is declared twice:\n  {}\n  {}",
          name,
          first.display(),
          second.display()
        )
      }
    }
  }
}

/// Result type alias for traf
pub type TrafResult<T> = Result<T, TrafError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> TrafResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> TrafResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<TrafError>,
{
  fn context(self, ctx: impl Into<String>) -> TrafResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> TrafResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Print an error to stderr with its help text
pub fn print_error(error: &TrafError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
