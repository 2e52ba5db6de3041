//! Core building blocks shared by every traf command
//!
//! - **config**: Optional traf.toml parsing
//! - **context**: Resolved workspace directory + config for one invocation
//! - **error**: Error types with contextual help messages and exit codes
//! - **vcs**: Git operations via the system git binary

pub mod config;
pub mod context;
pub mod error;
pub mod vcs;
