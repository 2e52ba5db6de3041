//! Workspace projects: discovery and eligibility
//!
//! - **project**: `Project` as reported by a repository, `EligibleProject` after filtering
//! - **repository**: `ProjectRepository` trait + Nx (`project.json` / `workspace.json`) implementation
//! - **filter**: Narrow projects to those with a build tsConfig

pub mod filter;
pub mod project;
pub mod repository;

pub use filter::filter_eligible;
pub use project::EligibleProject;
pub use repository::{NxProjectRepository, ProjectRepository};
