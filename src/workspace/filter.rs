//! Eligible-project filter
//!
//! A project takes part in affected analysis only when it has a `build`
//! target whose options declare a `tsConfig`. Everything else is dropped here,
//! once, so nothing downstream re-checks optional fields.

use super::project::{EligibleProject, Project};

/// Keep projects with a build tsConfig, in their original order.
pub fn filter_eligible(projects: &[Project]) -> Vec<EligibleProject> {
  projects
    .iter()
    .filter_map(|project| {
      let ts_config = project.build_ts_config()?;
      Some(EligibleProject {
        name: project.name.clone(),
        source_root: project.source_root.clone(),
        implicit_dependencies: project.implicit_dependencies.clone().unwrap_or_default(),
        ts_config: ts_config.clone(),
      })
    })
    .collect()
}
