//! Affected-set computation
//!
//! Built on the system git diff + petgraph over implicit dependencies.
//! The calculator is a trait so the dispatcher never depends on how the set
//! is computed, only on its order.

pub mod affected;
pub mod project_graph;

pub use affected::{AffectedCalculator, AffectedRequest, GitAffectedCalculator};
pub use project_graph::ProjectGraph;
