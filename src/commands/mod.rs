//! CLI commands for traf
//!
//! - **affected**: Act on the projects affected since a base revision

pub mod affected;

pub use affected::run_affected;
