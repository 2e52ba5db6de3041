//! Implicit-dependency graph between eligible projects
//!
//! - **Directed Graph**: `A → B` means "A implicitly depends on B"
//! - **Nodes**: eligible projects, in request order
//! - `"*"` as an implicit dependency means "depends on every other project"
//! - Unknown dependency names are ignored (they may name ineligible projects)

use crate::workspace::EligibleProject;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

/// Dependency graph over eligible projects.
pub struct ProjectGraph {
  graph: DiGraph<String, ()>,

  /// Index: project name → node index
  name_to_node: HashMap<String, NodeIndex>,
}

impl ProjectGraph {
  /// Build the graph from the eligible projects of one request.
  pub fn build(projects: &[EligibleProject]) -> Self {
    let mut graph = DiGraph::new();
    let mut name_to_node = HashMap::new();

    for project in projects {
      let idx = graph.add_node(project.name.clone());
      name_to_node.insert(project.name.clone(), idx);
    }

    for project in projects {
      let from_idx = name_to_node[&project.name];

      for dep in &project.implicit_dependencies {
        if dep == "*" {
          for (name, &to_idx) in &name_to_node {
            if name != &project.name {
              graph.update_edge(from_idx, to_idx, ());
            }
          }
        } else if let Some(&to_idx) = name_to_node.get(dep.as_str())
          && to_idx != from_idx
        {
          graph.update_edge(from_idx, to_idx, ());
        }
      }
    }

    Self { graph, name_to_node }
  }

  /// The given projects plus every project that (transitively) depends on them.
  ///
  /// DFS over incoming edges. O(V + E).
  pub fn with_dependents<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> HashSet<String> {
    let mut visited = HashSet::new();
    let mut stack: Vec<NodeIndex> = names
      .into_iter()
      .filter_map(|name| self.name_to_node.get(name).copied())
      .collect();

    while let Some(node_idx) = stack.pop() {
      if !visited.insert(node_idx) {
        continue;
      }

      for neighbor_idx in self.graph.neighbors_directed(node_idx, Direction::Incoming) {
        if !visited.contains(&neighbor_idx) {
          stack.push(neighbor_idx);
        }
      }
    }

    visited.into_iter().map(|idx| self.graph[idx].clone()).collect()
  }
}
