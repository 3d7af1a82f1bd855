//! Structural validation run before any coverage computation
//!
//! The coverage engine assumes a well-formed graph and may fail to
//! terminate on anything else. A graph is well-formed when:
//!
//! - it has at least one start (Start/StartEnd) node
//! - it has at least one end (End/StartEnd) node
//! - no End node has outgoing edges
//! - every node reaches some end node
//! - every node is reachable from some start node

use crate::cfg::analysis::{find_end_nodes, find_start_nodes, out_degree};
use crate::cfg::reachability::{find_reachable_from_start, find_reaching_end};
use crate::cfg::{Cfg, GraphError, NodeKind};
use serde::Serialize;

/// Outcome of graph validation
///
/// Label lists are sorted for stable reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub has_start: bool,
    pub has_end: bool,
    /// End nodes with outgoing edges
    pub invalid_end_nodes: Vec<String>,
    /// Nodes from which no end node is reachable
    pub not_reaching_end: Vec<String>,
    /// Nodes no start node reaches
    pub unreachable_from_start: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.has_start
            && self.has_end
            && self.invalid_end_nodes.is_empty()
            && self.not_reaching_end.is_empty()
            && self.unreachable_from_start.is_empty()
    }

    /// Human-readable description of each problem found
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if !self.has_start {
            problems.push("graph must have at least one start or start/end node".to_string());
        }
        if !self.has_end {
            problems.push("graph must have at least one end or start/end node".to_string());
        }
        if !self.invalid_end_nodes.is_empty() {
            problems.push(format!(
                "end nodes can't have outgoing edges: ({})",
                self.invalid_end_nodes.join(", ")
            ));
        }
        if !self.not_reaching_end.is_empty() {
            problems.push(format!(
                "all nodes must reach at least one end node, these don't: ({})",
                self.not_reaching_end.join(", ")
            ));
        }
        if !self.unreachable_from_start.is_empty() {
            problems.push(format!(
                "all nodes must be reachable from a start node, these aren't: ({})",
                self.unreachable_from_start.join(", ")
            ));
        }

        problems
    }
}

/// Validate a graph
pub fn validate(cfg: &Cfg) -> ValidationReport {
    let has_start = !find_start_nodes(cfg).is_empty();
    let has_end = !find_end_nodes(cfg).is_empty();

    let reachable = find_reachable_from_start(cfg);
    let reaching = find_reaching_end(cfg);

    let mut report = ValidationReport {
        has_start,
        has_end,
        ..Default::default()
    };

    for idx in cfg.node_indices() {
        let node = &cfg[idx];

        if node.kind == NodeKind::End && out_degree(cfg, idx) > 0 {
            report.invalid_end_nodes.push(node.label.clone());
        }
        if !reaching.contains(&idx) {
            report.not_reaching_end.push(node.label.clone());
        }
        if !reachable.contains(&idx) {
            report.unreachable_from_start.push(node.label.clone());
        }
    }

    report.invalid_end_nodes.sort();
    report.not_reaching_end.sort();
    report.unreachable_from_start.sort();

    if !report.is_valid() {
        tracing::debug!(problems = ?report.problems(), "graph failed validation");
    }

    report
}

/// Validate a graph, turning problems into an error
pub fn ensure_valid(cfg: &Cfg) -> Result<(), GraphError> {
    let report = validate(cfg);
    if report.is_valid() {
        Ok(())
    } else {
        Err(GraphError::Invalid {
            problems: report.problems(),
        })
    }
}
