// Control-flow graph model handed to the coverage engine

pub mod analysis;
pub mod loader;
pub mod reachability;
pub mod validation;

pub use analysis::{find_end_nodes, find_start_nodes, out_degree};
pub use loader::{load_graph, EdgeSpec, GraphSpec, NodeSpec};
pub use reachability::{find_reaching_end, find_reachable_from_start};
pub use validation::{ensure_valid, validate, ValidationReport};

use petgraph::graph::DiGraph;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Control Flow Graph
pub type Cfg = DiGraph<FlowNode, FlowEdge>;

/// A state or statement in the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowNode {
    /// Display label, unique within a graph
    pub label: String,
    /// Boundary classification
    pub kind: NodeKind,
}

impl FlowNode {
    pub fn new(label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            label: label.into(),
            kind,
        }
    }
}

/// Transition between two nodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge;

/// Node classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    #[default]
    Normal,
    Start,
    End,
    StartEnd,
}

impl NodeKind {
    /// Start or StartEnd
    pub fn is_start(&self) -> bool {
        matches!(self, Self::Start | Self::StartEnd)
    }

    /// End or StartEnd
    pub fn is_end(&self) -> bool {
        matches!(self, Self::End | Self::StartEnd)
    }
}

/// Errors raised while building or checking a graph
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("duplicate node label '{0}'")]
    DuplicateLabel(String),

    #[error("edge {from} -> {to} references unknown node '{missing}'")]
    UnknownNode {
        from: String,
        to: String,
        missing: String,
    },

    #[error("invalid graph: {}", problems.join("; "))]
    Invalid { problems: Vec<String> },
}
