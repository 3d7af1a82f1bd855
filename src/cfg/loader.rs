//! Graph description files
//!
//! The editor front end hands graphs over as a small JSON document:
//!
//! ```json
//! {
//!   "nodes": [
//!     { "label": "S", "kind": "start" },
//!     { "label": "A" },
//!     { "label": "E", "kind": "end" }
//!   ],
//!   "edges": [
//!     { "from": "S", "to": "A" },
//!     { "from": "A", "to": "E" }
//!   ]
//! }
//! ```
//!
//! Node order and edge order are preserved, and both drive the order in
//! which requirements are generated.

use crate::cfg::{Cfg, FlowEdge, FlowNode, GraphError, NodeKind};
use anyhow::{Context, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Serialized graph description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSpec {
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub label: String,
    #[serde(default)]
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
}

impl GraphSpec {
    /// Parse a graph description from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Malformed graph description")
    }

    /// Build the petgraph representation
    ///
    /// Labels must be unique and every edge endpoint must name a node.
    pub fn into_cfg(self) -> Result<Cfg, GraphError> {
        let mut cfg = DiGraph::with_capacity(self.nodes.len(), self.edges.len());
        let mut by_label: HashMap<String, NodeIndex> = HashMap::new();

        for node in self.nodes {
            if by_label.contains_key(&node.label) {
                return Err(GraphError::DuplicateLabel(node.label));
            }
            let idx = cfg.add_node(FlowNode::new(node.label.clone(), node.kind));
            by_label.insert(node.label, idx);
        }

        for edge in self.edges {
            let lookup = |label: &str| {
                by_label.get(label).copied().ok_or_else(|| GraphError::UnknownNode {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    missing: label.to_string(),
                })
            };
            let from = lookup(&edge.from)?;
            let to = lookup(&edge.to)?;
            cfg.add_edge(from, to, FlowEdge);
        }

        Ok(cfg)
    }
}

/// Load a graph description file into a CFG
pub fn load_graph(path: impl AsRef<Path>) -> Result<Cfg> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read graph file {}", path.display()))?;

    let spec = GraphSpec::from_json(&text)
        .with_context(|| format!("Failed to parse graph file {}", path.display()))?;

    tracing::debug!(
        nodes = spec.nodes.len(),
        edges = spec.edges.len(),
        "loaded graph description from {}",
        path.display()
    );

    Ok(spec.into_cfg()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const LINEAR: &str = r#"{
        "nodes": [
            { "label": "S", "kind": "start" },
            { "label": "A" },
            { "label": "E", "kind": "end" }
        ],
        "edges": [
            { "from": "S", "to": "A" },
            { "from": "A", "to": "E" }
        ]
    }"#;

    #[test]
    fn test_parse_linear_graph() {
        let cfg = GraphSpec::from_json(LINEAR).unwrap().into_cfg().unwrap();

        assert_eq!(cfg.node_count(), 3);
        assert_eq!(cfg.edge_count(), 2);
        assert_eq!(cfg[NodeIndex::new(0)].kind, NodeKind::Start);
        assert_eq!(cfg[NodeIndex::new(1)].kind, NodeKind::Normal);
        assert_eq!(cfg[NodeIndex::new(2)].label, "E");
    }

    #[test]
    fn test_edges_default_to_empty() {
        let spec = GraphSpec::from_json(r#"{ "nodes": [{ "label": "X", "kind": "start_end" }] }"#)
            .unwrap();
        assert!(spec.edges.is_empty());

        let cfg = spec.into_cfg().unwrap();
        assert_eq!(cfg.node_count(), 1);
        assert_eq!(cfg.edge_count(), 0);
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let spec = GraphSpec {
            nodes: vec![
                NodeSpec { label: "A".to_string(), kind: NodeKind::Start },
                NodeSpec { label: "A".to_string(), kind: NodeKind::End },
            ],
            edges: vec![],
        };

        let err = spec.into_cfg().unwrap_err();
        assert_eq!(err, GraphError::DuplicateLabel("A".to_string()));
    }

    #[test]
    fn test_unknown_edge_endpoint_rejected() {
        let spec = GraphSpec {
            nodes: vec![NodeSpec { label: "S".to_string(), kind: NodeKind::Start }],
            edges: vec![EdgeSpec { from: "S".to_string(), to: "Q".to_string() }],
        };

        let err = spec.into_cfg().unwrap_err();
        assert!(matches!(err, GraphError::UnknownNode { ref missing, .. } if missing == "Q"));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(GraphSpec::from_json("{ nodes: ").is_err());
    }

    #[test]
    fn test_load_graph_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(LINEAR.as_bytes()).unwrap();

        let cfg = load_graph(&path).unwrap();
        assert_eq!(cfg.node_count(), 3);
    }

    #[test]
    fn test_load_graph_missing_file() {
        let err = load_graph("/nonexistent/graph.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read graph file"));
    }
}
