//! CFG analysis: boundary node detection and degree queries

use crate::cfg::Cfg;
use petgraph::graph::NodeIndex;

/// Find all nodes a test path may start from (Start or StartEnd)
pub fn find_start_nodes(cfg: &Cfg) -> Vec<NodeIndex> {
    cfg.node_indices()
        .filter(|&idx| cfg[idx].kind.is_start())
        .collect()
}

/// Find all nodes a test path may end at (End or StartEnd)
pub fn find_end_nodes(cfg: &Cfg) -> Vec<NodeIndex> {
    cfg.node_indices()
        .filter(|&idx| cfg[idx].kind.is_end())
        .collect()
}

/// Count outgoing edges from a node
pub fn out_degree(cfg: &Cfg, idx: NodeIndex) -> usize {
    cfg.neighbors_directed(idx, petgraph::Direction::Outgoing)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::{FlowEdge, FlowNode, NodeKind};
    use petgraph::graph::DiGraph;

    /// S -> A -> (B | E), B -> E
    fn create_test_cfg() -> Cfg {
        let mut g = DiGraph::new();

        let s = g.add_node(FlowNode::new("S", NodeKind::Start));
        let a = g.add_node(FlowNode::new("A", NodeKind::Normal));
        let b = g.add_node(FlowNode::new("B", NodeKind::Normal));
        let e = g.add_node(FlowNode::new("E", NodeKind::End));

        g.add_edge(s, a, FlowEdge);
        g.add_edge(a, b, FlowEdge);
        g.add_edge(a, e, FlowEdge);
        g.add_edge(b, e, FlowEdge);

        g
    }

    #[test]
    fn test_find_start_and_end_nodes() {
        let cfg = create_test_cfg();

        assert_eq!(find_start_nodes(&cfg), vec![NodeIndex::new(0)]);
        assert_eq!(find_end_nodes(&cfg), vec![NodeIndex::new(3)]);
    }

    #[test]
    fn test_start_end_node_counts_as_both() {
        let mut g: Cfg = DiGraph::new();
        let x = g.add_node(FlowNode::new("X", NodeKind::StartEnd));

        assert_eq!(find_start_nodes(&g), vec![x]);
        assert_eq!(find_end_nodes(&g), vec![x]);
    }

    #[test]
    fn test_degrees() {
        let cfg = create_test_cfg();
        let a = NodeIndex::new(1);
        let e = NodeIndex::new(3);

        assert_eq!(out_degree(&cfg, a), 2);
        assert_eq!(out_degree(&cfg, e), 0);
    }

    #[test]
    fn test_empty_cfg() {
        let cfg: Cfg = DiGraph::new();
        assert!(find_start_nodes(&cfg).is_empty());
        assert!(find_end_nodes(&cfg).is_empty());
    }
}
