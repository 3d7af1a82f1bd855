//! Reachability analysis between boundary nodes

use crate::cfg::analysis::{find_end_nodes, find_start_nodes};
use crate::cfg::Cfg;
use petgraph::graph::NodeIndex;
use petgraph::visit::{Dfs, Reversed};
use std::collections::HashSet;

/// Find all nodes reachable from any start node
///
/// Start nodes are included. For graphs without start nodes,
/// returns an empty set.
pub fn find_reachable_from_start(cfg: &Cfg) -> HashSet<NodeIndex> {
    let mut reachable = HashSet::new();

    for start in find_start_nodes(cfg) {
        let mut dfs = Dfs::new(cfg, start);
        while let Some(node) = dfs.next(cfg) {
            reachable.insert(node);
        }
    }

    reachable
}

/// Find all nodes from which some end node is reachable
///
/// Walks incoming edges backwards from every end node.
/// End nodes are included.
pub fn find_reaching_end(cfg: &Cfg) -> HashSet<NodeIndex> {
    let reversed = Reversed(cfg);
    let mut reaching = HashSet::new();

    for end in find_end_nodes(cfg) {
        let mut dfs = Dfs::new(reversed, end);
        while let Some(node) = dfs.next(reversed) {
            reaching.insert(node);
        }
    }

    reaching
}
