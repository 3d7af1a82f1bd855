//! Algorithm-local node wrappers
//!
//! A [`NodeSet`] is built once per run from a [`Cfg`] snapshot. Each
//! [`Node`] keeps its outgoing links paired with the edge that created
//! them, plus back-links used only for reverse boundary searches. Nodes
//! are addressed by [`NodeId`], which equals the graph's node index.

use crate::cfg::{Cfg, NodeKind};
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashSet;

/// Position of a node inside its [`NodeSet`]
pub type NodeId = usize;

/// A graph node plus its adjacency, as seen by the coverage algorithms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    label: String,
    kind: NodeKind,
    links: Vec<NodeId>,
    edges: Vec<EdgeIndex>,
    back_links: Vec<NodeId>,
}

impl Node {
    pub fn new(id: NodeId, label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id,
            label: label.into(),
            kind,
            links: Vec::new(),
            edges: Vec::new(),
            back_links: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Record a forward link and the edge it came from
    pub fn add_link(&mut self, node: NodeId, edge: EdgeIndex) {
        self.links.push(node);
        self.edges.push(edge);
    }

    /// Record a reverse link
    pub fn add_back_link(&mut self, node: NodeId) {
        self.back_links.push(node);
    }

    pub fn has_link(&self, node: NodeId) -> bool {
        self.links.contains(&node)
    }

    /// Outgoing neighbours in edge insertion order
    pub fn links(&self) -> &[NodeId] {
        &self.links
    }

    /// Incoming neighbours in edge insertion order
    pub fn back_links(&self) -> &[NodeId] {
        &self.back_links
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Edge paired with the first link to `node`
    pub fn edge_to(&self, node: NodeId) -> Option<EdgeIndex> {
        self.links
            .iter()
            .position(|&n| n == node)
            .map(|i| self.edges[i])
    }
}

/// Run-scoped arena of [`Node`]s
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeSet {
    nodes: Vec<Node>,
}

impl NodeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap every node of a graph
    ///
    /// Links are recorded in edge insertion order so that generation and
    /// reduction are deterministic for a given graph description.
    pub fn from_cfg(cfg: &Cfg) -> Self {
        let mut set = Self {
            nodes: cfg
                .node_indices()
                .map(|idx| Node::new(idx.index(), cfg[idx].label.clone(), cfg[idx].kind))
                .collect(),
        };

        for edge in cfg.edge_references() {
            set.link(edge.source().index(), edge.target().index(), edge.id());
        }

        set
    }

    /// Append a node, returning its id
    pub fn add_node(&mut self, label: impl Into<String>, kind: NodeKind) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new(id, label, kind));
        id
    }

    /// Connect `from` to `to`, recording both directions
    pub fn link(&mut self, from: NodeId, to: NodeId, edge: EdgeIndex) {
        self.nodes[from].add_link(to, edge);
        self.nodes[to].add_back_link(from);
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        0..self.nodes.len()
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id].kind
    }

    pub fn label(&self, id: NodeId) -> &str {
        &self.nodes[id].label
    }

    pub fn has_link(&self, from: NodeId, to: NodeId) -> bool {
        self.nodes[from].has_link(to)
    }

    /// Graph index of a node, for mapping results back onto the graph
    pub fn graph_index(&self, id: NodeId) -> NodeIndex {
        NodeIndex::new(self.nodes[id].id)
    }

    /// Depth-first distance from `id` to an End/StartEnd node
    ///
    /// Sibling branches are aggregated with the maximum, so the value is
    /// the longest cycle-free walk to a boundary node rather than the
    /// shortest. `None` when every branch runs into a cycle or a dead end.
    /// `None` orders below every `Some`.
    pub fn distance_to_nearest_end(&self, id: NodeId) -> Option<usize> {
        let mut on_path = HashSet::new();
        self.boundary_distance(id, 0, &mut on_path, Direction::Forward)
    }

    /// Depth-first distance from `id` back to a Start/StartEnd node
    ///
    /// Follows back-links; aggregation as in
    /// [`distance_to_nearest_end`](Self::distance_to_nearest_end).
    pub fn distance_to_nearest_start(&self, id: NodeId) -> Option<usize> {
        let mut on_path = HashSet::new();
        self.boundary_distance(id, 0, &mut on_path, Direction::Backward)
    }

    fn boundary_distance(
        &self,
        id: NodeId,
        depth: usize,
        on_path: &mut HashSet<NodeId>,
        direction: Direction,
    ) -> Option<usize> {
        let node = &self.nodes[id];

        let at_boundary = match direction {
            Direction::Forward => node.kind.is_end(),
            Direction::Backward => node.kind.is_start(),
        };
        if at_boundary {
            return Some(depth);
        }

        // Cycle on the current branch
        if !on_path.insert(id) {
            return None;
        }

        let next = match direction {
            Direction::Forward => &node.links,
            Direction::Backward => &node.back_links,
        };

        let mut best = None;
        for &neighbor in next {
            let dist = self.boundary_distance(neighbor, depth + 1, on_path, direction);
            if dist > best {
                best = dist;
            }
        }

        on_path.remove(&id);
        best
    }
}

impl std::ops::Index<NodeId> for NodeSet {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}
