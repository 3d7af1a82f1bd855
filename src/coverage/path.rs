//! Path values and their overlap arithmetic
//!
//! A [`Path`] is an ordered sequence of [`NodeId`]s. Nodes may repeat.
//! Requirement paths are fragments of a walk; test paths additionally
//! start at a start node and finish at an end node.
//!
//! Overlaps are always computed the same way: find every occurrence of
//! the other path's first node, extend a run of matching nodes from
//! there, and keep the longest run (the latest one on ties). A run that
//! reaches this path's tail means the tail of `self` coincides with a
//! prefix of the other path, so the two can be merged.

use crate::coverage::node::{NodeId, NodeSet};
use petgraph::graph::EdgeIndex;
use serde::{Deserialize, Serialize};

/// Ordered walk through a [`NodeSet`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path {
    nodes: Vec<NodeId>,
}

/// Best matching run of one path inside another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    /// Index of the first matching node in `self`
    pub start: usize,
    /// Index of the last matching node in `self` (inclusive)
    pub end: usize,
    /// Number of matching nodes
    pub len: usize,
}

impl Path {
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    /// Path consisting of a single node
    pub fn single(node: NodeId) -> Self {
        Self { nodes: vec![node] }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn first_node(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn last_node(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    pub fn count_node(&self, node: NodeId) -> usize {
        self.nodes.iter().filter(|&&n| n == node).count()
    }

    pub fn append_node(&mut self, node: NodeId) {
        self.nodes.push(node);
    }

    pub fn prepend_node(&mut self, node: NodeId) {
        self.nodes.insert(0, node);
    }

    pub fn append_path(&mut self, path: &Path) {
        self.nodes.extend_from_slice(&path.nodes);
    }

    pub fn prepend_path(&mut self, path: &Path) {
        let mut nodes = Vec::with_capacity(path.nodes.len() + self.nodes.len());
        nodes.extend_from_slice(&path.nodes);
        nodes.append(&mut self.nodes);
        self.nodes = nodes;
    }

    /// Starts at a Start/StartEnd node and finishes at an End/StartEnd node
    pub fn is_test_path(&self, nodes: &NodeSet) -> bool {
        match (self.first_node(), self.last_node()) {
            (Some(first), Some(last)) => nodes.kind(first).is_start() && nodes.kind(last).is_end(),
            _ => false,
        }
    }

    /// Already anchored at a boundary on either end
    pub fn is_border_path(&self, nodes: &NodeSet) -> bool {
        match (self.first_node(), self.last_node()) {
            (Some(first), Some(last)) => nodes.kind(first).is_start() || nodes.kind(last).is_end(),
            _ => false,
        }
    }

    /// Longest run of `other`'s leading nodes found inside `self`
    ///
    /// Every occurrence of `other`'s first node starts a candidate run,
    /// which extends while nodes keep matching and neither path is
    /// exhausted. Equal-length runs resolve to the latest occurrence.
    /// `None` when `other` is empty or its first node never occurs.
    pub fn intersection_left_pos(&self, other: &Path) -> Option<Overlap> {
        let head = other.first_node()?;
        let mut best: Option<Overlap> = None;

        for start in (0..self.nodes.len()).filter(|&i| self.nodes[i] == head) {
            let matched = self.nodes[start..]
                .iter()
                .zip(other.nodes.iter())
                .take_while(|(a, b)| a == b)
                .count();

            let run = Overlap {
                start,
                end: start + matched - 1,
                len: matched,
            };

            // >= keeps the latest of equally long runs
            if best.map_or(true, |b| run.len >= b.len) {
                best = Some(run);
            }
        }

        best
    }

    /// Length of the overlap between `self`'s tail and `other`'s head
    ///
    /// Zero unless the best run from
    /// [`intersection_left_pos`](Self::intersection_left_pos) ends on the
    /// last node of `self`.
    pub fn intersects_left(&self, other: &Path) -> usize {
        match self.intersection_left_pos(other) {
            Some(run) if run.end + 1 == self.nodes.len() => run.len,
            _ => 0,
        }
    }

    /// Length of the overlap between `other`'s tail and `self`'s head
    pub fn intersects_right(&self, other: &Path) -> usize {
        other.intersects_left(self)
    }

    /// Larger of the left and right overlaps
    pub fn intersects(&self, other: &Path) -> usize {
        self.intersects_left(other).max(self.intersects_right(other))
    }

    /// Merge two overlapping paths into one
    ///
    /// A left merge keeps `self` and appends what follows the overlap in
    /// `other`; a right merge keeps `other` and appends what follows the
    /// overlap in `self`. When both are possible the longer overlap wins,
    /// with ties going to the left merge. Returns `None` when the paths do
    /// not overlap at a boundary.
    pub fn merged_with(self, other: Path) -> Option<Path> {
        let left = self
            .intersection_left_pos(&other)
            .filter(|run| run.len != 0 && run.end + 1 == self.nodes.len());
        let right = other
            .intersection_left_pos(&self)
            .filter(|run| run.len != 0 && run.end + 1 == other.nodes.len());

        let merge_left = match (left, right) {
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (Some(l), Some(r)) => l.len >= r.len,
            (None, None) => return None,
        };

        let (mut head, tail, run) = if merge_left {
            (self, other, left?)
        } else {
            (other, self, right?)
        };

        let skip = head.nodes.len() - run.start;
        head.nodes.extend_from_slice(&tail.nodes[skip..]);
        Some(head)
    }

    /// `other` occurs as a contiguous run anywhere inside `self`
    pub fn contains_path(&self, other: &Path) -> bool {
        self.intersection_left_pos(other)
            .map_or(false, |run| run.len == other.nodes.len())
    }

    /// The first occurrence of `from` is immediately followed by `to`
    pub fn contains_edge(&self, from: NodeId, to: NodeId) -> bool {
        match self.nodes.iter().position(|&n| n == from) {
            Some(i) => self.nodes.get(i + 1) == Some(&to),
            None => false,
        }
    }

    /// Node labels in path order
    pub fn labels<'a>(&self, nodes: &'a NodeSet) -> Vec<&'a str> {
        self.nodes.iter().map(|&id| nodes.label(id)).collect()
    }

    /// Render as `[S, A, E]`
    pub fn to_text(&self, nodes: &NodeSet) -> String {
        format!("[{}]", self.labels(nodes).join(", "))
    }

    /// Graph edges traversed between consecutive nodes
    ///
    /// Consecutive pairs with no connecting edge are skipped.
    pub fn edges(&self, nodes: &NodeSet) -> Vec<EdgeIndex> {
        self.nodes
            .windows(2)
            .filter_map(|pair| nodes[pair[0]].edge_to(pair[1]))
            .collect()
    }

    /// Stable identifier derived from the node sequence
    pub fn path_id(&self) -> String {
        hash_path(&self.nodes)
    }
}

impl From<Vec<NodeId>> for Path {
    fn from(nodes: Vec<NodeId>) -> Self {
        Self::new(nodes)
    }
}

/// Compute BLAKE3 hash of a node sequence
///
/// The length is hashed first so that sequences which are prefixes of
/// each other never collide.
pub fn hash_path(nodes: &[NodeId]) -> String {
    let mut hasher = blake3::Hasher::new();

    hasher.update(&(nodes.len() as u64).to_le_bytes());

    for &node in nodes {
        hasher.update(&(node as u64).to_le_bytes());
    }

    hasher.finalize().to_hex().to_string()
}
