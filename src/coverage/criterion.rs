//! Requirement generation per coverage criterion

use crate::coverage::node::{NodeId, NodeSet};
use crate::coverage::path::Path;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Control-flow coverage criterion
///
/// Each criterion turns a node set into the list of requirement paths
/// some test path has to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Criterion {
    /// Every node
    NodeCoverage,
    /// Every edge
    EdgeCoverage,
    /// Every pair of chained edges
    EdgePairCoverage,
    /// Every simple path
    SimplePathCoverage,
    /// Every maximal simple path
    PrimePathCoverage,
}

impl Criterion {
    pub const ALL: [Criterion; 5] = [
        Criterion::NodeCoverage,
        Criterion::EdgeCoverage,
        Criterion::EdgePairCoverage,
        Criterion::SimplePathCoverage,
        Criterion::PrimePathCoverage,
    ];

    /// Short name used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Criterion::NodeCoverage => "node",
            Criterion::EdgeCoverage => "edge",
            Criterion::EdgePairCoverage => "edge-pair",
            Criterion::SimplePathCoverage => "simple-path",
            Criterion::PrimePathCoverage => "prime-path",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Criterion::NodeCoverage => "every node is visited",
            Criterion::EdgeCoverage => "every edge is taken",
            Criterion::EdgePairCoverage => "every pair of adjacent edges is taken",
            Criterion::SimplePathCoverage => "every path without repeated nodes is toured",
            Criterion::PrimePathCoverage => "every maximal simple path is toured",
        }
    }

    /// Produce the requirement paths for a node set
    pub fn generate(&self, nodes: &NodeSet) -> Vec<Path> {
        match self {
            Criterion::NodeCoverage => node_requirements(nodes),
            Criterion::EdgeCoverage => edge_requirements(nodes),
            Criterion::EdgePairCoverage => edge_pair_requirements(nodes),
            Criterion::SimplePathCoverage => simple_paths(nodes),
            Criterion::PrimePathCoverage => prime_paths(nodes),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown coverage criterion '{0}'")]
pub struct ParseCriterionError(String);

impl FromStr for Criterion {
    type Err = ParseCriterionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Criterion::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| ParseCriterionError(s.to_string()))
    }
}

/// One single-node path per node
fn node_requirements(nodes: &NodeSet) -> Vec<Path> {
    nodes.ids().map(Path::single).collect()
}

/// One two-node path per edge
fn edge_requirements(nodes: &NodeSet) -> Vec<Path> {
    nodes
        .iter()
        .flat_map(|node| {
            node.links()
                .iter()
                .map(move |&to| Path::new(vec![node.id(), to]))
        })
        .collect()
}

/// One three-node path per a -> b -> c
fn edge_pair_requirements(nodes: &NodeSet) -> Vec<Path> {
    let mut paths = Vec::new();

    for a in nodes.iter() {
        for &b in a.links() {
            for &c in nodes[b].links() {
                paths.push(Path::new(vec![a.id(), b, c]));
            }
        }
    }

    paths
}

/// Every path that visits no node twice, single nodes included
///
/// Paths are emitted in DFS order from each node in turn, every prefix
/// before its extensions.
pub fn simple_paths(nodes: &NodeSet) -> Vec<Path> {
    let mut paths = Vec::new();
    let mut current = Vec::new();

    for start in nodes.ids() {
        extend_simple(nodes, start, &mut current, &mut paths);
    }

    paths
}

fn extend_simple(nodes: &NodeSet, node: NodeId, current: &mut Vec<NodeId>, paths: &mut Vec<Path>) {
    current.push(node);
    paths.push(Path::new(current.clone()));

    for &next in nodes[node].links() {
        if !current.contains(&next) {
            extend_simple(nodes, next, current, paths);
        }
    }

    current.pop();
}

/// Simple paths not contained in any longer simple path
pub fn prime_paths(nodes: &NodeSet) -> Vec<Path> {
    let simple = simple_paths(nodes);

    simple
        .iter()
        .filter(|path| {
            !simple
                .iter()
                .any(|other| other.node_count() > path.node_count() && other.contains_path(path))
        })
        .cloned()
        .collect()
}
