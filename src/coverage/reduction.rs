//! Greedy reduction of requirement paths into test paths
//!
//! Requirements are folded into complete start-to-end paths, longest
//! first. A path that is not yet a test path grows one step at a time,
//! trying in order:
//!
//! 1. merging the pending requirement with the largest overlap
//! 2. splicing on the longest pending requirement linked to either end
//! 3. extending by one graph node towards the closest boundary
//!
//! Pending requirements that a path comes to contain are dropped as they
//! are covered.

use crate::coverage::node::{NodeId, NodeSet};
use crate::coverage::path::Path;
use crate::coverage::CoverageError;
use tracing::{debug, trace};

/// Configurable limits for reduction
///
/// Guards against graphs that slipped past validation, where a path
/// could otherwise keep growing forever.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReductionLimits {
    /// Maximum number of nodes in a test path, derived per run when unset
    pub max_path_length: Option<usize>,
}

impl ReductionLimits {
    pub fn new(max_path_length: usize) -> Self {
        Self {
            max_path_length: Some(max_path_length),
        }
    }

    /// Create limits with a custom maximum path length
    pub fn with_max_path_length(mut self, max_path_length: usize) -> Self {
        self.max_path_length = Some(max_path_length);
        self
    }

    /// Node budget for a single test path of one run
    ///
    /// Without an explicit maximum, each requirement may be spliced in
    /// once and each splice may be followed by a walk across the whole
    /// node set.
    pub fn path_length_limit(&self, nodes: &NodeSet, requirements: &[Path]) -> usize {
        self.max_path_length.unwrap_or_else(|| {
            let longest = requirements.iter().map(Path::node_count).max().unwrap_or(0);
            nodes
                .len()
                .saturating_add(longest)
                .saturating_mul(requirements.len() + 1)
        })
    }
}

/// Reduce requirement paths into test paths
///
/// `requirements` is left untouched; reduction works on its own copy.
/// Returns the test paths in the order they were completed.
pub fn reduce(
    nodes: &NodeSet,
    requirements: &[Path],
    limits: &ReductionLimits,
) -> Result<Vec<Path>, CoverageError> {
    let mut pending: Vec<Path> = requirements.to_vec();
    let mut results = Vec::new();

    if pending.iter().any(Path::is_empty) {
        return Err(CoverageError::EmptyPath);
    }

    let limit = limits.path_length_limit(nodes, requirements);
    debug!(limit, "reducing {} requirements", pending.len());

    while let Some(idx) = longest(&pending) {
        let mut current = pending.remove(idx);

        while !current.is_test_path(nodes) {
            filter_subpaths(&mut pending, &current);
            debug!(path = %current.to_text(nodes), "extending path");

            current = extend(nodes, current, &mut pending)?;
            check_length(nodes, &current, limit)?;
        }

        check_length(nodes, &current, limit)?;
        filter_subpaths(&mut pending, &current);
        debug!(path = %current.to_text(nodes), "test path complete");
        results.push(current);
    }

    Ok(results)
}

fn check_length(nodes: &NodeSet, path: &Path, limit: usize) -> Result<(), CoverageError> {
    if path.node_count() > limit {
        return Err(CoverageError::PathLimitExceeded {
            limit,
            path: path.to_text(nodes),
        });
    }
    Ok(())
}

/// Index of the longest path, earliest wins ties
fn longest(paths: &[Path]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, path) in paths.iter().enumerate() {
        if best.map_or(true, |b| path.node_count() > paths[b].node_count()) {
            best = Some(i);
        }
    }
    best
}

/// Drop every pending path contained in `current`
fn filter_subpaths(pending: &mut Vec<Path>, current: &Path) {
    pending.retain(|path| !current.contains_path(path));
}

/// Grow `current` by one step
fn extend(nodes: &NodeSet, current: Path, pending: &mut Vec<Path>) -> Result<Path, CoverageError> {
    if let Some(idx) = best_overlap(nodes, &current, pending) {
        let candidate = pending.remove(idx);
        debug!(path = %candidate.to_text(nodes), "merging path");

        let current_text = current.to_text(nodes);
        let candidate_text = candidate.to_text(nodes);
        return current
            .merged_with(candidate)
            .ok_or(CoverageError::MergeFailed {
                current: current_text,
                candidate: candidate_text,
            });
    }

    if let Some((idx, append)) = best_linked(nodes, &current, pending) {
        let candidate = pending.remove(idx);
        let mut current = current;
        if append {
            debug!(path = %candidate.to_text(nodes), "appending linked path");
            current.append_path(&candidate);
        } else {
            debug!(path = %candidate.to_text(nodes), "prepending linked path");
            current.prepend_path(&candidate);
        }
        return Ok(current);
    }

    match best_step(nodes, &current) {
        Some((node, true)) => {
            debug!(node = nodes.label(node), "appending node");
            let mut current = current;
            current.append_node(node);
            Ok(current)
        }
        Some((node, false)) => {
            debug!(node = nodes.label(node), "prepending node");
            let mut current = current;
            current.prepend_node(node);
            Ok(current)
        }
        None => Err(CoverageError::Unextendable {
            path: current.to_text(nodes),
        }),
    }
}

/// Pending path with the largest nonzero overlap
///
/// Among equal overlaps a path that is not yet anchored at a boundary
/// replaces one that is.
fn best_overlap(nodes: &NodeSet, current: &Path, pending: &[Path]) -> Option<usize> {
    let first = pending.first()?;
    let mut max_overlap = first.intersects(current);
    let mut max_idx = 0;

    for (i, path) in pending.iter().enumerate().skip(1) {
        let overlap = path.intersects(current);
        trace!(path = %path.to_text(nodes), overlap, "overlap");

        if max_overlap > 0 && overlap == max_overlap && pending[max_idx].is_border_path(nodes) {
            max_idx = i;
        }

        if overlap > max_overlap {
            max_overlap = overlap;
            max_idx = i;
        }
    }

    (max_overlap != 0).then_some(max_idx)
}

/// Longest pending path linked to either end of `current`
///
/// Returns the index and whether it is appended (`true`) or prepended.
/// Appendable candidates are scanned first, so they win length ties.
fn best_linked(nodes: &NodeSet, current: &Path, pending: &[Path]) -> Option<(usize, bool)> {
    let first = current.first_node()?;
    let last = current.last_node()?;
    let mut best: Option<(usize, usize, bool)> = None;

    let longer = |best: &Option<(usize, usize, bool)>, len: usize| best.map_or(true, |(_, l, _)| len > l);

    for (i, path) in pending.iter().enumerate() {
        let linked = path.first_node().map_or(false, |head| nodes.has_link(last, head));
        if linked && longer(&best, path.node_count()) {
            best = Some((i, path.node_count(), true));
        }
    }

    for (i, path) in pending.iter().enumerate() {
        let linked = path.last_node().map_or(false, |tail| nodes.has_link(tail, first));
        if linked && longer(&best, path.node_count()) {
            best = Some((i, path.node_count(), false));
        }
    }

    best.map(|(i, _, append)| (i, append))
}

/// Single graph node to extend `current` with
///
/// Successors of the last node are ranked by distance to an end node,
/// predecessors of the first node by distance to a start node; the
/// smallest distance wins and successors win ties. The path's own
/// endpoint never counts as a neighbour of itself.
fn best_step(nodes: &NodeSet, current: &Path) -> Option<(NodeId, bool)> {
    let first = current.first_node()?;
    let last = current.last_node()?;
    let mut best: Option<(Option<usize>, NodeId, bool)> = None;

    for node in nodes.ids() {
        if node == last || !nodes.has_link(last, node) {
            continue;
        }
        let dist = nodes.distance_to_nearest_end(node);
        if best.map_or(true, |(d, _, _)| dist < d) {
            best = Some((dist, node, true));
        }
    }

    for node in nodes.ids() {
        if node == first || !nodes.has_link(node, first) {
            continue;
        }
        let dist = nodes.distance_to_nearest_start(node);
        if best.map_or(true, |(d, _, _)| dist < d) {
            best = Some((dist, node, false));
        }
    }

    best.map(|(_, node, append)| (node, append))
}
