//! Coverage-driven test path generation
//!
//! A run has two phases. A [`Criterion`] first turns the graph into
//! requirement paths; [`reduction::reduce`] then folds those requirements
//! into as few complete start-to-end test paths as it can.
//!
//! ```rust
//! use pathcov::cfg::{Cfg, FlowEdge, FlowNode, NodeKind};
//! use pathcov::coverage::{CoverageAlgorithm, Criterion};
//!
//! let mut cfg = Cfg::new();
//! let s = cfg.add_node(FlowNode::new("S", NodeKind::Start));
//! let a = cfg.add_node(FlowNode::new("A", NodeKind::Normal));
//! let e = cfg.add_node(FlowNode::new("E", NodeKind::End));
//! cfg.add_edge(s, a, FlowEdge);
//! cfg.add_edge(a, e, FlowEdge);
//!
//! let mut algorithm = CoverageAlgorithm::new(Criterion::EdgeCoverage);
//! algorithm.compute(&cfg, true).unwrap();
//!
//! assert_eq!(algorithm.requirements_results().len(), 2);
//! assert_eq!(algorithm.coverage_results().len(), 1);
//! ```

pub mod algorithm;
pub mod criterion;
pub mod node;
pub mod path;
pub mod reduction;
pub mod report;

pub use algorithm::CoverageAlgorithm;
pub use criterion::{Criterion, ParseCriterionError};
pub use node::{Node, NodeId, NodeSet};
pub use path::{hash_path, Overlap, Path};
pub use reduction::{reduce, ReductionLimits};
pub use report::{CoverageReport, CoverageStats, PathReport};

use thiserror::Error;

/// Failures surfaced by a coverage run
///
/// None of these occur on a graph that passed
/// [`validate`](crate::cfg::validate); they signal a malformed input or
/// a defect rather than an absent path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoverageError {
    /// No merge, link or neighbouring node can grow the path
    #[error("path {path} cannot be extended towards a start or end node")]
    Unextendable { path: String },

    /// Overlap was reported but the paths could not be merged
    #[error("path {current} overlaps {candidate} but the two cannot be merged")]
    MergeFailed { current: String, candidate: String },

    /// A path under construction grew past the configured limit
    #[error("path exceeded {limit} nodes before reaching an end node: {path}")]
    PathLimitExceeded { limit: usize, path: String },

    /// Requirement without nodes
    #[error("requirement path is empty")]
    EmptyPath,
}
