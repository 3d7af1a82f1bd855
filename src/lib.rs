// Pathcov: Coverage-Driven Test Path Generation
//
// Builds requirement paths for control-flow coverage criteria and reduces
// them to complete start-to-end test paths.

#![allow(dead_code)]

pub mod cfg;
pub mod cli;
pub mod coverage;
pub mod output;

pub use cfg::{Cfg, FlowEdge, FlowNode, GraphError, NodeKind};
pub use coverage::{CoverageAlgorithm, CoverageError, Criterion, NodeSet, Path};
