//! Coverage run driver

use crate::cfg::Cfg;
use crate::coverage::criterion::Criterion;
use crate::coverage::node::NodeSet;
use crate::coverage::path::Path;
use crate::coverage::reduction::{reduce, ReductionLimits};
use crate::coverage::report::CoverageReport;
use crate::coverage::CoverageError;

/// Runs one criterion over a graph and keeps the results
///
/// Each [`compute`](Self::compute) call replaces the node set and both
/// result lists.
#[derive(Debug, Clone)]
pub struct CoverageAlgorithm {
    criterion: Criterion,
    limits: ReductionLimits,
    nodes: NodeSet,
    requirements: Vec<Path>,
    coverage: Vec<Path>,
}

impl CoverageAlgorithm {
    pub fn new(criterion: Criterion) -> Self {
        Self {
            criterion,
            limits: ReductionLimits::default(),
            nodes: NodeSet::new(),
            requirements: Vec::new(),
            coverage: Vec::new(),
        }
    }

    pub fn with_limits(mut self, limits: ReductionLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    pub fn limits(&self) -> &ReductionLimits {
        &self.limits
    }

    /// Node set of the last run
    pub fn nodes(&self) -> &NodeSet {
        &self.nodes
    }

    /// Unreduced requirement paths of the last run
    pub fn requirements_results(&self) -> &[Path] {
        &self.requirements
    }

    /// Reduced test paths of the last run
    pub fn coverage_results(&self) -> &[Path] {
        &self.coverage
    }

    pub fn clear_results(&mut self) {
        self.requirements.clear();
        self.coverage.clear();
    }

    /// Generate requirements for `cfg` and, unless suppressed, reduce them
    ///
    /// The graph is assumed valid; see [`crate::cfg::validate`].
    pub fn compute(&mut self, cfg: &Cfg, do_compute_coverage: bool) -> Result<(), CoverageError> {
        self.compute_nodes(NodeSet::from_cfg(cfg), do_compute_coverage)
    }

    /// Same as [`compute`](Self::compute) for a prebuilt node set
    pub fn compute_nodes(&mut self, nodes: NodeSet, do_compute_coverage: bool) -> Result<(), CoverageError> {
        self.clear_results();
        self.nodes = nodes;

        self.requirements = self.criterion.generate(&self.nodes);
        tracing::debug!(
            criterion = %self.criterion,
            requirements = self.requirements.len(),
            "generated requirements"
        );

        if do_compute_coverage {
            self.coverage = reduce(&self.nodes, &self.requirements, &self.limits)?;
            tracing::info!(
                criterion = %self.criterion,
                requirements = self.requirements.len(),
                test_paths = self.coverage.len(),
                "coverage computed"
            );
        }

        Ok(())
    }

    /// Snapshot of the last run for reporting
    pub fn report(&self) -> CoverageReport {
        CoverageReport::new(self.criterion, &self.nodes, &self.requirements, &self.coverage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::{FlowEdge, FlowNode, NodeKind};
    use petgraph::graph::DiGraph;

    /// S -> A -> E
    fn create_linear_cfg() -> Cfg {
        let mut g = DiGraph::new();

        let s = g.add_node(FlowNode::new("S", NodeKind::Start));
        let a = g.add_node(FlowNode::new("A", NodeKind::Normal));
        let e = g.add_node(FlowNode::new("E", NodeKind::End));

        g.add_edge(s, a, FlowEdge);
        g.add_edge(a, e, FlowEdge);

        g
    }

    /// S -> A -> E, S -> B -> E
    fn create_diamond_cfg() -> Cfg {
        let mut g = DiGraph::new();

        let s = g.add_node(FlowNode::new("S", NodeKind::Start));
        let a = g.add_node(FlowNode::new("A", NodeKind::Normal));
        let b = g.add_node(FlowNode::new("B", NodeKind::Normal));
        let e = g.add_node(FlowNode::new("E", NodeKind::End));

        g.add_edge(s, a, FlowEdge);
        g.add_edge(a, e, FlowEdge);
        g.add_edge(s, b, FlowEdge);
        g.add_edge(b, e, FlowEdge);

        g
    }

    /// S -> A, A -> B, B -> A, A -> E
    fn create_loop_cfg() -> Cfg {
        let mut g = DiGraph::new();

        let s = g.add_node(FlowNode::new("S", NodeKind::Start));
        let a = g.add_node(FlowNode::new("A", NodeKind::Normal));
        let b = g.add_node(FlowNode::new("B", NodeKind::Normal));
        let e = g.add_node(FlowNode::new("E", NodeKind::End));

        g.add_edge(s, a, FlowEdge);
        g.add_edge(a, b, FlowEdge);
        g.add_edge(b, a, FlowEdge);
        g.add_edge(a, e, FlowEdge);

        g
    }

    fn texts(algorithm: &CoverageAlgorithm, paths: &[Path]) -> Vec<String> {
        paths.iter().map(|p| p.to_text(algorithm.nodes())).collect()
    }

    fn assert_complete(algorithm: &CoverageAlgorithm) {
        for path in algorithm.coverage_results() {
            assert!(path.is_test_path(algorithm.nodes()), "not a test path: {:?}", path);
        }
        for req in algorithm.requirements_results() {
            assert!(
                algorithm.coverage_results().iter().any(|p| p.contains_path(req)),
                "requirement {} not covered",
                req.to_text(algorithm.nodes())
            );
        }

        let results = algorithm.coverage_results();
        for (i, a) in results.iter().enumerate() {
            for b in &results[i + 1..] {
                assert_eq!(
                    a.intersects(b),
                    0,
                    "{} and {} could still be merged",
                    a.to_text(algorithm.nodes()),
                    b.to_text(algorithm.nodes())
                );
            }
        }
    }

    #[test]
    fn test_node_coverage_linear() {
        let mut algorithm = CoverageAlgorithm::new(Criterion::NodeCoverage);
        algorithm.compute(&create_linear_cfg(), true).unwrap();

        assert_eq!(
            texts(&algorithm, algorithm.requirements_results()),
            vec!["[S]", "[A]", "[E]"]
        );
        assert_eq!(texts(&algorithm, algorithm.coverage_results()), vec!["[S, A, E]"]);
    }

    #[test]
    fn test_edge_coverage_linear() {
        let mut algorithm = CoverageAlgorithm::new(Criterion::EdgeCoverage);
        algorithm.compute(&create_linear_cfg(), true).unwrap();

        assert_eq!(
            texts(&algorithm, algorithm.requirements_results()),
            vec!["[S, A]", "[A, E]"]
        );
        assert_eq!(texts(&algorithm, algorithm.coverage_results()), vec!["[S, A, E]"]);
    }

    #[test]
    fn test_prime_path_coverage_diamond() {
        let mut algorithm = CoverageAlgorithm::new(Criterion::PrimePathCoverage);
        algorithm.compute(&create_diamond_cfg(), true).unwrap();

        assert_eq!(
            texts(&algorithm, algorithm.requirements_results()),
            vec!["[S, A, E]", "[S, B, E]"]
        );
        assert_eq!(
            texts(&algorithm, algorithm.coverage_results()),
            vec!["[S, A, E]", "[S, B, E]"]
        );

        let [first, second] = algorithm.coverage_results() else {
            panic!("expected two test paths");
        };
        assert_eq!(first.intersects(second), 0);
    }

    #[test]
    fn test_single_start_end_node() {
        let mut g: Cfg = DiGraph::new();
        g.add_node(FlowNode::new("X", NodeKind::StartEnd));

        let mut algorithm = CoverageAlgorithm::new(Criterion::NodeCoverage);
        algorithm.compute(&g, true).unwrap();

        assert_eq!(texts(&algorithm, algorithm.requirements_results()), vec!["[X]"]);
        assert_eq!(texts(&algorithm, algorithm.coverage_results()), vec!["[X]"]);
    }

    #[test]
    fn test_without_coverage_computation() {
        let mut algorithm = CoverageAlgorithm::new(Criterion::EdgeCoverage);
        algorithm.compute(&create_linear_cfg(), false).unwrap();

        assert_eq!(algorithm.requirements_results().len(), 2);
        assert!(algorithm.coverage_results().is_empty());
    }

    #[test]
    fn test_compute_replaces_previous_results() {
        let mut algorithm = CoverageAlgorithm::new(Criterion::NodeCoverage);
        algorithm.compute(&create_diamond_cfg(), true).unwrap();
        assert_eq!(algorithm.requirements_results().len(), 4);

        algorithm.compute(&create_linear_cfg(), true).unwrap();
        assert_eq!(algorithm.requirements_results().len(), 3);
        assert_eq!(algorithm.coverage_results().len(), 1);
        assert_eq!(algorithm.nodes().len(), 3);

        algorithm.clear_results();
        assert!(algorithm.requirements_results().is_empty());
        assert!(algorithm.coverage_results().is_empty());
    }

    #[test]
    fn test_every_criterion_covers_its_requirements_minimally() {
        for cfg in [create_linear_cfg(), create_diamond_cfg(), create_loop_cfg()] {
            for criterion in Criterion::ALL {
                let mut algorithm = CoverageAlgorithm::new(criterion);
                algorithm.compute(&cfg, true).unwrap();
                assert_complete(&algorithm);
            }
        }
    }

    #[test]
    fn test_loop_edge_coverage() {
        let mut algorithm = CoverageAlgorithm::new(Criterion::EdgeCoverage);
        algorithm.compute(&create_loop_cfg(), true).unwrap();

        assert_eq!(
            texts(&algorithm, algorithm.coverage_results()),
            vec!["[S, A, B, A, E]"]
        );
    }

    #[test]
    fn test_self_loop_without_end_fails() {
        let mut g: Cfg = DiGraph::new();
        let s = g.add_node(FlowNode::new("S", NodeKind::Start));
        let x = g.add_node(FlowNode::new("X", NodeKind::Normal));
        g.add_edge(s, x, FlowEdge);
        g.add_edge(x, x, FlowEdge);

        let mut algorithm = CoverageAlgorithm::new(Criterion::EdgeCoverage);
        let err = algorithm.compute(&g, true).unwrap_err();
        assert!(matches!(
            err,
            CoverageError::Unextendable { .. } | CoverageError::PathLimitExceeded { .. }
        ));
    }

    #[test]
    fn test_report_counts() {
        let mut algorithm = CoverageAlgorithm::new(Criterion::EdgeCoverage);
        algorithm.compute(&create_diamond_cfg(), true).unwrap();

        let report = algorithm.report();
        assert_eq!(report.criterion, Criterion::EdgeCoverage);
        assert_eq!(report.stats.requirement_count, 4);
        assert_eq!(report.stats.test_path_count, 2);
        assert_eq!(report.stats.total_test_path_length, 6);
    }
}
