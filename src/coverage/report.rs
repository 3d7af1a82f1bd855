//! Serializable results of a coverage run

use crate::coverage::criterion::Criterion;
use crate::coverage::node::NodeSet;
use crate::coverage::path::Path;
use serde::{Deserialize, Serialize};

/// Requirements and test paths of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub criterion: Criterion,
    pub requirements: Vec<PathReport>,
    pub test_paths: Vec<PathReport>,
    pub stats: CoverageStats,
}

/// One path rendered for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathReport {
    /// BLAKE3 hash of the node sequence
    pub path_id: String,
    pub labels: Vec<String>,
    /// Graph node indices
    pub nodes: Vec<usize>,
    /// Graph edge indices between consecutive nodes
    pub edges: Vec<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageStats {
    pub requirement_count: usize,
    pub test_path_count: usize,
    /// Sum of node counts over all test paths
    pub total_test_path_length: usize,
}

impl PathReport {
    pub fn new(path: &Path, nodes: &NodeSet) -> Self {
        Self {
            path_id: path.path_id(),
            labels: path.labels(nodes).into_iter().map(str::to_string).collect(),
            nodes: path
                .nodes()
                .iter()
                .map(|&id| nodes.graph_index(id).index())
                .collect(),
            edges: path.edges(nodes).into_iter().map(|e| e.index()).collect(),
        }
    }

    /// Render as `[S, A, E]`
    pub fn to_text(&self) -> String {
        format!("[{}]", self.labels.join(", "))
    }
}

impl CoverageReport {
    pub fn new(criterion: Criterion, nodes: &NodeSet, requirements: &[Path], test_paths: &[Path]) -> Self {
        let stats = CoverageStats {
            requirement_count: requirements.len(),
            test_path_count: test_paths.len(),
            total_test_path_length: test_paths.iter().map(Path::node_count).sum(),
        };

        Self {
            criterion,
            requirements: requirements.iter().map(|p| PathReport::new(p, nodes)).collect(),
            test_paths: test_paths.iter().map(|p| PathReport::new(p, nodes)).collect(),
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::NodeKind;
    use petgraph::graph::EdgeIndex;

    fn create_node_set() -> NodeSet {
        let mut nodes = NodeSet::new();
        nodes.add_node("S", NodeKind::Start);
        nodes.add_node("A", NodeKind::Normal);
        nodes.add_node("E", NodeKind::End);
        nodes.link(0, 1, EdgeIndex::new(0));
        nodes.link(1, 2, EdgeIndex::new(1));
        nodes
    }

    #[test]
    fn test_path_report() {
        let nodes = create_node_set();
        let path = Path::new(vec![0, 1, 2]);
        let report = PathReport::new(&path, &nodes);

        assert_eq!(report.labels, vec!["S", "A", "E"]);
        assert_eq!(report.nodes, vec![0, 1, 2]);
        assert_eq!(report.edges, vec![0, 1]);
        assert_eq!(report.path_id, path.path_id());
        assert_eq!(report.to_text(), "[S, A, E]");
    }

    #[test]
    fn test_coverage_report_json() {
        let nodes = create_node_set();
        let reqs = vec![Path::new(vec![0, 1]), Path::new(vec![1, 2])];
        let tests = vec![Path::new(vec![0, 1, 2])];

        let report = CoverageReport::new(Criterion::EdgeCoverage, &nodes, &reqs, &tests);
        assert_eq!(report.stats.requirement_count, 2);
        assert_eq!(report.stats.test_path_count, 1);
        assert_eq!(report.stats.total_test_path_length, 3);

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"criterion\":\"edge-coverage\""));
        assert!(json.contains("\"labels\":[\"S\",\"A\",\"E\"]"));
    }
}
