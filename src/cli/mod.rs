// CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};

use crate::coverage::Criterion;

/// Pathcov - coverage-driven test path generation
///
/// Reads a control-flow graph, enumerates the paths a coverage criterion
/// requires and reduces them to a small set of start-to-end test paths.
#[derive(Parser, Debug, Clone)]
#[command(name = "pathcov")]
#[command(author, version, about)]
#[command(long_about = "Pathcov generates test paths for control-flow coverage criteria.

Given a graph with designated start and end nodes it lists the requirement
paths of a criterion (nodes, edges, edge pairs, simple paths, prime paths)
and folds them into as few complete start-to-end test paths as it can.

Graphs are JSON documents:
  { \"nodes\": [{ \"label\": \"S\", \"kind\": \"start\" }, ...],
    \"edges\": [{ \"from\": \"S\", \"to\": \"A\" }, ...] }")]
pub struct Cli {
    /// Path to the graph description
    #[arg(global = true, long, env = "PATHCOV_GRAPH")]
    pub graph: Option<String>,

    /// Output format
    #[arg(global = true, long, value_enum, default_value_t = OutputFormat::Human)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output
    Human,
    /// Compact JSON for programmatic consumption
    Json,
    /// Formatted JSON with indentation
    Pretty,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Check that a graph can be covered
    Validate(ValidateArgs),

    /// List the requirement paths of a criterion
    Requirements(RequirementsArgs),

    /// Generate test paths covering a criterion
    Cover(CoverArgs),

    /// List the supported coverage criteria
    Criteria(CriteriaArgs),
}

#[derive(Parser, Debug, Clone, Copy)]
pub struct ValidateArgs {}

#[derive(Parser, Debug, Clone, Copy)]
pub struct CriteriaArgs {}

#[derive(Parser, Debug, Clone, Copy)]
pub struct RequirementsArgs {
    /// Coverage criterion
    #[arg(long, value_enum)]
    pub criterion: CriterionArg,
}

#[derive(Parser, Debug, Clone, Copy)]
pub struct CoverArgs {
    /// Coverage criterion
    #[arg(long, value_enum)]
    pub criterion: CriterionArg,

    /// Maximum number of nodes in a test path [default: derived from the graph]
    #[arg(long)]
    pub max_length: Option<usize>,

    /// Run even if the graph fails validation
    #[arg(long)]
    pub skip_validation: bool,

    /// Omit the requirement listing
    #[arg(long)]
    pub paths_only: bool,
}

/// Criterion names accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriterionArg {
    /// Every node
    Node,
    /// Every edge
    Edge,
    /// Every pair of adjacent edges
    EdgePair,
    /// Every simple path
    SimplePath,
    /// Every prime path
    PrimePath,
}

impl From<CriterionArg> for Criterion {
    fn from(arg: CriterionArg) -> Self {
        match arg {
            CriterionArg::Node => Criterion::NodeCoverage,
            CriterionArg::Edge => Criterion::EdgeCoverage,
            CriterionArg::EdgePair => Criterion::EdgePairCoverage,
            CriterionArg::SimplePath => Criterion::SimplePathCoverage,
            CriterionArg::PrimePath => Criterion::PrimePathCoverage,
        }
    }
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Default graph file when neither flag nor environment names one
pub const DEFAULT_GRAPH_PATH: &str = "./graph.json";

/// Resolve the graph path from multiple sources
///
/// Priority: CLI arg > PATHCOV_GRAPH env var > default "./graph.json"
pub fn resolve_graph_path(cli_graph: Option<String>) -> anyhow::Result<String> {
    match cli_graph {
        Some(path) => Ok(path),
        None => std::env::var("PATHCOV_GRAPH")
            .or_else(|_| Ok(DEFAULT_GRAPH_PATH.to_string())),
    }
}

// ============================================================================
// Command Handlers
// ============================================================================

pub mod cmds {
    use super::*;
    use crate::cfg::{self, Cfg, ValidationReport};
    use crate::coverage::{CoverageAlgorithm, CoverageReport, ReductionLimits};
    use crate::output::{self, JsonError, JsonResponse};
    use anyhow::Result;
    use serde::Serialize;

    /// Print a serializable payload in the selected JSON flavour
    fn print_json<T: Serialize>(format: OutputFormat, data: T) {
        let response = JsonResponse::new(data);
        match format {
            OutputFormat::Pretty => println!("{}", response.to_pretty_json()),
            _ => println!("{}", response.to_json()),
        }
    }

    /// Report a failure in the selected format and exit
    fn fail(format: OutputFormat, err: JsonError, code: i32) -> ! {
        match format {
            OutputFormat::Human => output::error(&err.message),
            _ => print_json(format, err),
        }
        std::process::exit(code);
    }

    /// Load the graph named on the command line
    fn load(cli: &Cli) -> Result<Cfg> {
        let path = super::resolve_graph_path(cli.graph.clone())?;

        if !std::path::Path::new(&path).exists() {
            match cli.output {
                OutputFormat::Human => output::exit_file_not_found(&path),
                _ => fail(cli.output, JsonError::graph_not_found(&path), output::EXIT_FILE_NOT_FOUND),
            }
        }

        match cfg::load_graph(&path) {
            Ok(graph) => Ok(graph),
            Err(e) => fail(
                cli.output,
                JsonError::graph_malformed(&format!("{:#}", e)),
                output::EXIT_ERROR,
            ),
        }
    }

    pub fn validate(_args: ValidateArgs, cli: &Cli) -> Result<()> {
        let graph = load(cli)?;
        let report: ValidationReport = cfg::validate(&graph);

        match cli.output {
            OutputFormat::Human => {
                if report.is_valid() {
                    output::success(&format!(
                        "Graph is valid ({} nodes, {} edges)",
                        graph.node_count(),
                        graph.edge_count()
                    ));
                } else {
                    output::header("Invalid graph");
                    for problem in report.problems() {
                        output::warn(&problem);
                    }
                }
            }
            _ => print_json(cli.output, &report),
        }

        if !report.is_valid() {
            std::process::exit(output::EXIT_VALIDATION);
        }

        Ok(())
    }

    pub fn requirements(args: RequirementsArgs, cli: &Cli) -> Result<()> {
        let graph = load(cli)?;

        let mut algorithm = CoverageAlgorithm::new(args.criterion.into());
        if let Err(e) = algorithm.compute(&graph, false) {
            fail(cli.output, JsonError::coverage(&e), output::EXIT_ERROR);
        }

        let report = algorithm.report();
        match cli.output {
            OutputFormat::Human => print_paths("Requirements", &report, &report.requirements),
            _ => print_json(cli.output, &report),
        }

        Ok(())
    }

    pub fn cover(args: CoverArgs, cli: &Cli) -> Result<()> {
        let mut limits = ReductionLimits::default();
        if let Some(max_length) = args.max_length {
            if max_length == 0 {
                output::exit_usage("--max-length must be at least 1");
            }
            limits = limits.with_max_path_length(max_length);
        }

        let graph = load(cli)?;

        if args.skip_validation {
            tracing::warn!("running coverage without graph validation");
        } else if let Err(cfg::GraphError::Invalid { problems }) = cfg::ensure_valid(&graph) {
            fail(cli.output, JsonError::graph_invalid(&problems), output::EXIT_VALIDATION);
        }

        let mut algorithm = CoverageAlgorithm::new(args.criterion.into()).with_limits(limits);
        if let Err(e) = algorithm.compute(&graph, true) {
            fail(cli.output, JsonError::coverage(&e), output::EXIT_ERROR);
        }

        let report = algorithm.report();
        match cli.output {
            OutputFormat::Human => {
                if !args.paths_only {
                    print_paths("Requirements", &report, &report.requirements);
                    println!();
                }
                print_paths("Test paths", &report, &report.test_paths);
                println!();
                output::info(&format!(
                    "{} requirements covered by {} test paths ({} nodes total)",
                    report.stats.requirement_count,
                    report.stats.test_path_count,
                    report.stats.total_test_path_length
                ));
            }
            _ => print_json(cli.output, &report),
        }

        Ok(())
    }

    pub fn criteria(_args: CriteriaArgs, cli: &Cli) -> Result<()> {
        #[derive(Serialize)]
        struct CriterionInfo {
            name: &'static str,
            description: &'static str,
        }

        let list: Vec<CriterionInfo> = Criterion::ALL
            .iter()
            .map(|c| CriterionInfo {
                name: c.name(),
                description: c.description(),
            })
            .collect();

        match cli.output {
            OutputFormat::Human => {
                output::header("Coverage criteria");
                for info in &list {
                    println!("  {:<12} {}", info.name, info.description);
                }
            }
            _ => print_json(cli.output, &list),
        }

        Ok(())
    }

    fn print_paths(title: &str, report: &CoverageReport, paths: &[crate::coverage::PathReport]) {
        output::header(&format!("{} ({}, {})", title, report.criterion, paths.len()));
        for (i, path) in paths.iter().enumerate() {
            output::path_line(i, &path.to_text());
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
