// CLI command definitions: a thin client over the prime-path core

use clap::{Parser, Subcommand, ValueEnum};

use crate::cfg::{EdgeKind, FlowGraph};
use anyhow::Context;
use petgraph::graph::NodeIndex;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Primepath - prime-path coverage engine for control-flow graphs
///
/// Computes the prime paths of a directed control-flow graph: the minimal
/// set of maximal simple paths (plus single cycle traversals) that a test
/// suite must exercise for prime-path coverage.
#[derive(Parser, Debug, Clone)]
#[command(name = "primepath")]
#[command(author, version, about)]
pub struct Cli {
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
    /// Compute prime paths for an edge-list graph
    Paths(PathsArgs),

    /// Show a loaded control-flow graph
    Cfg(CfgArgs),

    /// Extract CFGs from a source file and optionally compute their paths
    Extract(ExtractArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct PathsArgs {
    /// Path to the edge-list graph file
    #[arg(long)]
    pub graph: String,

    /// Refuse graphs above this node count (path counts grow exponentially)
    #[arg(long, env = "PRIMEPATH_MAX_NODES", default_value_t = 500)]
    pub max_nodes: usize,
}

#[derive(Parser, Debug, Clone)]
pub struct CfgArgs {
    /// Path to the edge-list graph file
    #[arg(long)]
    pub graph: String,

    /// Graph rendering format
    #[arg(long, value_enum, default_value_t = CfgFormat::Human)]
    pub format: CfgFormat,
}

#[derive(Parser, Debug, Clone)]
pub struct ExtractArgs {
    /// Source file to extract CFGs from
    #[arg(long)]
    pub file: String,

    /// Also compute prime paths for each extracted CFG
    #[arg(long)]
    pub with_paths: bool,

    /// Refuse graphs above this node count (path counts grow exponentially)
    #[arg(long, env = "PRIMEPATH_MAX_NODES", default_value_t = 500)]
    pub max_nodes: usize,
}

/// CFG rendering format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CfgFormat {
    /// Human-readable text
    Human,
    /// Graphviz DOT format
    Dot,
    /// JSON export
    Json,
}

// ============================================================================
// Edge-list loading
// ============================================================================

/// Load a graph from an edge-list file
///
/// Format: one `FROM TO` pair per line; a lone token declares an isolated
/// node; `#` starts a comment; duplicate edges are ignored (they carry no
/// semantic weight for path computation).
pub fn load_edge_list(path: &Path) -> anyhow::Result<FlowGraph> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read graph file {}", path.display()))?;
    parse_edge_list(&text)
}

/// Parse edge-list text into a flow graph
pub fn parse_edge_list(text: &str) -> anyhow::Result<FlowGraph> {
    let mut graph = FlowGraph::new();
    let mut index: HashMap<String, NodeIndex> = HashMap::new();
    let mut seen: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();

    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(node), None, _) => {
                intern(&mut graph, &mut index, node);
            }
            (Some(from), Some(to), None) => {
                let from = intern(&mut graph, &mut index, from);
                let to = intern(&mut graph, &mut index, to);
                if seen.insert((from, to)) {
                    graph.add_edge(from, to, EdgeKind::Sequence);
                }
            }
            _ => anyhow::bail!(
                "line {}: expected 'FROM TO' or a lone node, got '{}'",
                lineno + 1,
                line
            ),
        }
    }

    Ok(graph)
}

fn intern(graph: &mut FlowGraph, index: &mut HashMap<String, NodeIndex>, id: &str) -> NodeIndex {
    match index.get(id) {
        Some(&idx) => idx,
        None => {
            let idx = graph.add_node(id.to_string());
            index.insert(id.to_string(), idx);
            idx
        }
    }
}

// ============================================================================
// Command Handlers
// ============================================================================

pub mod cmds {
    use super::*;
    use crate::cfg::{self, export, PathKind, PrimePath};
    use crate::extract;
    use crate::output;
    use anyhow::Result;
    use tracing::debug;

    pub fn paths(args: PathsArgs, cli: &Cli) -> Result<()> {
        let graph = load_graph_or_exit(&args.graph, cli.output);
        enforce_budget(&graph, args.max_nodes, cli.output);

        let primes = cfg::prime_paths(&graph);
        debug!(
            nodes = graph.node_count(),
            paths = primes.len(),
            "computed prime paths"
        );

        match cli.output {
            OutputFormat::Human => {
                output::header(&format!("Prime paths for {}", args.graph));
                println!("Total prime paths: {}", primes.len());
                println!();
                print_paths_human(&primes);
            }
            OutputFormat::Json | OutputFormat::Pretty => {
                print_json(export::export_paths(&primes, &args.graph), cli.output);
            }
        }

        Ok(())
    }

    pub fn cfg(args: CfgArgs, cli: &Cli) -> Result<()> {
        let graph = load_graph_or_exit(&args.graph, cli.output);

        match args.format {
            CfgFormat::Dot => {
                print!("{}", export::export_dot(&graph));
            }
            CfgFormat::Json => {
                print_json(export::export_json(&graph, &args.graph), cli.output);
            }
            CfgFormat::Human => {
                output::header(&format!("CFG for {}", args.graph));
                println!("Nodes: {}", graph.node_count());
                println!("Edges: {}", graph.edge_count());

                let isolated = cfg::find_isolated(&graph);
                if !isolated.is_empty() {
                    let names: Vec<&str> =
                        isolated.iter().map(|&idx| graph[idx].as_str()).collect();
                    println!("Isolated: {}", names.join(", "));
                }

                println!();
                for edge in graph.edge_indices() {
                    if let Some((from, to)) = graph.edge_endpoints(edge) {
                        println!("  {} -> {}", graph[from], graph[to]);
                    }
                }
            }
        }

        Ok(())
    }

    pub fn extract(args: ExtractArgs, cli: &Cli) -> Result<()> {
        let path = Path::new(&args.file);
        if !path.exists() {
            output::exit_file_not_found(&args.file);
        }

        let artifacts = match extract::extract_cfgs_from_file(path) {
            Ok(artifacts) => artifacts,
            Err(err) => fail(
                output::JsonError::extraction_failed(&err.to_string()),
                output::EXIT_ERROR,
                cli.output,
            ),
        };
        debug!(count = artifacts.len(), "extracted CFG artifacts");

        match cli.output {
            OutputFormat::Human => {
                output::header(&format!("Extracted CFGs from {}", args.file));
                if artifacts.is_empty() {
                    output::warn("No CFG could be built for this unit");
                }
                for artifact in &artifacts {
                    output::success(&format!(
                        "{} ({} nodes, {} edges)",
                        artifact.scope,
                        artifact.graph.node_count(),
                        artifact.graph.edge_count()
                    ));

                    if args.with_paths {
                        enforce_budget(&artifact.graph, args.max_nodes, cli.output);
                        let primes = cfg::prime_paths(&artifact.graph);
                        println!("Prime paths: {}", primes.len());
                        print_paths_human(&primes);
                        println!();
                    }
                }
            }
            OutputFormat::Json | OutputFormat::Pretty => {
                if args.with_paths {
                    let mut exports = Vec::new();
                    for artifact in &artifacts {
                        enforce_budget(&artifact.graph, args.max_nodes, cli.output);
                        let primes = cfg::prime_paths(&artifact.graph);
                        exports.push(export::export_paths(&primes, &artifact.scope));
                    }
                    print_json(exports, cli.output);
                } else {
                    let exports: Vec<export::GraphExport> = artifacts
                        .iter()
                        .map(|a| export::export_json(&a.graph, &a.scope))
                        .collect();
                    print_json(exports, cli.output);
                }
            }
        }

        Ok(())
    }

    /// Load an edge-list graph, exiting with a structured error on failure
    fn load_graph_or_exit(graph_arg: &str, format: OutputFormat) -> FlowGraph {
        let path = Path::new(graph_arg);
        if !path.exists() {
            fail(
                output::JsonError::graph_not_found(graph_arg),
                output::EXIT_FILE_NOT_FOUND,
                format,
            );
        }

        match super::load_edge_list(path) {
            Ok(graph) => graph,
            Err(err) => fail(
                output::JsonError::invalid_edge_list(&err.to_string()),
                output::EXIT_VALIDATION,
                format,
            ),
        }
    }

    /// Refuse graphs above the caller-side node budget
    ///
    /// The core imposes no internal bound (maximal path counts are worst-case
    /// exponential), so oversized inputs are rejected before it runs.
    fn enforce_budget(graph: &FlowGraph, max_nodes: usize, format: OutputFormat) {
        if graph.node_count() > max_nodes {
            fail(
                output::JsonError::budget_exceeded(graph.node_count(), max_nodes),
                output::EXIT_BUDGET,
                format,
            );
        }
    }

    /// Report a structured error on stderr and exit
    fn fail(err: output::JsonError, code: i32, format: OutputFormat) -> ! {
        match format {
            OutputFormat::Human => {
                output::error(&err.message);
                if let Some(hint) = &err.remediation {
                    output::info(hint);
                }
            }
            OutputFormat::Json | OutputFormat::Pretty => {
                eprintln!("{}", serde_json::to_string(&err).unwrap_or_default());
            }
        }
        std::process::exit(code);
    }

    /// Print data wrapped in the JSON response envelope
    fn print_json<T: serde::Serialize>(data: T, format: OutputFormat) {
        let response = output::JsonResponse::new(data);
        match format {
            OutputFormat::Pretty => println!("{}", response.to_pretty_json()),
            _ => println!("{}", response.to_json()),
        }
    }

    fn print_paths_human(primes: &[PrimePath<String>]) {
        for (i, path) in primes.iter().enumerate() {
            let kind = match path.kind {
                PathKind::Simple => "simple",
                PathKind::CycleClosing => "cycle",
            };
            println!("Path {} [{}]: {}", i, kind, path.nodes.join(" -> "));
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edge_list_basic() {
        let g = parse_edge_list("A B\nB C\n").unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_parse_edge_list_isolated_node() {
        let g = parse_edge_list("A B\nX\n").unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(crate::cfg::find_isolated(&g).len(), 1);
    }

    #[test]
    fn test_parse_edge_list_duplicate_edges_ignored() {
        let g = parse_edge_list("A B\nA B\n").unwrap();
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_parse_edge_list_comments_and_blanks() {
        let g = parse_edge_list("# header\n\nA B # trailing\n").unwrap();
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_parse_edge_list_self_loop() {
        let g = parse_edge_list("A A\n").unwrap();
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_parse_edge_list_rejects_extra_tokens() {
        assert!(parse_edge_list("A B C\n").is_err());
    }

    #[test]
    fn test_parse_edge_list_empty() {
        let g = parse_edge_list("").unwrap();
        assert_eq!(g.node_count(), 0);
    }

    #[test]
    fn test_prime_paths_from_parsed_graph() {
        let g = parse_edge_list("A B\nA C\nB D\nC D\n").unwrap();
        let primes = crate::cfg::prime_paths(&g);

        let lists: Vec<Vec<String>> = primes.iter().map(|p| p.nodes.clone()).collect();
        assert_eq!(
            lists,
            vec![
                vec!["A".to_string(), "B".to_string(), "D".to_string()],
                vec!["A".to_string(), "C".to_string(), "D".to_string()],
            ]
        );
    }
}
