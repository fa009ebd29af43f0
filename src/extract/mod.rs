//! CFG extraction collaborator
//!
//! Turns a source unit into zero or more tagged flow graphs for the
//! prime-path core. Two construction strategies: a preferred leader-based
//! builder over a caller-supplied tree-sitter syntax tree, and a
//! deterministic line-oriented fallback for sources no parser covers. A unit
//! for which no graph can be built is omitted from the output set; the core
//! never observes extraction failures.

pub mod ast;
pub mod fallback;

pub use ast::{ast_to_cfg, AstCfgBuilder};
pub use fallback::heuristic_cfg;

use crate::cfg::FlowGraph;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors surfaced by the extraction layer
///
/// Only file-level I/O is an error; a graph that cannot be built from
/// otherwise readable source is silently omitted.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A flow graph tagged with its originating source unit and scope
///
/// `scope` is `"module"` for a whole-unit graph or the function name for a
/// per-function graph. The prime-path core consumes only `graph`.
#[derive(Debug, Clone)]
pub struct CfgArtifact {
    pub file: PathBuf,
    pub scope: String,
    pub graph: FlowGraph,
}

/// Tree-sitter node kinds treated as function definitions
const FUNCTION_KINDS: [&str; 4] = [
    "function_definition",
    "function_item",
    "function_declaration",
    "method_definition",
];

/// Extract flow graphs from a source file on disk
///
/// No parser is available at this entry point, so only the fallback builder
/// runs, producing a single module-scope artifact. Callers holding a parsed
/// tree should use [`extract_from_tree`] instead.
pub fn extract_cfgs_from_file(path: &Path) -> Result<Vec<CfgArtifact>, ExtractError> {
    let source = std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(extract_from_source(path, &source))
}

/// Extract a module-scope flow graph using the fallback builder
pub fn extract_from_source(file: &Path, source: &str) -> Vec<CfgArtifact> {
    let graph = fallback::heuristic_cfg(source);

    if graph.node_count() == 0 {
        warn!(file = %file.display(), "fallback builder produced no graph, omitting unit");
        return Vec::new();
    }

    debug!(
        file = %file.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built module CFG via fallback builder"
    );

    vec![CfgArtifact {
        file: file.to_path_buf(),
        scope: "module".to_string(),
        graph,
    }]
}

/// Extract per-function flow graphs from a parsed syntax tree
///
/// The caller owns the grammar and parser; this walks the tree for function
/// definitions and runs the leader-based builder on each. When the tree
/// yields nothing usable, the whole unit falls back to the line-oriented
/// heuristic builder.
pub fn extract_from_tree(file: &Path, source: &str, root: tree_sitter::Node) -> Vec<CfgArtifact> {
    let mut functions = Vec::new();
    collect_functions(root, &mut functions);

    let mut artifacts = Vec::new();
    for fn_node in functions {
        let graph = ast::ast_to_cfg(fn_node);
        if graph.node_count() == 0 {
            warn!(file = %file.display(), "empty CFG for function node, omitting");
            continue;
        }

        artifacts.push(CfgArtifact {
            file: file.to_path_buf(),
            scope: function_name(fn_node, source),
            graph,
        });
    }

    if artifacts.is_empty() {
        debug!(file = %file.display(), "no per-function CFGs, using fallback builder");
        return extract_from_source(file, source);
    }

    artifacts
}

/// Collect function definition nodes, recursing into nested scopes
fn collect_functions<'a>(node: tree_sitter::Node<'a>, out: &mut Vec<tree_sitter::Node<'a>>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if FUNCTION_KINDS.contains(&child.kind()) {
            out.push(child);
        }
        collect_functions(child, out);
    }
}

/// Resolve a function node's name, or a positional placeholder
fn function_name(fn_node: tree_sitter::Node, source: &str) -> String {
    fn_node
        .child_by_field_name("name")
        .map(|n| source[n.byte_range()].to_string())
        .unwrap_or_else(|| format!("fn@{}", fn_node.start_position().row + 1))
}
