//! Flow-graph and prime-path export to DOT and JSON formats

use crate::cfg::paths::PrimePath;
use crate::cfg::{analysis, EdgeKind, FlowGraph};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Export a flow graph to DOT format for Graphviz
pub fn export_dot(graph: &FlowGraph) -> String {
    let mut dot = String::from("digraph CFG {\n");
    dot.push_str("  rankdir=TB;\n");
    dot.push_str("  node [shape=box, style=rounded];\n\n");

    let isolated = analysis::find_isolated(graph);
    for node_idx in graph.node_indices() {
        let label = escape_dot_string(&graph[node_idx]);
        let style = if isolated.contains(&node_idx) {
            "fillcolor=lightgray, style=filled"
        } else {
            ""
        };
        writeln!(dot, "  \"{}\" [label=\"{}\" {}];", label, label, style).ok();
    }

    dot.push('\n');
    for edge_idx in graph.edge_indices() {
        let Some((from, to)) = graph.edge_endpoints(edge_idx) else {
            continue;
        };
        let Some(kind) = graph.edge_weight(edge_idx) else {
            continue;
        };

        let label = kind.dot_label();
        let label_attr = if label.is_empty() {
            String::new()
        } else {
            format!(", label=\"{}\"", label)
        };

        writeln!(
            dot,
            "  \"{}\" -> \"{}\" [color={}, style={}{}];",
            escape_dot_string(&graph[from]),
            escape_dot_string(&graph[to]),
            kind.dot_color(),
            if *kind == EdgeKind::Sequence {
                "dashed"
            } else {
                "solid"
            },
            label_attr
        )
        .ok();
    }

    dot.push_str("}\n");
    dot
}

fn escape_dot_string(s: &str) -> String {
    s.replace('"', "\\\"")
}

/// Complete flow-graph export for JSON serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphExport {
    pub scope: String,
    pub nodes: Vec<String>,
    pub isolated: Vec<String>,
    pub edges: Vec<EdgeExport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeExport {
    pub from: String,
    pub to: String,
    pub kind: String,
}

/// Export a flow graph to JSON-serializable form
pub fn export_json(graph: &FlowGraph, scope: &str) -> GraphExport {
    let nodes: Vec<String> = graph
        .node_indices()
        .map(|idx| graph[idx].clone())
        .collect();

    let isolated: Vec<String> = analysis::find_isolated(graph)
        .iter()
        .map(|&idx| graph[idx].clone())
        .collect();

    let edges: Vec<EdgeExport> = graph
        .edge_indices()
        .filter_map(|idx| {
            let (from, to) = graph.edge_endpoints(idx)?;
            let kind = graph.edge_weight(idx)?;
            Some(EdgeExport {
                from: graph[from].clone(),
                to: graph[to].clone(),
                kind: format!("{:?}", kind),
            })
        })
        .collect();

    GraphExport {
        scope: scope.to_string(),
        nodes,
        isolated,
        edges,
    }
}

/// Prime-path list export for JSON serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsExport {
    pub scope: String,
    pub count: usize,
    pub paths: Vec<PathExport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathExport {
    pub path_id: String,
    pub kind: String,
    pub nodes: Vec<String>,
}

/// Export a computed prime-path list to JSON-serializable form
pub fn export_paths(paths: &[PrimePath<String>], scope: &str) -> PathsExport {
    let exported: Vec<PathExport> = paths
        .iter()
        .map(|p| PathExport {
            path_id: p.path_id.clone(),
            kind: format!("{:?}", p.kind),
            nodes: p.nodes.clone(),
        })
        .collect();

    PathsExport {
        scope: scope.to_string(),
        count: exported.len(),
        paths: exported,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::paths::prime_paths;

    fn create_test_graph() -> FlowGraph {
        let mut g = FlowGraph::new();

        let a = g.add_node("A".to_string());
        let b = g.add_node("B".to_string());
        let c = g.add_node("C".to_string());
        let d = g.add_node("D".to_string());

        g.add_edge(a, b, EdgeKind::TrueBranch);
        g.add_edge(a, c, EdgeKind::FalseBranch);
        g.add_edge(b, d, EdgeKind::Sequence);
        g.add_edge(c, d, EdgeKind::Sequence);

        g
    }

    #[test]
    fn test_export_dot() {
        let g = create_test_graph();
        let dot = export_dot(&g);

        assert!(dot.starts_with("digraph CFG {"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("\"A\" -> \"B\""));
        assert!(dot.contains("color=green")); // TrueBranch
        assert!(dot.contains("color=red")); // FalseBranch
        assert!(dot.contains("rankdir=TB;"));
    }

    #[test]
    fn test_export_dot_escapes_quotes() {
        let mut g = FlowGraph::new();
        g.add_node("a\"b".to_string());

        let dot = export_dot(&g);
        assert!(dot.contains("a\\\"b"));
    }

    #[test]
    fn test_export_json() {
        let g = create_test_graph();
        let export = export_json(&g, "module");

        assert_eq!(export.scope, "module");
        assert_eq!(export.nodes.len(), 4);
        assert_eq!(export.edges.len(), 4);
        assert!(export.isolated.is_empty());
        assert!(export.edges.iter().any(|e| e.kind == "TrueBranch"));
    }

    #[test]
    fn test_export_json_reports_isolated() {
        let mut g = create_test_graph();
        g.add_node("X".to_string());

        let export = export_json(&g, "module");
        assert_eq!(export.isolated, vec!["X".to_string()]);
    }

    #[test]
    fn test_export_paths() {
        let g = create_test_graph();
        let primes = prime_paths(&g);
        let export = export_paths(&primes, "module");

        assert_eq!(export.scope, "module");
        assert_eq!(export.count, 2);
        assert!(export
            .paths
            .iter()
            .all(|p| p.kind == "Simple" && !p.path_id.is_empty()));
    }
}
