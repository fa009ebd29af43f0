//! Deterministic fallback CFG builder
//!
//! A best-effort, line-oriented heuristic for source units the preferred
//! tree-sitter builder cannot handle. Top-level statements become sequential
//! nodes; `if`/`elif`/`else` introduce a condition node with branch children
//! that rejoin it; `while`/`for`/`loop` introduce a header with a
//! back-edged body. The shape is crude but deterministic, which is all the
//! prime-path core requires of its input.

use crate::cfg::{EdgeKind, FlowGraph};
use petgraph::graph::NodeIndex;

/// What the most recent top-level statement contributed to the graph
#[derive(Clone, Copy, PartialEq, Eq)]
enum LastKind {
    Plain,
    Cond,
    Loop,
}

struct HeuristicBuilder {
    graph: FlowGraph,
    counter: usize,
}

impl HeuristicBuilder {
    fn new() -> Self {
        Self {
            graph: FlowGraph::new(),
            counter: 0,
        }
    }

    fn add(&mut self, label: &str) -> NodeIndex {
        self.counter += 1;
        self.graph.add_node(format!("n{}_{}", self.counter, label))
    }
}

/// Build a module-scope flow graph from raw source text
///
/// Only unindented lines count as top-level statements; indented lines are
/// the branch and loop bodies already represented by the `then`/`body`
/// child nodes. Blank lines and comment lines are skipped.
pub fn heuristic_cfg(source: &str) -> FlowGraph {
    let mut b = HeuristicBuilder::new();

    let start = b.add("start");
    let mut last = start;
    let mut last_kind = LastKind::Plain;
    let mut open_cond: Option<NodeIndex> = None;

    for raw in source.lines() {
        if raw.starts_with(|c: char| c.is_whitespace()) {
            continue;
        }
        let line = raw.trim_end();
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }

        match leading_keyword(line) {
            Some("if") => {
                let cond = b.add("if");
                b.graph.add_edge(last, cond, exit_kind(last_kind));

                let then = b.add("then");
                b.graph.add_edge(cond, then, EdgeKind::TrueBranch);
                b.graph.add_edge(then, cond, EdgeKind::Sequence);

                last = cond;
                last_kind = LastKind::Cond;
                open_cond = Some(cond);
            }
            Some("elif") | Some("else") => {
                // A dangling else with no adjacent if is dropped.
                if let Some(cond) = open_cond {
                    let alt = b.add("else");
                    b.graph.add_edge(cond, alt, EdgeKind::FalseBranch);
                    b.graph.add_edge(alt, cond, EdgeKind::Sequence);
                }
            }
            Some("while") | Some("for") | Some("loop") => {
                let header = b.add("while");
                b.graph.add_edge(last, header, exit_kind(last_kind));

                let body = b.add("body");
                b.graph.add_edge(header, body, EdgeKind::TrueBranch);
                b.graph.add_edge(body, header, EdgeKind::LoopBack);

                last = header;
                last_kind = LastKind::Loop;
                open_cond = None;
            }
            _ => {
                let stmt = b.add("stmt");
                b.graph.add_edge(last, stmt, exit_kind(last_kind));

                last = stmt;
                last_kind = LastKind::Plain;
                open_cond = None;
            }
        }
    }

    let end = b.add("end");
    b.graph.add_edge(last, end, exit_kind(last_kind));

    b.graph
}

/// Edge kind for leaving the previous statement's node
fn exit_kind(last: LastKind) -> EdgeKind {
    match last {
        LastKind::Loop => EdgeKind::LoopExit,
        LastKind::Plain | LastKind::Cond => EdgeKind::Sequence,
    }
}

/// Match a control-flow keyword at the start of a line
///
/// The keyword must be followed by a non-identifier character (or end of
/// line), so `iffy = 1` is an ordinary statement.
fn leading_keyword(line: &str) -> Option<&'static str> {
    const KEYWORDS: [&str; 6] = ["elif", "else", "if", "while", "for", "loop"];

    for kw in KEYWORDS {
        if let Some(rest) = line.strip_prefix(kw) {
            let boundary = rest
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric() && c != '_');
            if boundary {
                return Some(kw);
            }
        }
    }
    None
}
