// CFG data structures shared by the extraction and prime-path pipelines

pub mod analysis;
pub mod export;
pub mod paths;

pub use analysis::{find_isolated, in_degree, is_branch_point, is_merge_point, out_degree};
pub use export::{export_dot, export_json, export_paths, GraphExport, PathsExport};
pub use paths::{enumerate_maximal_paths, is_proper_subpath, prime_paths, PathKind, PrimePath};

use petgraph::graph::DiGraph;
use serde::{Deserialize, Serialize};

/// Control-flow graph produced by the extraction collaborator.
///
/// Node weights are opaque block identifiers; the prime-path core only
/// compares them for equality and ordering. Edge weights classify the
/// transfer for visualization and are ignored by the core.
pub type FlowGraph = DiGraph<String, EdgeKind>;

/// Classification of a control-flow transfer between blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Sequential fallthrough
    Sequence,
    /// Conditional branch taken (true)
    TrueBranch,
    /// Conditional branch not taken (false)
    FalseBranch,
    /// Loop back to header
    LoopBack,
    /// Loop exit (condition false)
    LoopExit,
}

impl EdgeKind {
    /// Color for DOT visualization
    pub fn dot_color(&self) -> &'static str {
        match self {
            EdgeKind::Sequence => "black",
            EdgeKind::TrueBranch => "green",
            EdgeKind::FalseBranch => "red",
            EdgeKind::LoopBack => "blue",
            EdgeKind::LoopExit => "orange",
        }
    }

    /// Label for DOT visualization
    pub fn dot_label(&self) -> &'static str {
        match self {
            EdgeKind::Sequence => "",
            EdgeKind::TrueBranch => "T",
            EdgeKind::FalseBranch => "F",
            EdgeKind::LoopBack => "loop",
            EdgeKind::LoopExit => "exit",
        }
    }
}
