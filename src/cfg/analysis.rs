//! CFG structure queries: degrees, isolated nodes, branch and merge points

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

/// Count incoming edges to a node
pub fn in_degree<N, E>(graph: &DiGraph<N, E>, node: NodeIndex) -> usize {
    graph.neighbors_directed(node, Direction::Incoming).count()
}

/// Count outgoing edges from a node
pub fn out_degree<N, E>(graph: &DiGraph<N, E>, node: NodeIndex) -> usize {
    graph.neighbors_directed(node, Direction::Outgoing).count()
}

/// Check if a node is a branch point (multiple outgoing edges)
pub fn is_branch_point<N, E>(graph: &DiGraph<N, E>, node: NodeIndex) -> bool {
    out_degree(graph, node) > 1
}

/// Check if a node is a merge point (multiple incoming edges)
pub fn is_merge_point<N, E>(graph: &DiGraph<N, E>, node: NodeIndex) -> bool {
    in_degree(graph, node) > 1
}

/// Find all isolated nodes (no incoming and no outgoing edges)
///
/// Every isolated node yields a length-1 prime path, so these are worth
/// surfacing separately when reporting on a graph.
pub fn find_isolated<N, E>(graph: &DiGraph<N, E>) -> Vec<NodeIndex> {
    graph
        .node_indices()
        .filter(|&idx| in_degree(graph, idx) == 0 && out_degree(graph, idx) == 0)
        .collect()
}
