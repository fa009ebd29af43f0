//! Prime-path computation over control-flow graphs
//!
//! This module implements the prime-path coverage criterion: enumerate every
//! maximal simple path through a directed graph (allowing a single
//! cycle-closing return to the path's own start node), then drop every path
//! that occurs as a contiguous sub-sequence of a longer one. What survives
//! is the minimal path set a test suite must exercise for prime-path
//! coverage.

use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

/// A prime path through a CFG
///
/// An ordered, non-empty sequence of node identifiers that is maximal
/// (cannot be extended without repeating a node) and is not contained in any
/// other maximal path of the same graph. Each path carries a unique
/// identifier derived from a BLAKE3 hash of the identifier sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrimePath<N> {
    /// Unique identifier (BLAKE3 hash of the node sequence)
    pub path_id: String,
    /// Ordered node identifiers in walk order
    pub nodes: Vec<N>,
    /// Classification of this path
    pub kind: PathKind,
}

impl<N> PrimePath<N>
where
    N: Eq + Display,
{
    /// Create a prime path from a node sequence
    pub fn new(nodes: Vec<N>) -> Self {
        let kind = if nodes.len() >= 2 && nodes.first() == nodes.last() {
            PathKind::CycleClosing
        } else {
            PathKind::Simple
        };
        let path_id = hash_path(&nodes);

        Self {
            path_id,
            nodes,
            kind,
        }
    }

    /// Number of nodes in this path
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if this path is empty (never true for computed paths)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node of the walk
    pub fn start(&self) -> Option<&N> {
        self.nodes.first()
    }

    /// Last node of the walk
    pub fn end(&self) -> Option<&N> {
        self.nodes.last()
    }

    /// Check if this path visits a specific node
    pub fn contains(&self, node: &N) -> bool {
        self.nodes.contains(node)
    }

    /// Check if this path closes a cycle back to its start
    pub fn is_cycle(&self) -> bool {
        self.kind == PathKind::CycleClosing
    }
}

/// Classification of maximal paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathKind {
    /// Simple path with no repeated nodes
    Simple,
    /// Path whose final edge returns to its own start node
    CycleClosing,
}

/// Compute the BLAKE3 hash of a node identifier sequence
///
/// Each identifier is hashed with a length prefix, and the element count is
/// included, so sequences that concatenate to the same byte string still
/// hash differently.
pub fn hash_path<N: Display>(nodes: &[N]) -> String {
    let mut hasher = blake3::Hasher::new();

    hasher.update(&nodes.len().to_le_bytes());

    for node in nodes {
        let bytes = node.to_string().into_bytes();
        hasher.update(&bytes.len().to_le_bytes());
        hasher.update(&bytes);
    }

    hasher.finalize().to_hex().to_string()
}

/// Enumerate all maximal simple paths through a directed graph
///
/// Seeds a depth-first extension search at every node, so paths starting
/// inside loops or in components unreachable from any conventional entry are
/// still found. A path is extended with each unvisited successor of its last
/// node; a successor equal to the path's start node closes a cycle and
/// terminates that walk. A path none of whose successors extend it is
/// maximal and recorded.
///
/// The search uses an explicit work list rather than recursion, so long
/// paths cannot exhaust the call stack. Each work-list entry owns its path
/// and visited set; sibling branches never share mutable state.
///
/// Returned paths are keyed by their exact node-index sequence, collapsing
/// duplicate derivations. The result count is worst-case exponential in the
/// node count; callers needing a bound must reject oversized graphs before
/// calling.
pub fn enumerate_maximal_paths<N, E>(graph: &DiGraph<N, E>) -> HashSet<Vec<NodeIndex>> {
    let mut maximal: HashSet<Vec<NodeIndex>> = HashSet::new();

    for start in graph.node_indices() {
        let mut work: Vec<(Vec<NodeIndex>, HashSet<NodeIndex>)> =
            vec![(vec![start], HashSet::from([start]))];

        while let Some((path, visited)) = work.pop() {
            let Some(&last) = path.last() else {
                continue;
            };

            let mut extended = false;
            for succ in graph.neighbors(last) {
                // A successor equal to the start closes a cycle; the closing
                // edge terminates the walk. The length guard means a lone
                // self-loop never yields (n, n). The node is recorded as a
                // bare length-1 path instead.
                if succ == path[0] && path.len() > 1 {
                    let mut closed = path.clone();
                    closed.push(succ);
                    maximal.insert(closed);
                    extended = true;
                    continue;
                }

                if visited.contains(&succ) {
                    continue;
                }

                extended = true;
                let mut next_path = path.clone();
                next_path.push(succ);
                let mut next_visited = visited.clone();
                next_visited.insert(succ);
                work.push((next_path, next_visited));
            }

            if !extended {
                maximal.insert(path);
            }
        }
    }

    maximal
}

/// Check whether `a` occurs in `b` as a proper contiguous sub-sequence
///
/// Proper means strictly shorter: equal-length sequences are never subpaths
/// of each other. Comparison is element-by-element over a sliding window,
/// never over a delimited string rendering.
pub fn is_proper_subpath<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    if a.is_empty() || a.len() >= b.len() {
        return false;
    }
    b.windows(a.len()).any(|window| window == a)
}

/// Compute the prime paths of a directed graph
///
/// 1. Enumerate all maximal simple paths via [`enumerate_maximal_paths`].
/// 2. Discard every candidate that is a proper contiguous sub-sequence of
///    another candidate.
/// 3. Sort by descending length, then lexicographically by node identifier,
///    for deterministic output. The order carries no traversal meaning.
///
/// Total over well-formed graphs: the empty graph yields an empty list and
/// no input produces an error.
pub fn prime_paths<N, E>(graph: &DiGraph<N, E>) -> Vec<PrimePath<N>>
where
    N: Clone + Eq + Hash + Ord + Display,
{
    let candidates: Vec<Vec<NodeIndex>> = enumerate_maximal_paths(graph)
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect();

    let mut primes: Vec<PrimePath<N>> = candidates
        .iter()
        .filter(|p| !candidates.iter().any(|q| is_proper_subpath(p, q)))
        .map(|p| PrimePath::new(p.iter().map(|&ix| graph[ix].clone()).collect()))
        .collect();

    primes.sort_by(|a, b| {
        b.nodes
            .len()
            .cmp(&a.nodes.len())
            .then_with(|| a.nodes.cmp(&b.nodes))
    });

    primes
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a graph from explicit nodes and edges over &str identifiers
    fn graph_from(nodes: &[&str], edges: &[(&str, &str)]) -> DiGraph<String, ()> {
        let mut g = DiGraph::new();
        let mut index = std::collections::HashMap::new();

        for &n in nodes {
            index.insert(n, g.add_node(n.to_string()));
        }
        for &(from, to) in edges {
            g.add_edge(index[from], index[to], ());
        }

        g
    }

    fn node_lists(paths: &[PrimePath<String>]) -> Vec<Vec<&str>> {
        paths
            .iter()
            .map(|p| p.nodes.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_linear_chain() {
        let g = graph_from(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        let primes = prime_paths(&g);

        assert_eq!(node_lists(&primes), vec![vec!["A", "B", "C"]]);
    }

    #[test]
    fn test_diamond() {
        let g = graph_from(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")],
        );
        let primes = prime_paths(&g);

        assert_eq!(
            node_lists(&primes),
            vec![vec!["A", "B", "D"], vec!["A", "C", "D"]]
        );
    }

    #[test]
    fn test_two_node_cycle_keeps_both_closures() {
        let g = graph_from(&["A", "B"], &[("A", "B"), ("B", "A")]);
        let primes = prime_paths(&g);

        // Neither closure is a sub-sequence of the other (equal length).
        assert_eq!(
            node_lists(&primes),
            vec![vec!["A", "B", "A"], vec!["B", "A", "B"]]
        );
        assert!(primes.iter().all(PrimePath::is_cycle));
    }

    #[test]
    fn test_pure_self_loop_yields_bare_node() {
        let g = graph_from(&["A"], &[("A", "A")]);
        let primes = prime_paths(&g);

        // The length guard prevents the (A, A) closure on a length-1 path.
        assert_eq!(node_lists(&primes), vec![vec!["A"]]);
        assert_eq!(primes[0].kind, PathKind::Simple);
    }

    #[test]
    fn test_empty_graph() {
        let g: DiGraph<String, ()> = DiGraph::new();
        assert!(prime_paths(&g).is_empty());
    }

    #[test]
    fn test_isolated_node_survives() {
        let g = graph_from(&["A", "B", "X"], &[("A", "B")]);
        let primes = prime_paths(&g);
        let lists = node_lists(&primes);

        assert!(lists.contains(&vec!["X"]));
        assert!(lists.contains(&vec!["A", "B"]));
        assert_eq!(lists.len(), 2);
    }

    #[test]
    fn test_loop_with_exit() {
        // 0 -> 1, 1 -> 2, 2 -> 1, 1 -> 3: classic while loop shape.
        let g = graph_from(
            &["0", "1", "2", "3"],
            &[("0", "1"), ("1", "2"), ("2", "1"), ("1", "3")],
        );
        let primes = prime_paths(&g);
        let lists = node_lists(&primes);

        // One full loop traversal from each node on the cycle.
        assert!(lists.contains(&vec!["1", "2", "1"]));
        assert!(lists.contains(&vec!["2", "1", "2"]));
        // Entry through the loop body to the exit.
        assert!(lists.contains(&vec!["0", "1", "2"]));
        assert!(lists.contains(&vec!["0", "1", "3"]));
        assert!(lists.contains(&vec!["2", "1", "3"]));
        assert_eq!(lists.len(), 5);
    }

    #[test]
    fn test_isolated_cycle_without_entry() {
        // Enumeration seeds every node, so a cycle unreachable from any
        // root still produces its closures.
        let g = graph_from(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "A")]);
        let primes = prime_paths(&g);

        assert_eq!(
            node_lists(&primes),
            vec![
                vec!["A", "B", "C", "A"],
                vec!["B", "C", "A", "B"],
                vec!["C", "A", "B", "C"],
            ]
        );
    }

    #[test]
    fn test_no_subpath_invariant() {
        let g = graph_from(
            &["A", "B", "C", "D", "E"],
            &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D"), ("D", "E")],
        );
        let primes = prime_paths(&g);

        for p in &primes {
            for q in &primes {
                assert!(
                    !is_proper_subpath(&p.nodes, &q.nodes),
                    "{:?} is contained in {:?}",
                    p.nodes,
                    q.nodes
                );
            }
        }
    }

    #[test]
    fn test_filter_is_idempotent() {
        let g = graph_from(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("B", "C"), ("C", "A"), ("B", "D")],
        );
        let primes = prime_paths(&g);

        let sequences: Vec<Vec<String>> = primes.iter().map(|p| p.nodes.clone()).collect();
        let refiltered: Vec<&Vec<String>> = sequences
            .iter()
            .filter(|p| !sequences.iter().any(|q| is_proper_subpath(p, q)))
            .collect();

        assert_eq!(refiltered.len(), sequences.len());
    }

    #[test]
    fn test_deterministic_output() {
        let edges = [
            ("A", "B"),
            ("A", "C"),
            ("B", "D"),
            ("C", "D"),
            ("D", "B"),
        ];
        let g1 = graph_from(&["A", "B", "C", "D"], &edges);
        let g2 = graph_from(&["D", "C", "B", "A"], &edges);

        // Same graph, different node insertion order: same paths, same order.
        assert_eq!(node_lists(&prime_paths(&g1)), node_lists(&prime_paths(&g2)));
    }

    #[test]
    fn test_duplicate_edges_have_no_effect() {
        let g = graph_from(&["A", "B"], &[("A", "B"), ("A", "B")]);
        let primes = prime_paths(&g);

        assert_eq!(node_lists(&primes), vec![vec!["A", "B"]]);
    }

    #[test]
    fn test_self_loop_with_other_edges() {
        // The self-loop on B never appears in any path: B is always visited
        // by the time its self-edge is considered mid-path.
        let g = graph_from(&["A", "B", "C"], &[("A", "B"), ("B", "B"), ("B", "C")]);
        let primes = prime_paths(&g);

        assert_eq!(node_lists(&primes), vec![vec!["A", "B", "C"]]);
    }

    #[test]
    fn test_ordering_length_desc_then_lex() {
        let g = graph_from(
            &["A", "B", "C", "Z"],
            &[("A", "B"), ("A", "C"), ("Z", "A")],
        );
        let primes = prime_paths(&g);

        assert_eq!(
            node_lists(&primes),
            vec![vec!["Z", "A", "B"], vec!["Z", "A", "C"]]
        );
    }

    #[test]
    fn test_enumerate_returns_set_semantics() {
        // Two derivations of the same walk collapse to one candidate.
        let g = graph_from(&["A", "B"], &[("A", "B"), ("A", "B")]);
        let maximal = enumerate_maximal_paths(&g);

        assert_eq!(maximal.len(), 2); // (A, B) and (B)
    }

    #[test]
    fn test_is_proper_subpath_window_match() {
        let a = ["B", "C"];
        let b = ["A", "B", "C", "D"];
        assert!(is_proper_subpath(&a, &b));
    }

    #[test]
    fn test_is_proper_subpath_rejects_equal_length() {
        let a = ["A", "B"];
        let b = ["A", "B"];
        assert!(!is_proper_subpath(&a, &b));
    }

    #[test]
    fn test_is_proper_subpath_rejects_non_contiguous() {
        let a = ["A", "C"];
        let b = ["A", "B", "C"];
        assert!(!is_proper_subpath(&a, &b));
    }

    #[test]
    fn test_is_proper_subpath_identifier_equality_not_overlap() {
        let a = ["AB"];
        let b = ["A", "B"];
        assert!(!is_proper_subpath(&a, &b));
    }

    #[test]
    fn test_hash_path_deterministic() {
        let nodes = ["A", "B", "C"];
        assert_eq!(hash_path(&nodes), hash_path(&nodes));
    }

    #[test]
    fn test_hash_path_order_sensitive() {
        assert_ne!(hash_path(&["A", "B"]), hash_path(&["B", "A"]));
    }

    #[test]
    fn test_hash_path_boundary_collision_protection() {
        // "AB" + "C" must not collide with "A" + "BC".
        assert_ne!(hash_path(&["AB", "C"]), hash_path(&["A", "BC"]));
    }

    #[test]
    fn test_prime_path_new_simple() {
        let path = PrimePath::new(vec!["A".to_string(), "B".to_string()]);

        assert_eq!(path.kind, PathKind::Simple);
        assert_eq!(path.len(), 2);
        assert!(!path.is_empty());
        assert!(!path.is_cycle());
        assert_eq!(path.start(), Some(&"A".to_string()));
        assert_eq!(path.end(), Some(&"B".to_string()));
        assert!(path.contains(&"A".to_string()));
        assert!(!path.contains(&"C".to_string()));
        assert!(!path.path_id.is_empty());
    }

    #[test]
    fn test_prime_path_new_cycle_closing() {
        let path = PrimePath::new(vec!["A".to_string(), "B".to_string(), "A".to_string()]);

        assert_eq!(path.kind, PathKind::CycleClosing);
        assert!(path.is_cycle());
    }

    #[test]
    fn test_single_node_no_edges() {
        let g = graph_from(&["A"], &[]);
        assert_eq!(node_lists(&prime_paths(&g)), vec![vec!["A"]]);
    }

    #[test]
    fn test_numeric_identifiers() {
        // The core is generic over the identifier type.
        let mut g: DiGraph<u32, ()> = DiGraph::new();
        let a = g.add_node(1);
        let b = g.add_node(2);
        g.add_edge(a, b, ());

        let primes = prime_paths(&g);
        assert_eq!(primes.len(), 1);
        assert_eq!(primes[0].nodes, vec![1, 2]);
    }
}
