//! Preferred CFG builder over a tree-sitter syntax tree
//!
//! Uses the leader-based algorithm to find basic-block boundaries:
//! - first statement in the function body
//! - branch targets (consequent/alternative of conditionals, loop bodies)
//! - statements after branches and terminators (merge points)
//!
//! The grammar and parser belong to the caller; this module only walks
//! nodes. Block identifiers are `b0`, `b1`, ... in statement order, so the
//! resulting graph is deterministic for a given tree.

use crate::cfg::{EdgeKind, FlowGraph};
use petgraph::graph::NodeIndex;
use std::collections::{HashMap, HashSet};
use tree_sitter::Node;

/// Build a flow graph from a function definition node
pub fn ast_to_cfg(fn_node: Node) -> FlowGraph {
    AstCfgBuilder::new().build_from_function(fn_node)
}

/// Leader-based CFG builder
pub struct AstCfgBuilder<'a> {
    graph: FlowGraph,
    /// Tree-sitter node ids that start a basic block
    leaders: HashSet<usize>,
    /// Statements grouped per block, in block order
    blocks: Vec<Vec<Node<'a>>>,
    /// Maps statement node ids to their block
    node_to_block: HashMap<usize, usize>,
    /// Graph node per block
    block_nodes: Vec<NodeIndex>,
}

impl<'a> AstCfgBuilder<'a> {
    pub fn new() -> Self {
        Self {
            graph: FlowGraph::new(),
            leaders: HashSet::new(),
            blocks: Vec::new(),
            node_to_block: HashMap::new(),
            block_nodes: Vec::new(),
        }
    }

    /// Build a CFG from a function definition node
    pub fn build_from_function(mut self, fn_node: Node<'a>) -> FlowGraph {
        let body = self.function_body(fn_node);

        self.find_leaders(body);
        self.build_blocks(body);
        self.connect_edges(body);

        self.graph
    }

    /// Identify leader statements (basic-block boundaries)
    fn find_leaders(&mut self, body: Node<'a>) {
        if let Some(first) = self.first_statement(body) {
            self.leaders.insert(first.id());
        }
        self.scan_for_leaders(body);
    }

    fn scan_for_leaders(&mut self, node: Node<'a>) {
        let mut cursor = node.walk();

        for child in node.children(&mut cursor) {
            match child.kind() {
                "if_statement" | "elif_clause" | "else_clause" => {
                    if let Some(consequence) = self.consequence(child) {
                        if let Some(first) = self.first_statement(consequence) {
                            self.leaders.insert(first.id());
                        }
                    }
                    if let Some(alternate) = self.alternate(child) {
                        if let Some(first) = self.first_statement(alternate) {
                            self.leaders.insert(first.id());
                        }
                    }
                    if let Some(next) = child.next_sibling() {
                        self.leaders.insert(next.id());
                    }
                }
                "while_statement" | "for_statement" | "loop_statement" => {
                    if let Some(loop_body) = child.child_by_field_name("body") {
                        if let Some(first) = self.first_statement(loop_body) {
                            self.leaders.insert(first.id());
                        }
                    }
                    if let Some(next) = child.next_sibling() {
                        self.leaders.insert(next.id());
                    }
                }
                "return_statement" | "break_statement" | "continue_statement" => {
                    if let Some(next) = child.next_sibling() {
                        self.leaders.insert(next.id());
                    }
                }
                _ => {
                    self.scan_for_leaders(child);
                }
            }
        }
    }

    /// Group body statements into maximal straight-line blocks
    fn build_blocks(&mut self, body: Node<'a>) {
        let mut current: Vec<Node<'a>> = Vec::new();

        let mut cursor = body.walk();
        for child in body.children(&mut cursor) {
            if !self.is_statement(child) {
                continue;
            }
            if self.leaders.contains(&child.id()) && !current.is_empty() {
                self.blocks.push(std::mem::take(&mut current));
            }
            self.node_to_block.insert(child.id(), self.blocks.len());
            current.push(child);
        }

        if !current.is_empty() {
            self.blocks.push(current);
        }
    }

    /// Create graph nodes per block and wire control-flow edges
    fn connect_edges(&mut self, body: Node<'a>) {
        for id in 0..self.blocks.len() {
            let idx = self.graph.add_node(format!("b{}", id));
            self.block_nodes.push(idx);
        }

        let mut cursor = body.walk();
        for child in body.children(&mut cursor) {
            if self.is_statement(child) {
                self.add_edges_for(child);
            }
        }
    }

    fn add_edges_for(&mut self, node: Node<'a>) {
        match node.kind() {
            "if_statement" | "elif_clause" => self.wire_if(node),
            "while_statement" | "for_statement" | "loop_statement" => self.wire_loop(node),
            _ => {}
        }
    }

    fn wire_if(&mut self, if_node: Node<'a>) {
        let cond = self.block_of(if_node.id());
        let then_blk = self.block_for(self.consequence(if_node));
        let else_blk = self.block_for(self.alternate(if_node));
        let after_blk = self.block_for(if_node.next_sibling());

        if let (Some(cond), Some(then_blk)) = (cond, then_blk) {
            self.graph.add_edge(cond, then_blk, EdgeKind::TrueBranch);
            if let Some(after) = after_blk {
                self.graph.add_edge(then_blk, after, EdgeKind::Sequence);
            }
        }

        if let (Some(cond), Some(else_blk)) = (cond, else_blk) {
            self.graph.add_edge(cond, else_blk, EdgeKind::FalseBranch);
            if let Some(after) = after_blk {
                self.graph.add_edge(else_blk, after, EdgeKind::Sequence);
            }
        } else if let (Some(cond), Some(after)) = (cond, after_blk) {
            // No else branch: the false edge falls through to the merge point.
            self.graph.add_edge(cond, after, EdgeKind::FalseBranch);
        }
    }

    fn wire_loop(&mut self, loop_node: Node<'a>) {
        let header = self.block_of(loop_node.id());
        let body_blk = self.block_for(loop_node.child_by_field_name("body"));
        let after_blk = self.block_for(loop_node.next_sibling());

        if let (Some(header), Some(body_blk)) = (header, body_blk) {
            self.graph.add_edge(header, body_blk, EdgeKind::TrueBranch);
            self.graph.add_edge(body_blk, header, EdgeKind::LoopBack);
        }

        if let (Some(header), Some(after)) = (header, after_blk) {
            self.graph.add_edge(header, after, EdgeKind::LoopExit);
        }
    }

    // Helper methods

    fn function_body(&self, fn_node: Node<'a>) -> Node<'a> {
        if let Some(body) = fn_node.child_by_field_name("body") {
            return body;
        }
        let mut cursor = fn_node.walk();
        for child in fn_node.children(&mut cursor) {
            if child.kind() == "block" {
                return child;
            }
        }
        fn_node
    }

    fn first_statement(&self, block: Node<'a>) -> Option<Node<'a>> {
        let mut cursor = block.walk();
        for child in block.children(&mut cursor) {
            if self.is_statement(child) {
                return Some(child);
            }
        }
        None
    }

    fn is_statement(&self, node: Node<'a>) -> bool {
        node.is_named() && !matches!(node.kind(), "comment" | "line_comment" | "block_comment")
    }

    fn consequence(&self, node: Node<'a>) -> Option<Node<'a>> {
        node.child_by_field_name("consequence")
            .or_else(|| node.child_by_field_name("then"))
            .or_else(|| node.child_by_field_name("body"))
    }

    fn alternate(&self, node: Node<'a>) -> Option<Node<'a>> {
        node.child_by_field_name("alternative")
            .or_else(|| node.child_by_field_name("else"))
    }

    /// Graph node of the block containing a statement node id
    fn block_of(&self, node_id: usize) -> Option<NodeIndex> {
        self.node_to_block
            .get(&node_id)
            .and_then(|&bid| self.block_nodes.get(bid).copied())
    }

    /// Graph node of the block led by a construct's first statement
    fn block_for(&self, node: Option<Node<'a>>) -> Option<NodeIndex> {
        node.and_then(|n| self.first_statement(n))
            .and_then(|first| self.block_of(first.id()))
    }
}

impl<'a> Default for AstCfgBuilder<'a> {
    fn default() -> Self {
        Self::new()
    }
}
