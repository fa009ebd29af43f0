// Primepath: prime-path coverage engine for control-flow graphs
//
// Enumerates every maximal simple path through a directed CFG (including
// single cycle traversals), filters out contained sub-paths, and returns
// the prime paths a test suite must exercise for prime-path coverage.

pub mod cfg;
pub mod cli;
pub mod extract;
pub mod output;

pub use cfg::{prime_paths, FlowGraph, PathKind, PrimePath};
pub use extract::{extract_cfgs_from_file, CfgArtifact, ExtractError};
