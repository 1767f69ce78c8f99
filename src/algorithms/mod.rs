//! Graph algorithms (BFS shortest path, clique approximation, `PageRank`, reachability)
//!
//! Each algorithm reads a loaded [`DirectedGraph`](crate::DirectedGraph) and
//! returns its own result type; none of them depend on one another.

pub mod clique;
pub mod names;
pub mod pagerank;
pub mod reachability;
pub mod shortest_path;

pub use clique::{approximate_all_cliques, approximate_max_clique};
pub use names::names_with_prefix;
pub use pagerank::{
    pagerank, sort_results, top_results, PageRank, PageRankOptions, SearchResult, DEFAULT_DAMPING,
    DEFAULT_INITIAL_WEIGHT, DEFAULT_ITERATIONS,
};
pub use reachability::{emit_subgraph, reachable_set, weak_component, Subgraph};
pub use shortest_path::{shortest_path, Path};
