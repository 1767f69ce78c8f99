//! trueno-linkgraph: small-graph toolkit for link and nickname graphs
//!
//! # Overview
//!
//! Loads a directed graph from two flat text files (a source-sorted edge list
//! and an `id name` table) and runs one of four independent algorithms on it:
//! BFS shortest path, greedy clique approximation, `PageRank` (undamped by
//! default, optionally damped) with name search, and reachability extraction.
//!
//! # Quick Start
//!
//! ```no_run
//! use trueno_linkgraph::{load, pagerank, shortest_path, top_results, NodeId, PageRankOptions};
//!
//! # fn example() -> anyhow::Result<()> {
//! let graph = load("pages.txt", "links.txt")?;
//!
//! // Fewest clicks from page 457783 to page 17821
//! let path = shortest_path(&graph, NodeId(457_783), NodeId(17_821))?;
//! println!("{:?}", path.names(&graph));
//!
//! // 20 undamped iterations, then the five best "Disney" pages
//! let ranks = pagerank(&graph, PageRankOptions::default())?;
//! for hit in top_results(ranks.search(&graph, "Disney")?, 5) {
//!     println!("{} score: {}", hit.name, hit.score);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Storage**: CSR rows in edge-list order, sorted row copies for
//!   O(log d) edge checks, reverse CSR for incoming edges
//! - **Loading**: gap-filling parser with typed [`LoadError`]s
//! - **Algorithms**: free functions over `&DirectedGraph`; `PageRank` keeps
//!   its weights in a separate [`PageRank`] state

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod algorithms;
pub mod storage;

// Re-export core types
pub use algorithms::{
    approximate_all_cliques, approximate_max_clique, emit_subgraph, names_with_prefix, pagerank,
    reachable_set, shortest_path, sort_results, top_results, weak_component, PageRank,
    PageRankOptions, Path, SearchResult, Subgraph, DEFAULT_DAMPING, DEFAULT_INITIAL_WEIGHT,
    DEFAULT_ITERATIONS,
};
pub use storage::{load, load_from_readers, DirectedGraph, LoadError, NodeId};

// Error type
pub use anyhow::{Error, Result};
