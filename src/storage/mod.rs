//! Graph storage layer
//!
//! Provides the CSR link graph and the two-file text loader.

pub mod graph;
pub mod loader;

pub use graph::{DirectedGraph, NodeId};
pub use loader::{load, load_from_readers, LoadError};
