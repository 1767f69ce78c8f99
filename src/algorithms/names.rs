//! Name-table queries

use crate::storage::DirectedGraph;

/// Names starting with `prefix`, sorted ascending (byte order)
///
/// # Example
///
/// ```
/// use trueno_linkgraph::{names_with_prefix, DirectedGraph};
///
/// let graph = DirectedGraph::from_adjacency(
///     vec![vec![], vec![], vec![]],
///     vec!["bob".into(), "anna".into(), "aaron".into()],
/// )
/// .unwrap();
///
/// assert_eq!(names_with_prefix(&graph, "a"), vec!["aaron", "anna"]);
/// ```
#[must_use]
pub fn names_with_prefix<'g>(graph: &'g DirectedGraph, prefix: &str) -> Vec<&'g str> {
    let mut matches: Vec<&str> = graph
        .names()
        .iter()
        .map(String::as_str)
        .filter(|name| name.starts_with(prefix))
        .collect();
    matches.sort_unstable();
    matches
}
