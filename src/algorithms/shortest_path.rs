//! Unweighted shortest path via breadth-first search
//!
//! The frontier carries full path prefixes rather than predecessor links, so
//! the answer is available the moment the destination is dequeued.
//!
//! # Example
//!
//! ```
//! use trueno_linkgraph::{shortest_path, DirectedGraph, NodeId};
//!
//! let graph = DirectedGraph::from_edge_list(&[(0, 1), (1, 2), (0, 3)]);
//!
//! let path = shortest_path(&graph, NodeId(0), NodeId(2)).unwrap();
//! assert_eq!(path.nodes(), &[NodeId(0), NodeId(1), NodeId(2)]);
//! assert_eq!(path.steps(), Some(2));
//! ```

use crate::storage::DirectedGraph;
use crate::NodeId;
use anyhow::Result;
use std::collections::VecDeque;

/// Vertex sequence from source to destination, inclusive
///
/// An empty path means the destination is unreachable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    nodes: Vec<NodeId>,
}

impl Path {
    /// The "no path found" result
    #[must_use]
    pub const fn not_found() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Vertices in visiting order
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// True when no path exists
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of vertices on the path
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges traversed (`len - 1`), `None` when no path exists
    #[must_use]
    pub fn steps(&self) -> Option<usize> {
        self.nodes.len().checked_sub(1)
    }

    /// Vertex names along the path
    ///
    /// # Panics
    ///
    /// Panics if the path was computed on a different, smaller graph
    #[must_use]
    pub fn names<'g>(&self, graph: &'g DirectedGraph) -> Vec<&'g str> {
        self.nodes.iter().map(|&n| graph.name(n)).collect()
    }

    /// Consume into the underlying vertex list
    #[must_use]
    pub fn into_nodes(self) -> Vec<NodeId> {
        self.nodes
    }
}

/// Shortest path from `from` to `to` by edge count
///
/// Among equal-length paths the one discovered first wins, following the
/// adjacency order of each vertex.
///
/// # Returns
///
/// - `[from]` when `from == to`
/// - an empty [`Path`] when `to` is unreachable
///
/// # Errors
///
/// Returns error if either id is out of bounds
///
/// # Example
///
/// ```
/// use trueno_linkgraph::{shortest_path, DirectedGraph, NodeId};
///
/// let graph = DirectedGraph::from_edge_list(&[(0, 1), (2, 0)]);
///
/// // Edges are directed: 1 cannot reach 0
/// assert!(shortest_path(&graph, NodeId(1), NodeId(0)).unwrap().is_empty());
/// ```
pub fn shortest_path(graph: &DirectedGraph, from: NodeId, to: NodeId) -> Result<Path> {
    graph.check_node(from)?;
    graph.check_node(to)?;

    let mut visited = vec![false; graph.vertex_count()];
    let mut queue: VecDeque<Vec<NodeId>> = VecDeque::new();

    visited[from.index()] = true;
    queue.push_back(vec![from]);

    while let Some(route) = queue.pop_front() {
        let Some(&current) = route.last() else {
            continue;
        };
        if current == to {
            return Ok(Path { nodes: route });
        }

        for &next in graph.neighbors(current) {
            let next = NodeId(next);
            if !visited[next.index()] {
                visited[next.index()] = true;
                let mut extended = Vec::with_capacity(route.len() + 1);
                extended.extend_from_slice(&route);
                extended.push(next);
                queue.push_back(extended);
            }
        }
    }

    Ok(Path::not_found())
}
