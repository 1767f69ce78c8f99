//! Directed link graph in CSR (Compressed Sparse Row) form
//!
//! Vertices are dense `0..n` ids. Each vertex owns a row of distinct outgoing
//! targets, kept in the order they were first seen in the edge list.
//!
//! # Layout
//!
//! ```text
//! Graph: 0 → 2, 0 → 1, 1 → 2
//!
//! row_offsets:     [0, 2, 3, 3]
//! col_indices:     [2, 1, 2]      // file order (BFS order)
//! sorted_indices:  [1, 2, 2]      // same rows, sorted (has_edge, clique, subgraph)
//! rev_row_offsets: [0, 0, 1, 3]
//! rev_col_indices: [0, 0, 1]      // sources of incoming edges
//! ```

use anyhow::{anyhow, ensure, Result};
use std::collections::HashSet;
use std::fmt;

/// Vertex identifier (zero-indexed, dense)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Position of this vertex in per-vertex arrays
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable directed graph with a name per vertex
///
/// Optimized for:
/// - O(1) slice access to outgoing edges (forward CSR)
/// - O(1) slice access to incoming edges (reverse CSR, built once)
/// - O(log d) edge existence checks (sorted copy of every row)
///
/// # Example
///
/// ```
/// use trueno_linkgraph::{DirectedGraph, NodeId};
///
/// let graph = DirectedGraph::from_edge_list(&[(0, 1), (1, 0), (1, 2)]);
///
/// assert_eq!(graph.vertex_count(), 3);
/// assert_eq!(graph.neighbors(NodeId(1)), &[0, 2]);
/// assert!(graph.is_bidirectional(NodeId(0), NodeId(1)));
/// assert!(!graph.is_bidirectional(NodeId(1), NodeId(2)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DirectedGraph {
    /// Forward CSR: vertex i's edges live in `row_offsets[i]..row_offsets[i + 1]`
    row_offsets: Vec<u32>,

    /// Forward CSR: edge targets in first-seen order
    col_indices: Vec<u32>,

    /// Forward CSR rows sorted ascending (same offsets as `col_indices`)
    sorted_indices: Vec<u32>,

    /// Reverse CSR: row offsets for incoming edges
    rev_row_offsets: Vec<u32>,

    /// Reverse CSR: edge sources, ascending within each row
    rev_col_indices: Vec<u32>,

    /// Vertex names, aligned with vertex ids
    names: Vec<String>,
}

impl DirectedGraph {
    /// Create new empty graph
    #[must_use]
    pub fn new() -> Self {
        Self {
            row_offsets: vec![0],
            rev_row_offsets: vec![0],
            ..Self::default()
        }
    }

    /// Build a graph from per-vertex adjacency rows and a name table
    ///
    /// Row `i` lists the outgoing targets of vertex `i`. Duplicate targets in a
    /// row are collapsed, keeping the first occurrence.
    ///
    /// # Errors
    ///
    /// Returns error if `names.len() != rows.len()` or any target is not a
    /// valid vertex id.
    pub fn from_adjacency(rows: Vec<Vec<u32>>, names: Vec<String>) -> Result<Self> {
        ensure!(
            rows.len() == names.len(),
            "{} adjacency rows but {} names",
            rows.len(),
            names.len()
        );

        let n = rows.len();
        for (source, row) in rows.iter().enumerate() {
            if let Some(&bad) = row.iter().find(|&&t| t as usize >= n) {
                return Err(anyhow!(
                    "Edge {source} → {bad} targets a vertex outside 0..{n}"
                ));
            }
        }

        Ok(Self::build(rows, names))
    }

    /// Create graph from `(source, target)` pairs, naming each vertex by its id
    ///
    /// The vertex count is one past the largest id seen.
    #[must_use]
    pub fn from_edge_list(edges: &[(u32, u32)]) -> Self {
        let Some(max_id) = edges.iter().flat_map(|&(s, t)| [s, t]).max() else {
            return Self::new();
        };

        let n = max_id as usize + 1;
        let mut rows = vec![Vec::new(); n];
        for &(source, target) in edges {
            rows[source as usize].push(target);
        }
        let names = (0..n).map(|id| id.to_string()).collect();

        Self::build(rows, names)
    }

    /// Assemble CSR arrays. Callers guarantee every target is `< rows.len()`
    /// and `names.len() == rows.len()`.
    #[allow(clippy::cast_possible_truncation)] // Graphs >4B edges not supported
    pub(crate) fn build(rows: Vec<Vec<u32>>, names: Vec<String>) -> Self {
        let n = rows.len();

        let mut row_offsets = Vec::with_capacity(n + 1);
        let mut col_indices = Vec::new();
        let mut sorted_indices = Vec::new();
        let mut in_degrees = vec![0_u32; n];
        let mut seen = HashSet::new();

        row_offsets.push(0);
        for row in rows {
            seen.clear();
            let start = col_indices.len();
            for target in row {
                if seen.insert(target) {
                    col_indices.push(target);
                    in_degrees[target as usize] += 1;
                }
            }
            sorted_indices.extend_from_slice(&col_indices[start..]);
            sorted_indices[start..].sort_unstable();
            row_offsets.push(col_indices.len() as u32);
        }

        // Reverse CSR via counting sort; sources are visited in ascending order
        let mut rev_row_offsets = Vec::with_capacity(n + 1);
        let mut offset = 0_u32;
        rev_row_offsets.push(offset);
        for degree in &in_degrees {
            offset += degree;
            rev_row_offsets.push(offset);
        }

        let mut cursor: Vec<u32> = rev_row_offsets[..n].to_vec();
        let mut rev_col_indices = vec![0_u32; col_indices.len()];
        for source in 0..n {
            let start = row_offsets[source] as usize;
            let end = row_offsets[source + 1] as usize;
            for &target in &col_indices[start..end] {
                let slot = &mut cursor[target as usize];
                rev_col_indices[*slot as usize] = source as u32;
                *slot += 1;
            }
        }

        Self {
            row_offsets,
            col_indices,
            sorted_indices,
            rev_row_offsets,
            rev_col_indices,
            names,
        }
    }

    /// Number of vertices
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.names.len()
    }

    /// Number of distinct directed edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.col_indices.len()
    }

    /// Whether `node` is a valid vertex id for this graph
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.vertex_count()
    }

    /// Validate a vertex id supplied by a caller
    ///
    /// # Errors
    ///
    /// Returns error if `node` is out of bounds
    pub fn check_node(&self, node: NodeId) -> Result<()> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(anyhow!(
                "Node ID {} out of bounds (graph has {} vertices)",
                node.0,
                self.vertex_count()
            ))
        }
    }

    /// Outgoing targets of `node`, in edge-list order
    ///
    /// # Panics
    ///
    /// Panics if `node` is out of bounds; use [`Self::outgoing_neighbors`]
    /// for a checked lookup.
    #[must_use]
    pub fn neighbors(&self, node: NodeId) -> &[u32] {
        let (start, end) = Self::row(&self.row_offsets, node);
        &self.col_indices[start..end]
    }

    /// Outgoing targets of `node`, ascending by id
    ///
    /// # Panics
    ///
    /// Panics if `node` is out of bounds
    #[must_use]
    pub fn sorted_neighbors(&self, node: NodeId) -> &[u32] {
        let (start, end) = Self::row(&self.row_offsets, node);
        &self.sorted_indices[start..end]
    }

    /// Get outgoing neighbors of a node
    ///
    /// # Errors
    ///
    /// Returns error if node ID is out of bounds
    pub fn outgoing_neighbors(&self, node: NodeId) -> Result<&[u32]> {
        self.check_node(node)?;
        Ok(self.neighbors(node))
    }

    /// Get incoming neighbors (sources linking to `node`), ascending
    ///
    /// # Errors
    ///
    /// Returns error if node ID is out of bounds
    pub fn incoming_neighbors(&self, node: NodeId) -> Result<&[u32]> {
        self.check_node(node)?;
        Ok(self.incoming(node))
    }

    pub(crate) fn incoming(&self, node: NodeId) -> &[u32] {
        let (start, end) = Self::row(&self.rev_row_offsets, node);
        &self.rev_col_indices[start..end]
    }

    /// Number of distinct outgoing edges of `node`
    ///
    /// # Panics
    ///
    /// Panics if `node` is out of bounds
    #[must_use]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let (start, end) = Self::row(&self.row_offsets, node);
        end - start
    }

    /// Edge existence check, O(log out-degree)
    ///
    /// # Panics
    ///
    /// Panics if `from` is out of bounds
    #[must_use]
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        let (start, end) = Self::row(&self.row_offsets, from);
        self.sorted_indices[start..end].binary_search(&to.0).is_ok()
    }

    /// Both `a → b` and `b → a` exist
    ///
    /// # Panics
    ///
    /// Panics if either id is out of bounds
    #[must_use]
    pub fn is_bidirectional(&self, a: NodeId, b: NodeId) -> bool {
        self.has_edge(a, b) && self.has_edge(b, a)
    }

    /// Number of vertices without outgoing edges
    #[must_use]
    pub fn sink_count(&self) -> usize {
        self.row_offsets.windows(2).filter(|w| w[0] == w[1]).count()
    }

    /// Name of `node`
    ///
    /// # Panics
    ///
    /// Panics if `node` is out of bounds
    #[must_use]
    pub fn name(&self, node: NodeId) -> &str {
        &self.names[node.index()]
    }

    /// Get node name, `None` when out of bounds
    #[must_use]
    pub fn get_name(&self, node: NodeId) -> Option<&str> {
        self.names.get(node.index()).map(String::as_str)
    }

    /// All names, indexed by vertex id
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// First vertex whose name equals `name` exactly
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| NodeId(idx as u32))
    }

    /// Iterate every edge as `(source, target)` in CSR order
    #[allow(clippy::cast_possible_truncation)]
    pub fn iter_edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.vertex_count()).flat_map(move |source| {
            self.neighbors(NodeId(source as u32))
                .iter()
                .map(move |&target| (source as u32, target))
        })
    }

    fn row(offsets: &[u32], node: NodeId) -> (usize, usize) {
        let idx = node.index();
        (offsets[idx] as usize, offsets[idx + 1] as usize)
    }
}
