//! Reachability extraction and subgraph export
//!
//! Traversal uses an explicit stack, so depth is bounded by heap memory
//! rather than the call stack.
//!
//! # Output format
//!
//! ```text
//! out_pages.txt        out_links.txt
//! 0\talice             0\t1
//! 1\tbob               1\t0
//! ```

use crate::storage::DirectedGraph;
use crate::NodeId;
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Vertices reachable from `start` along outgoing edges, `start` included
///
/// # Errors
///
/// Returns error if `start` is out of bounds
///
/// # Example
///
/// ```
/// use trueno_linkgraph::{reachable_set, DirectedGraph, NodeId};
///
/// let graph = DirectedGraph::from_edge_list(&[(0, 1), (1, 2), (3, 0)]);
///
/// let reached = reachable_set(&graph, NodeId(0)).unwrap();
/// assert_eq!(reached.len(), 3);
/// assert!(!reached.contains(&NodeId(3))); // 3 → 0 points the wrong way
/// ```
pub fn reachable_set(graph: &DirectedGraph, start: NodeId) -> Result<BTreeSet<NodeId>> {
    graph.check_node(start)?;
    let reached = traverse(graph, start, false);
    debug!(start = start.0, reached = reached.len(), "Forward reachability");
    Ok(reached)
}

/// Weakly connected component of `start`: edges are followed in both directions
///
/// Incoming edges come from the reverse index built at load time.
///
/// # Errors
///
/// Returns error if `start` is out of bounds
pub fn weak_component(graph: &DirectedGraph, start: NodeId) -> Result<BTreeSet<NodeId>> {
    graph.check_node(start)?;
    let reached = traverse(graph, start, true);
    debug!(start = start.0, reached = reached.len(), "Weak component");
    Ok(reached)
}

#[allow(clippy::cast_possible_truncation)] // Graphs >4B nodes not supported
fn traverse(graph: &DirectedGraph, start: NodeId, undirected: bool) -> BTreeSet<NodeId> {
    let mut visited = vec![false; graph.vertex_count()];
    let mut stack = vec![start];
    visited[start.index()] = true;

    while let Some(current) = stack.pop() {
        let incoming: &[u32] = if undirected {
            graph.incoming(current)
        } else {
            &[]
        };

        for &next in graph.neighbors(current).iter().chain(incoming) {
            if !visited[next as usize] {
                visited[next as usize] = true;
                stack.push(NodeId(next));
            }
        }
    }

    visited
        .iter()
        .enumerate()
        .filter(|&(_, &seen)| seen)
        .map(|(idx, _)| NodeId(idx as u32))
        .collect()
}

/// Induced subgraph on a vertex set, ready to be written out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subgraph {
    /// `(id, name)` for every vertex in the set, ascending by id
    pub pages: Vec<(NodeId, String)>,
    /// Original-direction edges whose endpoints are both in the set
    pub links: Vec<(NodeId, NodeId)>,
}

impl Subgraph {
    /// Write `<id>\t<name>` and `<source>\t<target>` lines
    ///
    /// # Errors
    ///
    /// Returns error if either writer fails
    pub fn write_to<P: Write, L: Write>(&self, mut pages: P, mut links: L) -> std::io::Result<()> {
        for (id, name) in &self.pages {
            writeln!(pages, "{id}\t{name}")?;
        }
        for (source, target) in &self.links {
            writeln!(links, "{source}\t{target}")?;
        }
        pages.flush()?;
        links.flush()
    }

    /// Write the subgraph to two files, replacing existing content
    ///
    /// # Errors
    ///
    /// Returns error if a file cannot be created or written
    pub fn write_files<P: AsRef<Path>, L: AsRef<Path>>(&self, pages: P, links: L) -> Result<()> {
        let pages = pages.as_ref();
        let links = links.as_ref();

        let pages_file = File::create(pages)
            .with_context(|| format!("Failed to create {}", pages.display()))?;
        let links_file = File::create(links)
            .with_context(|| format!("Failed to create {}", links.display()))?;

        self.write_to(BufWriter::new(pages_file), BufWriter::new(links_file))
            .with_context(|| {
                format!("Failed to write {} / {}", pages.display(), links.display())
            })?;

        info!(
            pages = self.pages.len(),
            links = self.links.len(),
            "Wrote subgraph"
        );
        Ok(())
    }
}

/// Extract `(id, name)` rows and forward edges for every vertex in `nodes`
///
/// An edge `v → t` is kept when both ends are in the set; equivalently, `v`
/// appears among the incoming sources of `t` within the set. Edges keep their
/// original orientation and appear once each, ordered by source and then by
/// target id.
///
/// # Errors
///
/// Returns error if any id in `nodes` is out of bounds
pub fn emit_subgraph(graph: &DirectedGraph, nodes: &BTreeSet<NodeId>) -> Result<Subgraph> {
    for &node in nodes {
        graph.check_node(node)?;
    }

    let mut subgraph = Subgraph::default();
    for &node in nodes {
        subgraph.pages.push((node, graph.name(node).to_string()));
        for &target in graph.sorted_neighbors(node) {
            let target = NodeId(target);
            if nodes.contains(&target) {
                subgraph.links.push((node, target));
            }
        }
    }

    Ok(subgraph)
}
