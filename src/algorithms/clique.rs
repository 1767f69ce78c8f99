//! Greedy clique approximation around a seed vertex
//!
//! Clique membership uses bidirectional edges only. The seed's neighbors are
//! taken in ascending id order; each one either extends every existing
//! candidate it is fully connected to (the original candidate stays) or
//! starts a fresh `{seed, neighbor}` pair. The largest candidate wins.
//!
//! This returns *a* maximal clique reachable by that extension order, not
//! necessarily the largest clique in the graph: combinations that skip an
//! earlier neighbor in favour of later ones are never built.

use crate::storage::DirectedGraph;
use crate::NodeId;
use anyhow::Result;
use std::collections::BTreeSet;
use tracing::debug;

/// Approximate maximal clique containing `seed`
///
/// Returns `{seed}` when the seed has no bidirectional neighbor. Ties between
/// equally large candidates go to the one created first, so the order of
/// targets in the edge list never changes the result.
///
/// # Errors
///
/// Returns error if `seed` is out of bounds
///
/// # Example
///
/// ```
/// use trueno_linkgraph::{approximate_max_clique, DirectedGraph, NodeId};
///
/// // Bidirectional triangle 0-1-2, plus a one-way edge 0 → 3
/// let graph = DirectedGraph::from_edge_list(&[
///     (0, 1), (0, 2), (0, 3),
///     (1, 0), (1, 2),
///     (2, 0), (2, 1),
/// ]);
///
/// let clique = approximate_max_clique(&graph, NodeId(0)).unwrap();
/// assert_eq!(clique.into_iter().collect::<Vec<_>>(), vec![NodeId(0), NodeId(1), NodeId(2)]);
/// ```
pub fn approximate_max_clique(graph: &DirectedGraph, seed: NodeId) -> Result<BTreeSet<NodeId>> {
    graph.check_node(seed)?;
    Ok(clique_around(graph, seed))
}

/// Approximate clique of every vertex, indexed by vertex id
///
/// Candidate growth is exponential in the bidirectional degree of each
/// vertex, so this is meant for small graphs.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn approximate_all_cliques(graph: &DirectedGraph) -> Vec<BTreeSet<NodeId>> {
    (0..graph.vertex_count())
        .map(|v| clique_around(graph, NodeId(v as u32)))
        .collect()
}

fn clique_around(graph: &DirectedGraph, seed: NodeId) -> BTreeSet<NodeId> {
    let mut cliques: Vec<Vec<NodeId>> = Vec::new();

    for &candidate in graph.sorted_neighbors(seed) {
        let candidate = NodeId(candidate);
        // Self-loops say nothing about membership
        if candidate == seed || !graph.is_bidirectional(seed, candidate) {
            continue;
        }

        let mut next = cliques.clone();
        for clique in &cliques {
            let joins = clique
                .iter()
                .all(|&member| member == seed || graph.is_bidirectional(candidate, member));
            if joins {
                let mut grown = Vec::with_capacity(clique.len() + 1);
                grown.extend_from_slice(clique);
                grown.push(candidate);
                next.push(grown);
            }
        }
        next.push(vec![seed, candidate]);
        cliques = next;
    }

    debug!(seed = seed.0, candidates = cliques.len(), "Clique candidates built");

    let mut best: Option<&Vec<NodeId>> = None;
    for clique in &cliques {
        if best.map_or(true, |b| clique.len() > b.len()) {
            best = Some(clique);
        }
    }

    best.map_or_else(
        || BTreeSet::from([seed]),
        |clique| clique.iter().copied().collect(),
    )
}
