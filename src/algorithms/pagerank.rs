//! `PageRank` by power iteration, plus name search by score
//!
//! Every vertex starts with the same weight. One step hands each vertex's
//! weight out in equal shares along its outgoing edges. By default there is
//! no damping and no teleportation: a sink (out-degree 0) hands out nothing,
//! so its weight leaves the system on every step.
//!
//! ```text
//! W'(u) = Σ W(v) / outdegree(v)    over edges v → u
//! ```
//!
//! With a damping factor `d`, each vertex keeps back `d · W(v)` and a sink
//! keeps back all of its weight. The pooled weight is then spread evenly over
//! every vertex, so the total never changes:
//!
//! ```text
//! W'(u) = Σ (1 - d) · W(v) / outdegree(v)  +  pool / n
//! ```
//!
//! The engine keeps weights in its own arrays indexed by vertex id; the graph
//! itself is never mutated.

use crate::storage::DirectedGraph;
use crate::NodeId;
use anyhow::{ensure, Result};
use std::cmp::Ordering;
use tracing::debug;

/// Starting weight of every vertex
pub const DEFAULT_INITIAL_WEIGHT: f64 = 100.0;

/// Iterations run before answering queries
pub const DEFAULT_ITERATIONS: usize = 20;

/// Conventional damping factor for [`PageRankOptions::damping`]
pub const DEFAULT_DAMPING: f64 = 0.15;

/// Tunables for a `PageRank` run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRankOptions {
    /// Weight assigned to every vertex before the first step
    pub initial_weight: f64,
    /// Number of power-iteration steps
    pub iterations: usize,
    /// Share of every vertex's weight spread evenly over the whole graph;
    /// `None` runs the undamped update
    pub damping: Option<f64>,
}

impl Default for PageRankOptions {
    fn default() -> Self {
        Self {
            initial_weight: DEFAULT_INITIAL_WEIGHT,
            iterations: DEFAULT_ITERATIONS,
            damping: None,
        }
    }
}

/// A vertex matching a search, with its current score
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// `PageRank` weight at query time
    pub score: f64,
    /// Vertex id
    pub node: NodeId,
    /// Vertex name
    pub name: String,
}

/// Per-vertex `PageRank` state for one graph
#[derive(Debug, Clone)]
pub struct PageRank {
    weights: Vec<f64>,
    next_weights: Vec<f64>,
    damping: Option<f64>,
}

impl PageRank {
    /// Start every vertex at [`DEFAULT_INITIAL_WEIGHT`]
    #[must_use]
    pub fn new(graph: &DirectedGraph) -> Self {
        Self::with_initial_weight(graph, DEFAULT_INITIAL_WEIGHT)
    }

    /// Start every vertex at `initial_weight`
    #[must_use]
    pub fn with_initial_weight(graph: &DirectedGraph, initial_weight: f64) -> Self {
        let n = graph.vertex_count();
        Self {
            weights: vec![initial_weight; n],
            next_weights: vec![0.0; n],
            damping: None,
        }
    }

    /// Switch to the damped update with factor `damping` (in `0.0..=1.0`)
    #[must_use]
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = Some(damping);
        self
    }

    /// Damping factor in use, `None` when undamped
    #[must_use]
    pub fn damping(&self) -> Option<f64> {
        self.damping
    }

    /// One power-iteration update
    ///
    /// # Errors
    ///
    /// Returns error if `graph` has a different vertex count than the graph
    /// this engine was created for, or the damping factor is outside
    /// `0.0..=1.0`.
    #[allow(clippy::cast_precision_loss)] // Out-degrees far below 2^52
    #[allow(clippy::cast_possible_truncation)]
    pub fn step(&mut self, graph: &DirectedGraph) -> Result<()> {
        self.check_graph(graph)?;
        if let Some(damping) = self.damping {
            ensure!(
                (0.0..=1.0).contains(&damping),
                "Damping factor {damping} outside 0.0..=1.0"
            );
        }

        let mut pool = 0.0;
        for (v, &weight) in self.weights.iter().enumerate() {
            let targets = graph.neighbors(NodeId(v as u32));
            let spread = match (targets.is_empty(), self.damping) {
                (true, None) => continue,
                (true, Some(_)) => {
                    pool += weight;
                    continue;
                }
                (false, None) => weight,
                (false, Some(damping)) => {
                    pool += weight * damping;
                    weight * (1.0 - damping)
                }
            };
            let share = spread / targets.len() as f64;
            for &target in targets {
                self.next_weights[target as usize] += share;
            }
        }

        if pool > 0.0 {
            let share = pool / self.next_weights.len() as f64;
            for weight in &mut self.next_weights {
                *weight += share;
            }
        }

        std::mem::swap(&mut self.weights, &mut self.next_weights);
        self.next_weights.fill(0.0);

        debug!(total = self.total_weight(), pool, "PageRank step");
        Ok(())
    }

    /// Run `iterations` steps; no convergence check is applied
    ///
    /// # Errors
    ///
    /// Returns error under the same conditions as [`Self::step`]
    pub fn run(&mut self, graph: &DirectedGraph, iterations: usize) -> Result<()> {
        for _ in 0..iterations {
            self.step(graph)?;
        }
        Ok(())
    }

    /// Current weights, indexed by vertex id
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Current weight of `node`, `None` when out of bounds
    #[must_use]
    pub fn weight(&self, node: NodeId) -> Option<f64> {
        self.weights.get(node.index()).copied()
    }

    /// Sum of all weights
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Every vertex whose name contains `query` (case-sensitive, literal)
    ///
    /// Results come back in vertex-id order; see [`sort_results`] and
    /// [`top_results`] for ranking.
    ///
    /// # Errors
    ///
    /// Returns error if `graph` does not match this engine
    #[allow(clippy::cast_possible_truncation)]
    pub fn search(&self, graph: &DirectedGraph, query: &str) -> Result<Vec<SearchResult>> {
        self.check_graph(graph)?;

        let results: Vec<SearchResult> = graph
            .names()
            .iter()
            .enumerate()
            .filter(|(_, name)| name.contains(query))
            .map(|(idx, name)| SearchResult {
                score: self.weights[idx],
                node: NodeId(idx as u32),
                name: name.clone(),
            })
            .collect();

        debug!(query, matches = results.len(), "PageRank search");
        Ok(results)
    }

    fn check_graph(&self, graph: &DirectedGraph) -> Result<()> {
        ensure!(
            graph.vertex_count() == self.weights.len(),
            "PageRank state covers {} vertices but graph has {}",
            self.weights.len(),
            graph.vertex_count()
        );
        Ok(())
    }
}

/// Build an engine and run `options.iterations` steps
///
/// # Errors
///
/// Returns error if `options.damping` is outside `0.0..=1.0`
///
/// # Example
///
/// ```
/// use trueno_linkgraph::{pagerank, DirectedGraph, PageRankOptions};
///
/// // Cycle: 0 → 1 → 2 → 0
/// let graph = DirectedGraph::from_edge_list(&[(0, 1), (1, 2), (2, 0)]);
///
/// let ranks = pagerank(&graph, PageRankOptions::default()).unwrap();
/// assert!((ranks.total_weight() - 300.0).abs() < 1e-9);
/// ```
pub fn pagerank(graph: &DirectedGraph, options: PageRankOptions) -> Result<PageRank> {
    let mut engine = PageRank::with_initial_weight(graph, options.initial_weight);
    if let Some(damping) = options.damping {
        engine = engine.with_damping(damping);
    }
    engine.run(graph, options.iterations)?;
    Ok(engine)
}

fn by_score_then_name(a: &SearchResult, b: &SearchResult) -> Ordering {
    a.score
        .total_cmp(&b.score)
        .then_with(|| a.name.cmp(&b.name))
}

/// Sort ascending by score, ties broken by name; the best match ends up last
pub fn sort_results(results: &mut [SearchResult]) {
    results.sort_by(by_score_then_name);
}

/// The `k` best matches, highest score first
#[must_use]
pub fn top_results(mut results: Vec<SearchResult>, k: usize) -> Vec<SearchResult> {
    sort_results(&mut results);
    results.into_iter().rev().take(k).collect()
}
