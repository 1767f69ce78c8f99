//! Criterion benchmarks for graph algorithms
//!
//! Covers the hot paths of each exercise:
//! - Loading: text parse + CSR construction
//! - BFS shortest path across a sparse random graph
//! - PageRank: one power-iteration step
//! - Reachability: explicit-stack DFS

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use trueno_linkgraph::{
    approximate_max_clique, load_from_readers, reachable_set, shortest_path, DirectedGraph,
    NodeId, PageRank,
};

/// Generate a source-sorted random edge list (simple LCG for reproducibility)
fn generate_links(num_nodes: usize, edges_per_node: usize) -> Vec<(u32, u32)> {
    let mut edges = Vec::new();
    let mut rng_state = 12345_u64;

    for node in 0..num_nodes {
        for _ in 0..edges_per_node {
            rng_state = rng_state.wrapping_mul(1103515245).wrapping_add(12345);
            let target = (rng_state % num_nodes as u64) as u32;

            if target != node as u32 {
                edges.push((node as u32, target));
            }
        }
    }

    edges
}

fn to_text(num_nodes: usize, edges: &[(u32, u32)]) -> (String, String) {
    let names = (0..num_nodes).map(|i| format!("{i} page{i}\n")).collect();
    let links = edges.iter().map(|(s, t)| format!("{s} {t}\n")).collect();
    (names, links)
}

/// Benchmark: parse both files and build the CSR graph
fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for size in [1000, 10_000, 50_000].iter() {
        let (names, links) = to_text(*size, &generate_links(*size, 5));

        group.bench_with_input(
            BenchmarkId::new("from_readers", size),
            &(names, links),
            |b, (names, links)| {
                b.iter(|| {
                    let names = black_box(names.as_bytes());
                    let links = black_box(links.as_bytes());
                    black_box(load_from_readers(names, links).unwrap());
                });
            },
        );
    }

    group.finish();
}

/// Benchmark: BFS shortest path between two far-apart vertices
fn bench_shortest_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_path");

    for size in [1000, 10_000, 50_000].iter() {
        let graph = DirectedGraph::from_edge_list(&generate_links(*size, 3));
        let target = NodeId((*size - 1) as u32);

        group.bench_with_input(BenchmarkId::new("bfs", size), &graph, |b, graph| {
            b.iter(|| {
                let path = shortest_path(black_box(graph), NodeId(0), target).unwrap();
                black_box(path);
            });
        });
    }

    group.finish();
}

/// Benchmark: one PageRank step
fn bench_pagerank_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("pagerank");

    for size in [1000, 10_000, 50_000].iter() {
        let graph = DirectedGraph::from_edge_list(&generate_links(*size, 5));

        group.bench_with_input(BenchmarkId::new("step", size), &graph, |b, graph| {
            let mut engine = PageRank::new(graph);
            b.iter(|| {
                engine.step(black_box(graph)).unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmark: forward reachability from vertex 0
fn bench_reachability(c: &mut Criterion) {
    let mut group = c.benchmark_group("reachability");

    for size in [1000, 10_000, 50_000].iter() {
        let graph = DirectedGraph::from_edge_list(&generate_links(*size, 3));

        group.bench_with_input(BenchmarkId::new("dfs", size), &graph, |b, graph| {
            b.iter(|| {
                let reached = reachable_set(black_box(graph), NodeId(0)).unwrap();
                black_box(reached);
            });
        });
    }

    group.finish();
}

/// Benchmark: clique approximation on a dense symmetric neighborhood
fn bench_clique(c: &mut Criterion) {
    // Seed 0 linked both ways to 12 vertices that form a ring
    let mut edges = Vec::new();
    for v in 1..=12_u32 {
        edges.push((0, v));
        edges.push((v, 0));
        let next = v % 12 + 1;
        edges.push((v, next));
        edges.push((next, v));
    }
    edges.sort_unstable();
    let graph = DirectedGraph::from_edge_list(&edges);

    c.bench_function("clique/ring12", |b| {
        b.iter(|| {
            let clique = approximate_max_clique(black_box(&graph), NodeId(0)).unwrap();
            black_box(clique);
        });
    });
}

criterion_group!(
    benches,
    bench_load,
    bench_shortest_path,
    bench_pagerank_step,
    bench_reachability,
    bench_clique
);
criterion_main!(benches);
