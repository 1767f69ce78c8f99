//! Integration tests for trueno-linkgraph
//!
//! Loads small graphs from disk and runs every algorithm end to end

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use trueno_linkgraph::{
    approximate_max_clique, emit_subgraph, load, pagerank, reachable_set, shortest_path,
    top_results, weak_component, LoadError, NodeId, PageRankOptions,
};

/// Nickname graph:
///
/// ```text
///   jacob, emily, michael: bidirectional triangle
///   michael → ashley     (ashley is a sink)
///   daniel → jacob       (one-way)
///   hannah               (id 4, absent from the edge list)
/// ```
const NICKNAMES: &str = "\
0 jacob
1 emily
2 michael
3 ashley
4 hannah
5 daniel
";

const LINKS: &str = "\
0 1
0 2
1 0
1 2
2 0
2 1
2 3
5 0
";

fn write_inputs(names: &str, links: &str) -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let names_path = dir.path().join("nicknames.txt");
    let links_path = dir.path().join("links.txt");
    fs::write(&names_path, names).unwrap();
    fs::write(&links_path, links).unwrap();
    (dir, names_path, links_path)
}

fn set(raw: &[u32]) -> BTreeSet<NodeId> {
    raw.iter().copied().map(NodeId).collect()
}

#[test]
fn test_load_fills_missing_sources() {
    let (_dir, names, links) = write_inputs(NICKNAMES, LINKS);
    let graph = load(&names, &links).unwrap();

    assert_eq!(graph.vertex_count(), 6);
    assert_eq!(graph.edge_count(), 8);
    assert_eq!(graph.out_degree(NodeId(3)), 0);
    assert_eq!(graph.out_degree(NodeId(4)), 0);
    assert_eq!(graph.neighbors(NodeId(5)), &[0]);
    assert_eq!(graph.name(NodeId(4)), "hannah");
    assert_eq!(graph.find_by_name("daniel"), Some(NodeId(5)));
}

#[test]
fn test_shortest_path_end_to_end() {
    let (_dir, names, links) = write_inputs(NICKNAMES, LINKS);
    let graph = load(&names, &links).unwrap();

    let path = shortest_path(&graph, NodeId(5), NodeId(3)).unwrap();
    assert_eq!(path.names(&graph), vec!["daniel", "jacob", "michael", "ashley"]);
    assert_eq!(path.steps(), Some(3));

    // hannah is unreachable from anyone
    assert!(shortest_path(&graph, NodeId(0), NodeId(4)).unwrap().is_empty());
    // And ashley reaches nobody
    assert!(shortest_path(&graph, NodeId(3), NodeId(0)).unwrap().is_empty());
}

#[test]
fn test_clique_end_to_end() {
    let (_dir, names, links) = write_inputs(NICKNAMES, LINKS);
    let graph = load(&names, &links).unwrap();

    assert_eq!(approximate_max_clique(&graph, NodeId(1)).unwrap(), set(&[0, 1, 2]));
    // daniel → jacob is one-way
    assert_eq!(approximate_max_clique(&graph, NodeId(5)).unwrap(), set(&[5]));
}

#[test]
fn test_pagerank_search_end_to_end() {
    let (_dir, names, links) = write_inputs(NICKNAMES, LINKS);
    let graph = load(&names, &links).unwrap();

    let ranks = pagerank(&graph, PageRankOptions::default()).unwrap();

    // ashley and hannah are sinks, so weight leaks out
    assert!(ranks.total_weight() < 600.0);

    let hits = ranks.search(&graph, "a").unwrap();
    let mut names: Vec<_> = hits.iter().map(|h| h.name.clone()).collect();
    names.sort();
    assert_eq!(names, vec!["ashley", "daniel", "hannah", "jacob", "michael"]);

    let top = top_results(hits, 2);
    assert_eq!(top.len(), 2);
    assert!(top[0].score >= top[1].score);
}

#[test]
fn test_reachability_writes_subgraph() {
    let (dir, names, links) = write_inputs(NICKNAMES, LINKS);
    let graph = load(&names, &links).unwrap();

    let reached = reachable_set(&graph, NodeId(0)).unwrap();
    assert_eq!(reached, set(&[0, 1, 2, 3]));

    let out_pages = dir.path().join("out_pages.txt");
    let out_links = dir.path().join("out_links.txt");
    emit_subgraph(&graph, &reached)
        .unwrap()
        .write_files(&out_pages, &out_links)
        .unwrap();

    assert_eq!(
        fs::read_to_string(&out_pages).unwrap(),
        "0\tjacob\n1\temily\n2\tmichael\n3\tashley\n"
    );
    assert_eq!(
        fs::read_to_string(&out_links).unwrap(),
        "0\t1\n0\t2\n1\t0\n1\t2\n2\t0\n2\t1\n2\t3\n"
    );

    // The extracted files load back as a valid graph
    let reloaded = load(&out_pages, &out_links).unwrap();
    assert_eq!(reloaded.vertex_count(), 4);
    assert_eq!(reloaded.edge_count(), 7);
}

#[test]
fn test_weak_component_includes_upstream() {
    let (_dir, names, links) = write_inputs(NICKNAMES, LINKS);
    let graph = load(&names, &links).unwrap();

    assert_eq!(weak_component(&graph, NodeId(0)).unwrap(), set(&[0, 1, 2, 3, 5]));
    assert_eq!(weak_component(&graph, NodeId(4)).unwrap(), set(&[4]));
}

#[test]
fn test_load_errors_surface() {
    let (_dir, names, links) = write_inputs("0 a\n1 b\n3 d\n", "0 1\n");
    assert!(matches!(
        load(&names, &links).unwrap_err(),
        LoadError::NameIdMismatch { expected: 2, found: 3, .. }
    ));

    let (_dir, names, links) = write_inputs("0 a\n1 b\n", "0 1\n1 q\n");
    assert!(matches!(
        load(&names, &links).unwrap_err(),
        LoadError::MalformedEdge { line: 2, .. }
    ));
}

#[test]
fn test_algorithms_reject_unknown_ids() {
    let (_dir, names, links) = write_inputs(NICKNAMES, LINKS);
    let graph = load(&names, &links).unwrap();

    assert!(shortest_path(&graph, NodeId(0), NodeId(6)).is_err());
    assert!(approximate_max_clique(&graph, NodeId(6)).is_err());
    assert!(reachable_set(&graph, NodeId(6)).is_err());
}
