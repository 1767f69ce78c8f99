//! Command-line front end for trueno-linkgraph
//!
//! Results go to stdout; logs go to stderr (filter with `RUST_LOG`).

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use trueno_linkgraph::{
    approximate_all_cliques, approximate_max_clique, emit_subgraph, load, names_with_prefix,
    pagerank, reachable_set, shortest_path, top_results, weak_component, DirectedGraph, NodeId,
    PageRankOptions, DEFAULT_INITIAL_WEIGHT, DEFAULT_ITERATIONS,
};

#[derive(Parser, Debug)]
#[command(
    name = "linkgraph",
    version,
    about = "Shortest paths, cliques, PageRank and reachability on link graphs"
)]
struct Cli {
    /// Name table (`<id> <name>` per line)
    #[arg(long, global = true, default_value = "nicknames.txt")]
    names: PathBuf,
    /// Edge list (`<source> <target>` per line, sorted by source)
    #[arg(long, global = true, default_value = "links.txt")]
    links: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fewest-step path between two vertex ids
    Path { from: u32, to: u32 },
    /// Approximate clique around SEED, or around every vertex
    Clique { seed: Option<u32> },
    /// Rank vertices, then search names by substring
    Rank {
        /// Substrings to look up
        #[arg(required = true)]
        queries: Vec<String>,
        #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
        iterations: usize,
        #[arg(long, default_value_t = 5)]
        top: usize,
        #[arg(long, default_value_t = DEFAULT_INITIAL_WEIGHT)]
        initial_weight: f64,
        /// Spread this share of every weight over all vertices (e.g. 0.15)
        #[arg(long)]
        damping: Option<f64>,
    },
    /// Write the subgraph reachable from START
    Reach {
        start: u32,
        /// Follow edges in both directions (weakly connected component)
        #[arg(long)]
        weak: bool,
        #[arg(long, default_value = "out_pages.txt")]
        out_pages: PathBuf,
        #[arg(long, default_value = "out_links.txt")]
        out_links: PathBuf,
    },
    /// List names beginning with PREFIX, sorted
    Prefix { prefix: String },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    if let Err(e) = run(&cli, &mut stdout.lock()) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let started = Instant::now();
    let graph = load(&cli.names, &cli.links)?;
    info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        sinks = graph.sink_count(),
        elapsed_ms = started.elapsed().as_millis(),
        "Graph ready"
    );

    let started = Instant::now();
    match &cli.command {
        Command::Path { from, to } => print_path(out, &graph, NodeId(*from), NodeId(*to))?,
        Command::Clique { seed } => print_cliques(out, &graph, seed.map(NodeId))?,
        Command::Rank {
            queries,
            iterations,
            top,
            initial_weight,
            damping,
        } => {
            let options = PageRankOptions {
                initial_weight: *initial_weight,
                iterations: *iterations,
                damping: *damping,
            };
            print_rankings(out, &graph, options, queries, *top)?;
        }
        Command::Reach {
            start,
            weak,
            out_pages,
            out_links,
        } => {
            let start = NodeId(*start);
            let nodes = if *weak {
                weak_component(&graph, start)?
            } else {
                reachable_set(&graph, start)?
            };
            let subgraph = emit_subgraph(&graph, &nodes)?;
            subgraph.write_files(out_pages, out_links)?;
            writeln!(
                out,
                "{} pages, {} links written to {} and {}",
                subgraph.pages.len(),
                subgraph.links.len(),
                out_pages.display(),
                out_links.display()
            )?;
        }
        Command::Prefix { prefix } => {
            for name in names_with_prefix(&graph, prefix) {
                writeln!(out, "{name}")?;
            }
        }
    }
    out.flush()?;
    info!(elapsed_ms = started.elapsed().as_millis(), "Done");

    Ok(())
}

fn print_path(out: &mut impl Write, graph: &DirectedGraph, from: NodeId, to: NodeId) -> Result<()> {
    let path = shortest_path(graph, from, to)?;
    writeln!(out, "From: {}, To: {}", graph.name(from), graph.name(to))?;
    match path.steps() {
        None => writeln!(out, "Path was not found")?,
        Some(steps) => {
            writeln!(out, "{steps} steps")?;
            writeln!(out, "Path: {{{}}}", path.names(graph).join(", "))?;
        }
    }
    Ok(())
}

fn print_cliques(out: &mut impl Write, graph: &DirectedGraph, seed: Option<NodeId>) -> Result<()> {
    let cliques = match seed {
        Some(seed) => vec![approximate_max_clique(graph, seed)?],
        None => approximate_all_cliques(graph),
    };
    for clique in cliques {
        let names: Vec<&str> = clique.iter().map(|&n| graph.name(n)).collect();
        writeln!(out, "{{ {} }}", names.join(", "))?;
    }
    Ok(())
}

fn print_rankings(
    out: &mut impl Write,
    graph: &DirectedGraph,
    options: PageRankOptions,
    queries: &[String],
    top: usize,
) -> Result<()> {
    let ranks = pagerank(graph, options)?;
    for query in queries {
        let answers = ranks.search(graph, query)?;
        writeln!(out, "{query}: {} answers", answers.len())?;
        for answer in top_results(answers, top) {
            writeln!(out, "{} score: {}", answer.name, answer.score)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
