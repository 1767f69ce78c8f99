//! Text loader for the two-file link graph format
//!
//! # Format
//!
//! ```text
//! links.txt            nicknames.txt
//! 0 1                  0 alice
//! 0 2                  1 bob
//! 2 0                  2 carol
//! ```
//!
//! The edge list is sorted ascending by source id. Sources without edges are
//! absent from the file and become empty vertices. The name table lists every
//! id exactly once, starting at 0, in increasing order.

use super::DirectedGraph;
use std::cmp::Ordering;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised while loading a graph. No partial graph is ever returned.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Input file could not be opened
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Input file failed while reading
    #[error("failed reading {}", path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// An edge line is not a pair of vertex ids
    #[error("{}:{line}: expected `<source> <target>`, got {content:?}", path.display())]
    MalformedEdge {
        /// Edge list path
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Offending line
        content: String,
    },

    /// Source ids went backwards
    #[error(
        "{}:{line}: source id {source_id} follows {previous}; edge list must be sorted by source",
        path.display()
    )]
    UnsortedEdges {
        /// Edge list path
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Source id on this line
        source_id: u32,
        /// Source id of the preceding edges
        previous: u32,
    },

    /// A name line is not `<id> <name>`
    #[error("{}:{line}: expected `<id> <name>`, got {content:?}", path.display())]
    MalformedName {
        /// Name table path
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Offending line
        content: String,
    },

    /// Name ids are not contiguous from 0
    #[error("{}:{line}: unmatched id: expected {expected}, found {found}", path.display())]
    NameIdMismatch {
        /// Name table path
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Running count of names read so far
        expected: usize,
        /// Declared id
        found: u32,
    },

    /// An edge endpoint has no entry in the name table
    #[error("{}:{line}: vertex id {id} is outside the name table (0..{names})", path.display())]
    EdgeOutOfRange {
        /// Edge list path
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Offending source or target id
        id: u32,
        /// Names read
        names: usize,
    },
}

/// Load a graph from a name table and an edge list on disk
///
/// # Errors
///
/// Returns [`LoadError`] if either file is missing or malformed.
///
/// # Example
///
/// ```no_run
/// use trueno_linkgraph::{load, shortest_path, NodeId};
///
/// # fn example() -> anyhow::Result<()> {
/// let graph = load("nicknames.txt", "links.txt")?;
/// let path = shortest_path(&graph, NodeId(23), NodeId(0))?;
/// println!("{:?} steps", path.steps());
/// # Ok(())
/// # }
/// ```
pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
    names_path: P,
    links_path: Q,
) -> Result<DirectedGraph, LoadError> {
    let names_path = names_path.as_ref();
    let links_path = links_path.as_ref();

    let links = open(links_path)?;
    let names = open(names_path)?;

    let names = parse_names(names, names_path)?;
    let rows = parse_edges(links, links_path, names.len())?;
    assemble(rows, names)
}

/// Load a graph from in-memory readers (tests, stdin, embedded data)
///
/// # Errors
///
/// Returns [`LoadError`] if either input is malformed.
pub fn load_from_readers<N: BufRead, L: BufRead>(
    names: N,
    links: L,
) -> Result<DirectedGraph, LoadError> {
    let names = parse_names(names, Path::new("<names>"))?;
    let rows = parse_edges(links, Path::new("<links>"), names.len())?;
    assemble(rows, names)
}

fn open(path: &Path) -> Result<BufReader<File>, LoadError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| LoadError::FileNotFound {
            path: path.to_path_buf(),
            source,
        })
}

enum EdgeLine {
    Pair(u32, u32),
    /// Single integer: a pair cut short, valid only as the last line
    Partial,
    Invalid,
}

fn classify_edge_line(line: &str) -> EdgeLine {
    let mut tokens = line.split_whitespace();
    let first = tokens.next().map(str::parse::<u32>);
    let second = tokens.next().map(str::parse::<u32>);
    let extra = tokens.next();

    match (first, second, extra) {
        (Some(Ok(source)), Some(Ok(target)), None) => EdgeLine::Pair(source, target),
        (Some(Ok(_)), None, None) => EdgeLine::Partial,
        _ => EdgeLine::Invalid,
    }
}

/// Parse a source-sorted edge list into dense adjacency rows
///
/// Whenever the source id advances, the current row is closed (even if
/// empty) and placeholder rows fill every skipped id. Parsing always runs to
/// the end of the input. Every id must be `< vertices`, checked before any
/// placeholder row is allocated.
fn parse_edges<R: BufRead>(
    reader: R,
    path: &Path,
    vertices: usize,
) -> Result<Vec<Vec<u32>>, LoadError> {
    let mut rows: Vec<Vec<u32>> = Vec::new();
    let mut current: Vec<u32> = Vec::new();
    let mut current_source = 0_u32;
    let mut partial: Option<(usize, String)> = None;
    let mut gaps = 0_usize;

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        // A short line followed by more data is corruption, not truncation
        if let Some((line, content)) = partial.take() {
            return Err(LoadError::MalformedEdge {
                path: path.to_path_buf(),
                line,
                content,
            });
        }

        let (source, target) = match classify_edge_line(trimmed) {
            EdgeLine::Pair(source, target) => (source, target),
            EdgeLine::Partial => {
                partial = Some((idx + 1, trimmed.to_string()));
                continue;
            }
            EdgeLine::Invalid => {
                return Err(LoadError::MalformedEdge {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    content: trimmed.to_string(),
                });
            }
        };

        if let Some(id) = [source, target].into_iter().find(|&id| id as usize >= vertices) {
            return Err(LoadError::EdgeOutOfRange {
                path: path.to_path_buf(),
                line: idx + 1,
                id,
                names: vertices,
            });
        }

        match source.cmp(&current_source) {
            Ordering::Less => {
                return Err(LoadError::UnsortedEdges {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    source_id: source,
                    previous: current_source,
                });
            }
            Ordering::Equal => {}
            Ordering::Greater => {
                rows.push(std::mem::take(&mut current));
                for _ in current_source + 1..source {
                    rows.push(Vec::new());
                }
                gaps += (source - current_source - 1) as usize;
                current_source = source;
            }
        }

        current.push(target);
    }

    if !current.is_empty() {
        rows.push(current);
    }

    if let Some((line, content)) = partial {
        warn!(
            path = %path.display(),
            line,
            content = %content,
            "Discarding truncated trailing edge line"
        );
    }

    debug!(path = %path.display(), rows = rows.len(), gaps, "Parsed edge list");
    Ok(rows)
}

/// Parse `<id> <name>` lines; ids must run 0, 1, 2, ... without gaps
fn parse_names<R: BufRead>(reader: R, path: &Path) -> Result<Vec<String>, LoadError> {
    let mut names = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let malformed = || LoadError::MalformedName {
            path: path.to_path_buf(),
            line: idx + 1,
            content: trimmed.to_string(),
        };

        let (id, name) = trimmed
            .split_once(char::is_whitespace)
            .ok_or_else(malformed)?;
        let id: u32 = id.parse().map_err(|_| malformed())?;
        let name = name.trim();
        if name.is_empty() {
            return Err(malformed());
        }

        if id as usize != names.len() {
            return Err(LoadError::NameIdMismatch {
                path: path.to_path_buf(),
                line: idx + 1,
                expected: names.len(),
                found: id,
            });
        }
        names.push(name.to_string());
    }

    debug!(path = %path.display(), names = names.len(), "Parsed name table");
    Ok(names)
}

/// Pad rows so every named id is a vertex, then build
fn assemble(mut rows: Vec<Vec<u32>>, names: Vec<String>) -> Result<DirectedGraph, LoadError> {
    rows.resize_with(names.len(), Vec::new);

    let graph = DirectedGraph::build(rows, names);
    info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "Loaded link graph"
    );
    Ok(graph)
}
