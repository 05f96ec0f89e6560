//! Line-oriented graph description loader.
//!
//! # Format
//!
//! One declaration per line.  Blank lines and anything after `#` are ignored.
//!
//! ```text
//! # four-block street corner
//! node a 0 0
//! node b 10 0
//! node c 10 10 2.5      # optional z
//! road a b              # two-way street (alias: edge)
//! arc  b c              # one-way street
//! ```
//!
//! | Keyword         | Fields                      | Effect                          |
//! |-----------------|-----------------------------|---------------------------------|
//! | `node`          | `<label> <x> <y> [z]`       | declare a node                  |
//! | `road` / `edge` | `<a> <b>`                   | directed edges `a→b` and `b→a`  |
//! | `arc`           | `<from> <to>`               | directed edge `from→to`         |
//!
//! Nodes are read in a first pass and edges in a second, so an edge may
//! appear before the nodes it joins.
//!
//! # Error policy
//!
//! | Condition                               | Outcome                           |
//! |-----------------------------------------|-----------------------------------|
//! | unknown keyword, wrong arity, bad number| skipped, `warn!`, `skipped_lines` |
//! | line that is not valid UTF-8            | skipped, `warn!`, `skipped_lines` |
//! | read failure                            | fatal `Io`                        |
//! | node label declared twice               | fatal `DuplicateNode`             |
//! | edge endpoint not declared              | fatal `UnknownNode`               |

use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::{info, warn};

use uav_core::Position;

use crate::{GraphError, GraphResult, RoadGraph, RoadGraphBuilder};

// ── LoadReport ────────────────────────────────────────────────────────────────

/// Summary of one load, returned next to the graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadReport {
    pub node_count:    usize,
    pub edge_count:    usize,
    /// 1-based line numbers of the malformed lines that were skipped.
    pub skipped_lines: Vec<usize>,
}

// ── Line classification ───────────────────────────────────────────────────────

enum Decl<'a> {
    Node { label: &'a str, pos: Position },
    Edge { a: &'a str, b: &'a str, two_way: bool },
}

fn parse_line(line: &str) -> Result<Option<Decl<'_>>, String> {
    let body = match line.find('#') {
        Some(i) => &line[..i],
        None    => line,
    };
    let fields: Vec<&str> = body.split_whitespace().collect();
    let Some((&keyword, rest)) = fields.split_first() else {
        return Ok(None);
    };

    match keyword {
        "node" => {
            if !(3..=4).contains(&rest.len()) {
                return Err(format!("`node` takes 3 or 4 fields, found {}", rest.len()));
            }
            let coord = |s: &str| -> Result<f64, String> {
                let v: f64 = s.parse().map_err(|_| format!("bad coordinate {s:?}"))?;
                if v.is_finite() { Ok(v) } else { Err(format!("non-finite coordinate {s:?}")) }
            };
            let x = coord(rest[1])?;
            let y = coord(rest[2])?;
            let z = match rest.get(3) {
                Some(s) => coord(s)?,
                None    => 0.0,
            };
            Ok(Some(Decl::Node { label: rest[0], pos: Position::new(x, y, z) }))
        }
        "road" | "edge" | "arc" => {
            if rest.len() != 2 {
                return Err(format!("`{keyword}` takes 2 fields, found {}", rest.len()));
            }
            Ok(Some(Decl::Edge { a: rest[0], b: rest[1], two_way: keyword != "arc" }))
        }
        other => Err(format!("unknown keyword {other:?}")),
    }
}

/// Split on `\n`, dropping a trailing `\r`.  Lines that are not UTF-8 come
/// back as `None`.
fn read_lines<R: Read>(reader: R) -> GraphResult<Vec<Option<String>>> {
    let mut lines = Vec::new();
    for raw in BufReader::new(reader).split(b'\n') {
        let mut raw = raw?;
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
        lines.push(String::from_utf8(raw).ok());
    }
    Ok(lines)
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`RoadGraph`] from a description file.
pub fn load_graph(path: &Path) -> GraphResult<(RoadGraph, LoadReport)> {
    let file = std::fs::File::open(path)?;
    let loaded = load_graph_reader(file)?;
    info!(
        path = %path.display(),
        nodes = loaded.1.node_count,
        edges = loaded.1.edge_count,
        skipped = loaded.1.skipped_lines.len(),
        "graph loaded"
    );
    Ok(loaded)
}

/// Like [`load_graph`] but accepts any `Read` source.
///
/// Useful for testing (pass a `&[u8]` or `std::io::Cursor`).
pub fn load_graph_reader<R: Read>(reader: R) -> GraphResult<(RoadGraph, LoadReport)> {
    let lines = read_lines(reader)?;

    let mut report  = LoadReport::default();
    let mut builder = RoadGraphBuilder::new();
    let mut edges: Vec<(usize, &str, &str, bool)> = Vec::new();

    // ── Pass 1: nodes (and classify everything) ───────────────────────────
    for (i, line) in lines.iter().enumerate() {
        let line_no = i + 1;
        let Some(line) = line else {
            warn!(line = line_no, "skipping graph line that is not valid UTF-8");
            report.skipped_lines.push(line_no);
            continue;
        };
        match parse_line(line) {
            Ok(None) => {}
            Ok(Some(Decl::Node { label, pos })) => {
                if builder.add_labeled_node(label, pos).is_none() {
                    return Err(GraphError::DuplicateNode { line: line_no, label: label.to_owned() });
                }
            }
            Ok(Some(Decl::Edge { a, b, two_way })) => edges.push((line_no, a, b, two_way)),
            Err(reason) => {
                warn!(line = line_no, content = line.trim(), %reason, "skipping malformed graph line");
                report.skipped_lines.push(line_no);
            }
        }
    }

    // ── Pass 2: edges ─────────────────────────────────────────────────────
    for (line_no, a, b, two_way) in edges {
        let resolve = |label: &str| {
            builder.node_by_label(label).ok_or_else(|| GraphError::UnknownNode {
                line:  line_no,
                label: label.to_owned(),
            })
        };
        let from = resolve(a)?;
        let to   = resolve(b)?;
        if two_way {
            builder.add_road(from, to)?;
        } else {
            builder.add_directed_edge(from, to)?;
        }
    }

    report.node_count = builder.node_count();
    report.edge_count = builder.edge_count();
    Ok((builder.build(), report))
}
