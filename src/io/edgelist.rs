/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Plain edge-list format (spec §6.3), grounded on
//! `graph/simple_ugraph.h`'s `write_EDGES`: `%`-prefixed comments, one
//! 1-based `u v` pair per line, upper triangle only for undirected graphs.
//! The vertex count is not recorded in the file, so the reader takes it
//! from the caller or derives it as `max(u, v) + 1` across all lines.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::bitset::Bitset;
use crate::error::{FormatError, IoError};
use crate::graph::{DiGraph, UGraph};
use crate::timer::local_timestamp;

pub struct ParsedEdgeList {
    pub n: usize,
    pub edges: Vec<(usize, usize)>,
}

pub fn parse(path: impl AsRef<Path>) -> Result<ParsedEdgeList, IoError> {
    let file = std::fs::File::open(path)?;
    parse_reader(BufReader::new(file))
}

fn parse_reader(reader: impl BufRead) -> Result<ParsedEdgeList, IoError> {
    let mut edges = Vec::new();
    let mut max_vertex = 0usize;
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 2 {
            return Err(FormatError::BadHeader(line.to_string()).into());
        }
        let u: usize = tokens[0]
            .parse()
            .map_err(|_| FormatError::NonNumericToken { line: line_no, token: tokens[0].to_string() })?;
        let v: usize = tokens[1]
            .parse()
            .map_err(|_| FormatError::NonNumericToken { line: line_no, token: tokens[1].to_string() })?;
        max_vertex = max_vertex.max(u).max(v);
        if u == v {
            log::warn!("ignoring self-loop at vertex {u}");
            continue;
        }
        edges.push((u - 1, v - 1));
    }
    Ok(ParsedEdgeList { n: max_vertex, edges })
}

pub fn read_edgelist_directed<B: Bitset>(path: impl AsRef<Path>) -> Result<DiGraph<B>, IoError> {
    let parsed = parse(path)?;
    let mut g = DiGraph::new(parsed.n)?;
    for (u, v) in parsed.edges {
        g.add_edge(u, v);
    }
    Ok(g)
}

pub fn read_edgelist_undirected<B: Bitset>(path: impl AsRef<Path>) -> Result<UGraph<B>, IoError> {
    let parsed = parse(path)?;
    let mut g = UGraph::new(parsed.n)?;
    for (u, v) in parsed.edges {
        g.add_edge(u, v);
    }
    Ok(g)
}

pub fn write_edgelist_undirected<B: Bitset>(
    g: &UGraph<B>,
    w: &mut impl Write,
) -> Result<(), IoError> {
    writeln!(w, "% written {}", local_timestamp())?;
    if !g.name().is_empty() {
        writeln!(w, "% {}", g.name())?;
    }
    let n = g.number_of_vertices();
    for i in 0..n.saturating_sub(1) {
        for j in (i + 1)..n {
            if g.is_edge(i, j) {
                writeln!(w, "{} {}", i + 1, j + 1)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitset::BitsetDense;

    #[test]
    fn parses_and_skips_comments() {
        let src = "% a comment\n1 2\n2 3\n";
        let parsed = parse_reader(src.as_bytes()).unwrap();
        assert_eq!(parsed.n, 3);
        assert_eq!(parsed.edges, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn round_trip_upper_triangle() {
        let mut g: UGraph<BitsetDense> = UGraph::new(4).unwrap();
        g.add_edge(0, 1);
        g.add_edge(2, 3);
        let mut buf = Vec::new();
        write_edgelist_undirected(&g, &mut buf).unwrap();
        let parsed = parse_reader(buf.as_slice()).unwrap();
        assert_eq!(parsed.edges, vec![(0, 1), (2, 3)]);
    }
}
