/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! DIMACS `edge` format reader/writer (spec §6.1).
//!
//! File vertex ids are 1-based; internal ids are 0-based. The edge block
//! may use the 3-token (`e v w`) or 4-token (`e v w weight`) form; the form
//! is locked in from the first edge line and enforced for the rest (spec
//! §9 Open Question, resolved that way).

use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::bitset::Bitset;
use crate::error::{FormatError, IoError};
use crate::graph::vertex_weighted::DEFAULT_WEIGHT;
use crate::graph::{DiGraph, EdgeWeightedGraph, UGraph, VertexWeightedGraph};
use crate::timer::local_timestamp;

/// Topology and optional weights extracted from a DIMACS file, independent
/// of which container type the caller builds from it.
pub struct ParsedDimacs {
    pub n: usize,
    pub edges: Vec<(usize, usize)>,
    pub edge_weights: Option<Vec<f64>>,
    pub vertex_weights: Vec<Option<f64>>,
}

fn numeric(token: &str, line: usize) -> Result<i64, FormatError> {
    token.parse::<i64>().map_err(|_| FormatError::NonNumericToken { line, token: token.to_string() })
}

pub fn parse(path: impl AsRef<Path>) -> Result<ParsedDimacs, IoError> {
    let file = std::fs::File::open(path)?;
    parse_reader(BufReader::new(file))
}

fn parse_reader(reader: impl BufRead) -> Result<ParsedDimacs, IoError> {
    let mut n: Option<usize> = None;
    let mut expected_edges: Option<usize> = None;
    let mut vertex_weights: Vec<Option<f64>> = Vec::new();
    let mut edges: Vec<(usize, usize)> = Vec::new();
    let mut edge_weights: Vec<f64> = Vec::new();
    let mut edge_form: Option<usize> = None;
    let mut edge_lines_seen: usize = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens[0] {
            "p" => {
                if tokens.len() != 4 || tokens[1] != "edge" {
                    return Err(FormatError::BadHeader(line.to_string()).into());
                }
                let nv = numeric(tokens[2], line_no)?;
                let ne = numeric(tokens[3], line_no)?;
                n = Some(nv as usize);
                expected_edges = Some(ne as usize);
                vertex_weights = vec![None; nv as usize];
            }
            "n" | "v" => {
                let Some(nv) = n else {
                    return Err(FormatError::UnexpectedEdgeLine(line_no).into());
                };
                if tokens.len() != 3 {
                    return Err(FormatError::BadHeader(line.to_string()).into());
                }
                let v = numeric(tokens[1], line_no)? as usize - 1;
                let w: f64 = tokens[2]
                    .parse()
                    .map_err(|_| FormatError::NonNumericToken { line: line_no, token: tokens[2].to_string() })?;
                if v >= nv {
                    return Err(FormatError::BadHeader(format!("vertex {} out of range", v + 1)).into());
                }
                vertex_weights[v] = Some(w);
            }
            "e" => {
                let Some(nv) = n else {
                    return Err(FormatError::UnexpectedEdgeLine(line_no).into());
                };
                let form = *edge_form.get_or_insert(tokens.len());
                if tokens.len() != form {
                    return Err(FormatError::InconsistentEdgeForm {
                        line: line_no,
                        first_tokens: form,
                        tokens: tokens.len(),
                    }
                    .into());
                }
                if form != 3 && form != 4 {
                    return Err(FormatError::BadHeader(line.to_string()).into());
                }
                let v = numeric(tokens[1], line_no)? as usize - 1;
                let w = numeric(tokens[2], line_no)? as usize - 1;
                if v >= nv || w >= nv {
                    return Err(FormatError::BadHeader(format!("edge ({}, {}) out of range", v + 1, w + 1)).into());
                }
                edge_lines_seen += 1;
                if v == w {
                    log::warn!("ignoring self-loop at line {line_no}");
                    continue;
                }
                if form == 4 {
                    let wt: f64 = tokens[3]
                        .parse()
                        .map_err(|_| FormatError::NonNumericToken { line: line_no, token: tokens[3].to_string() })?;
                    edge_weights.push(wt);
                }
                edges.push((v, w));
            }
            _ => return Err(FormatError::BadHeader(line.to_string()).into()),
        }
    }

    let n = n.ok_or_else(|| FormatError::BadHeader("missing 'p edge' header".to_string()))?;
    if let Some(expected) = expected_edges {
        if expected != edge_lines_seen {
            return Err(FormatError::EdgeCountMismatch { expected, found: edge_lines_seen }.into());
        }
    }
    let edge_weights = if edge_weights.is_empty() { None } else { Some(edge_weights) };
    Ok(ParsedDimacs { n, edges, edge_weights, vertex_weights })
}

pub fn read_dimacs_directed<B: Bitset>(path: impl AsRef<Path>) -> Result<DiGraph<B>, IoError> {
    let parsed = parse(path)?;
    let mut g = DiGraph::new(parsed.n)?;
    for (v, w) in parsed.edges {
        g.add_edge(v, w);
    }
    Ok(g)
}

pub fn read_dimacs_undirected<B: Bitset>(path: impl AsRef<Path>) -> Result<UGraph<B>, IoError> {
    let parsed = parse(path)?;
    let mut g = UGraph::new(parsed.n)?;
    for (v, w) in parsed.edges {
        g.add_edge(v, w);
    }
    Ok(g)
}

pub fn read_dimacs_vertex_weighted<B: Bitset>(
    path: impl AsRef<Path>,
) -> Result<VertexWeightedGraph<B>, IoError> {
    let parsed = parse(path)?;
    let mut g = UGraph::new(parsed.n)?;
    for (v, w) in parsed.edges {
        g.add_edge(v, w);
    }
    let mut vg = VertexWeightedGraph::from_graph(g);
    for (v, w) in parsed.vertex_weights.into_iter().enumerate() {
        if let Some(w) = w {
            vg.set_weight(v, Some(w));
        }
    }
    Ok(vg)
}

pub fn read_dimacs_edge_weighted<B: Bitset>(
    path: impl AsRef<Path>,
) -> Result<EdgeWeightedGraph<B>, IoError> {
    let parsed = parse(path)?;
    let mut g: EdgeWeightedGraph<B> = EdgeWeightedGraph::new(parsed.n)?;
    match parsed.edge_weights {
        Some(weights) => {
            for ((v, w), wt) in parsed.edges.into_iter().zip(weights) {
                g.add_edge(v, w, Some(wt));
            }
        }
        None => {
            for (v, w) in parsed.edges {
                g.add_edge(v, w, None);
            }
        }
    }
    for (v, w) in parsed.vertex_weights.into_iter().enumerate() {
        if let Some(w) = w {
            g.set_vertex_weight(v, Some(w));
        }
    }
    Ok(g)
}

fn write_header(w: &mut impl Write, name: &str, n: usize, m: usize) -> std::io::Result<()> {
    writeln!(w, "c {}", local_timestamp())?;
    if !name.is_empty() {
        writeln!(w, "c {name}")?;
    }
    writeln!(w, "p edge {n} {m}")
}

pub fn write_dimacs_directed<B: Bitset>(
    g: &DiGraph<B>,
    w: &mut impl Write,
) -> Result<(), IoError> {
    let n = g.number_of_vertices();
    let edges: Vec<(usize, usize)> =
        (0..n).flat_map(|i| (0..n).filter(move |&j| i != j).map(move |j| (i, j))).filter(|&(i, j)| g.is_edge(i, j)).collect();
    write_header(w, g.name(), n, edges.len())?;
    for (v, ww) in edges {
        writeln!(w, "e {} {}", v + 1, ww + 1)?;
    }
    Ok(())
}

pub fn write_dimacs_undirected<B: Bitset>(
    g: &UGraph<B>,
    w: &mut impl Write,
) -> Result<(), IoError> {
    let n = g.number_of_vertices();
    let mut edges = Vec::new();
    for i in 0..n.saturating_sub(1) {
        for j in (i + 1)..n {
            if g.is_edge(i, j) {
                edges.push((i, j));
            }
        }
    }
    write_header(w, g.name(), n, edges.len())?;
    for (v, ww) in edges {
        writeln!(w, "e {} {}", v + 1, ww + 1)?;
    }
    Ok(())
}

pub fn write_dimacs_vertex_weighted<B: Bitset>(
    g: &VertexWeightedGraph<B>,
    w: &mut impl Write,
) -> Result<(), IoError> {
    let n = g.graph().number_of_vertices();
    let mut edges = Vec::new();
    for i in 0..n.saturating_sub(1) {
        for j in (i + 1)..n {
            if g.graph().is_edge(i, j) {
                edges.push((i, j));
            }
        }
    }
    write_header(w, g.graph().name(), n, edges.len())?;
    for v in 0..n {
        if let Some(x) = g.weight(v) {
            if x != DEFAULT_WEIGHT {
                writeln!(w, "n {} {x}", v + 1)?;
            }
        }
    }
    for (v, ww) in edges {
        writeln!(w, "e {} {}", v + 1, ww + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitset::BitsetDense;

    fn sample() -> &'static str {
        "c a sample graph\np edge 4 3\ne 1 2\ne 2 3\ne 3 4\n"
    }

    #[test]
    fn parses_basic_header_and_edges() {
        let parsed = parse_reader(sample().as_bytes()).unwrap();
        assert_eq!(parsed.n, 4);
        assert_eq!(parsed.edges, vec![(0, 1), (1, 2), (2, 3)]);
        assert!(parsed.edge_weights.is_none());
    }

    #[test]
    fn builds_undirected_graph() {
        let parsed = parse_reader(sample().as_bytes()).unwrap();
        let mut g: UGraph<BitsetDense> = UGraph::new(parsed.n).unwrap();
        for (v, w) in parsed.edges {
            g.add_edge(v, w);
        }
        assert_eq!(g.number_of_edges(false).unwrap(), 3);
    }

    #[test]
    fn round_trip_preserves_topology() {
        let parsed = parse_reader(sample().as_bytes()).unwrap();
        let mut g: UGraph<BitsetDense> = UGraph::new(parsed.n).unwrap();
        for (v, w) in parsed.edges {
            g.add_edge(v, w);
        }
        let mut buf: Vec<u8> = Vec::new();
        write_dimacs_undirected(&g, &mut buf).unwrap();
        let reparsed = parse_reader(buf.as_slice()).unwrap();
        let mut g2: UGraph<BitsetDense> = UGraph::new(reparsed.n).unwrap();
        for (v, w) in reparsed.edges {
            g2.add_edge(v, w);
        }
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(g.is_edge(i, j), g2.is_edge(i, j));
            }
        }
    }

    #[test]
    fn rejects_inconsistent_edge_form() {
        let src = "p edge 3 2\ne 1 2\ne 2 3 5\n";
        let err = parse_reader(src.as_bytes()).unwrap_err();
        assert!(matches!(err, IoError::Format(FormatError::InconsistentEdgeForm { .. })));
    }

    #[test]
    fn reads_weighted_edges() {
        let src = "p edge 3 2\ne 1 2 4.5\ne 2 3 1.0\n";
        let parsed = parse_reader(src.as_bytes()).unwrap();
        assert_eq!(parsed.edge_weights, Some(vec![4.5, 1.0]));
    }

    #[test]
    fn reads_vertex_weight_lines() {
        let src = "p edge 3 1\nn 2 7.0\ne 1 2\n";
        let parsed = parse_reader(src.as_bytes()).unwrap();
        assert_eq!(parsed.vertex_weights, vec![None, Some(7.0), None]);
    }

    #[test]
    fn self_loop_is_ignored() {
        let src = "p edge 2 2\ne 1 1\ne 1 2\n";
        let parsed = parse_reader(src.as_bytes()).unwrap();
        assert_eq!(parsed.edges, vec![(0, 1)]);
    }
}
