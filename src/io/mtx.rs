/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Matrix Market `coordinate pattern` reader (spec §6.2), grounded on
//! `graph/formats/mmx_format.h`'s `MMI<T>::read`. Only the sparse pattern
//! type is supported; symmetric and general banners are both accepted
//! (the teacher's `ALLOW_DIRECTED_GRAPHS` path), floating-point matrix
//! types are rejected.

use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::bitset::Bitset;
use crate::error::{FormatError, IoError};
use crate::graph::{DiGraph, UGraph};

pub struct ParsedMtx {
    pub n: usize,
    pub edges: Vec<(usize, usize)>,
}

pub fn parse(path: impl AsRef<Path>) -> Result<ParsedMtx, IoError> {
    let file = std::fs::File::open(path)?;
    parse_reader(BufReader::new(file))
}

fn parse_reader(reader: impl BufRead) -> Result<ParsedMtx, IoError> {
    let mut lines = reader.lines();

    let banner = lines
        .next()
        .ok_or_else(|| FormatError::BadHeader("empty file".to_string()))??;
    let banner_tokens: Vec<&str> = banner.trim().split_whitespace().collect();
    if banner_tokens.len() < 5 || banner_tokens[0] != "%%MatrixMarket" {
        return Err(FormatError::BadHeader(banner).into());
    }
    if banner_tokens[1] != "matrix" || banner_tokens[2] != "coordinate" {
        return Err(FormatError::BadHeader(banner).into());
    }
    if banner_tokens[3] != "pattern" {
        return Err(FormatError::FloatingPointMatrix.into());
    }

    let mut n = None;
    let mut nnz_expected = None;
    let mut edges = Vec::new();
    let mut nnz_lines_seen: usize = 0;

    for (idx, line) in lines.enumerate() {
        let line_no = idx + 2; // banner was line 1
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        if n.is_none() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != 3 {
                return Err(FormatError::BadHeader(line.to_string()).into());
            }
            let parse_usize = |t: &str| -> Result<usize, FormatError> {
                t.parse().map_err(|_| FormatError::NonNumericToken { line: line_no, token: t.to_string() })
            };
            let m = parse_usize(tokens[0])?;
            let nn = parse_usize(tokens[1])?;
            if m != nn {
                return Err(FormatError::NonSquareMatrix { rows: m, cols: nn }.into());
            }
            nnz_expected = Some(parse_usize(tokens[2])?);
            n = Some(nn);
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 2 {
            return Err(FormatError::BadHeader(line.to_string()).into());
        }
        let row: usize = tokens[0]
            .parse()
            .map_err(|_| FormatError::NonNumericToken { line: line_no, token: tokens[0].to_string() })?;
        let col: usize = tokens[1]
            .parse()
            .map_err(|_| FormatError::NonNumericToken { line: line_no, token: tokens[1].to_string() })?;
        let (v, w) = (row - 1, col - 1);
        nnz_lines_seen += 1;
        if v == w {
            log::warn!("ignoring self-loop at vertex {v}");
            continue;
        }
        edges.push((v, w));
    }

    let n = n.ok_or_else(|| FormatError::BadHeader("missing size line".to_string()))?;
    if let Some(expected) = nnz_expected {
        if expected != nnz_lines_seen {
            return Err(FormatError::EdgeCountMismatch { expected, found: nnz_lines_seen }.into());
        }
    }
    Ok(ParsedMtx { n, edges })
}

pub fn read_mtx_directed<B: Bitset>(path: impl AsRef<Path>) -> Result<DiGraph<B>, IoError> {
    let parsed = parse(path)?;
    let mut g = DiGraph::new(parsed.n)?;
    for (v, w) in parsed.edges {
        g.add_edge(v, w);
    }
    Ok(g)
}

pub fn read_mtx_undirected<B: Bitset>(path: impl AsRef<Path>) -> Result<UGraph<B>, IoError> {
    let parsed = parse(path)?;
    let mut g = UGraph::new(parsed.n)?;
    for (v, w) in parsed.edges {
        g.add_edge(v, w);
    }
    Ok(g)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pattern_symmetric() {
        let src = "%%MatrixMarket matrix coordinate pattern symmetric\n3 3 2\n1 2\n2 3\n";
        let parsed = parse_reader(src.as_bytes()).unwrap();
        assert_eq!(parsed.n, 3);
        assert_eq!(parsed.edges, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn rejects_non_square() {
        let src = "%%MatrixMarket matrix coordinate pattern general\n2 3 0\n";
        let err = parse_reader(src.as_bytes()).unwrap_err();
        assert!(matches!(err, IoError::Format(FormatError::NonSquareMatrix { .. })));
    }

    #[test]
    fn rejects_non_pattern_type() {
        let src = "%%MatrixMarket matrix coordinate real symmetric\n3 3 0\n";
        let err = parse_reader(src.as_bytes()).unwrap_err();
        assert!(matches!(err, IoError::Format(FormatError::FloatingPointMatrix)));
    }

    #[test]
    fn self_loop_is_ignored_but_still_counts_toward_nnz() {
        let src = "%%MatrixMarket matrix coordinate pattern symmetric\n3 3 2\n1 1\n1 2\n";
        let parsed = parse_reader(src.as_bytes()).unwrap();
        assert_eq!(parsed.edges, vec![(0, 1)]);
    }
}
