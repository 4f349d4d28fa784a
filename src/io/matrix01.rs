/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Dense 0/1 adjacency matrix format (spec §6.4): a size line `N`
//! followed by `N` lines of `N` characters, each `0` or `1`.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::bitset::Bitset;
use crate::error::{FormatError, IoError};
use crate::graph::{DiGraph, UGraph};

pub struct ParsedMatrix01 {
    pub n: usize,
    pub rows: Vec<Vec<bool>>,
}

pub fn parse(path: impl AsRef<Path>) -> Result<ParsedMatrix01, IoError> {
    let file = std::fs::File::open(path)?;
    parse_reader(BufReader::new(file))
}

fn parse_reader(reader: impl BufRead) -> Result<ParsedMatrix01, IoError> {
    let mut lines = reader.lines();
    let size_line = lines
        .next()
        .ok_or_else(|| FormatError::BadHeader("empty file".to_string()))??;
    let n: usize = size_line
        .trim()
        .parse()
        .map_err(|_| FormatError::NonNumericToken { line: 1, token: size_line.clone() })?;

    let mut rows = Vec::with_capacity(n);
    for (idx, line) in lines.enumerate() {
        if rows.len() == n {
            break;
        }
        let line = line?;
        let line = line.trim();
        if line.len() != n {
            return Err(FormatError::NonSquareMatrix { rows: rows.len(), cols: line.len() }.into());
        }
        let mut row = Vec::with_capacity(n);
        for ch in line.chars() {
            row.push(match ch {
                '0' => false,
                '1' => true,
                _ => {
                    return Err(FormatError::NonNumericToken {
                        line: idx + 2,
                        token: ch.to_string(),
                    }
                    .into())
                }
            });
        }
        rows.push(row);
    }
    if rows.len() != n {
        return Err(FormatError::NonSquareMatrix { rows: rows.len(), cols: n }.into());
    }
    Ok(ParsedMatrix01 { n, rows })
}

pub fn read_matrix01_directed<B: Bitset>(path: impl AsRef<Path>) -> Result<DiGraph<B>, IoError> {
    let parsed = parse(path)?;
    let mut g = DiGraph::new(parsed.n)?;
    for (r, row) in parsed.rows.iter().enumerate() {
        for (c, &bit) in row.iter().enumerate() {
            if bit && r != c {
                g.add_edge(r, c);
            }
        }
    }
    Ok(g)
}

pub fn read_matrix01_undirected<B: Bitset>(path: impl AsRef<Path>) -> Result<UGraph<B>, IoError> {
    let parsed = parse(path)?;
    let mut g = UGraph::new(parsed.n)?;
    for r in 0..parsed.n.saturating_sub(1) {
        for c in (r + 1)..parsed.n {
            if parsed.rows[r][c] {
                g.add_edge(r, c);
            }
        }
    }
    Ok(g)
}

pub fn write_matrix01_undirected<B: Bitset>(
    g: &UGraph<B>,
    w: &mut impl Write,
) -> Result<(), IoError> {
    let n = g.number_of_vertices();
    writeln!(w, "{n}")?;
    for r in 0..n {
        let mut line = String::with_capacity(n);
        for c in 0..n {
            line.push(if g.is_edge(r, c) { '1' } else { '0' });
        }
        writeln!(w, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitset::BitsetDense;

    #[test]
    fn parses_square_matrix() {
        let src = "3\n010\n101\n010\n";
        let parsed = parse_reader(src.as_bytes()).unwrap();
        assert_eq!(parsed.n, 3);
        assert!(parsed.rows[0][1]);
        assert!(!parsed.rows[0][0]);
    }

    #[test]
    fn builds_undirected_graph_from_upper_triangle() {
        let src = "3\n010\n101\n010\n";
        let parsed = parse_reader(src.as_bytes()).unwrap();
        let mut g: UGraph<BitsetDense> = UGraph::new(parsed.n).unwrap();
        for r in 0..2 {
            for c in (r + 1)..3 {
                if parsed.rows[r][c] {
                    g.add_edge(r, c);
                }
            }
        }
        assert!(g.is_edge(0, 1));
        assert!(g.is_edge(1, 2));
        assert!(!g.is_edge(0, 2));
    }

    #[test]
    fn round_trip() {
        let mut g: UGraph<BitsetDense> = UGraph::new(3).unwrap();
        g.add_edge(0, 1);
        let mut buf = Vec::new();
        write_matrix01_undirected(&g, &mut buf).unwrap();
        let parsed = parse_reader(buf.as_slice()).unwrap();
        assert!(parsed.rows[0][1]);
        assert!(parsed.rows[1][0]);
    }
}
