/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! §6 external interfaces: DIMACS, Matrix Market, plain edge-list, and
//! dense 0/1 matrix readers/writers, plus the from-file format-sniffing
//! dispatcher used by the graph containers' `from_file` constructors.

pub mod dimacs;
pub mod edgelist;
pub mod matrix01;
pub mod mtx;

use std::path::Path;

use crate::bitset::Bitset;
use crate::error::IoError;
use crate::graph::{DiGraph, UGraph};

/// Tries DIMACS, then Matrix Market, then edge-list, then 0/1 matrix;
/// returns the first format that parses successfully (spec §4.5).
pub fn read_directed<B: Bitset>(path: impl AsRef<Path>) -> Result<DiGraph<B>, IoError> {
    let path = path.as_ref();
    dimacs::read_dimacs_directed(path)
        .or_else(|_| mtx::read_mtx_directed(path))
        .or_else(|_| edgelist::read_edgelist_directed(path))
        .or_else(|_| matrix01::read_matrix01_directed(path))
}

pub fn read_undirected<B: Bitset>(path: impl AsRef<Path>) -> Result<UGraph<B>, IoError> {
    let path = path.as_ref();
    dimacs::read_dimacs_undirected(path)
        .or_else(|_| mtx::read_mtx_undirected(path))
        .or_else(|_| edgelist::read_edgelist_undirected(path))
        .or_else(|_| matrix01::read_matrix01_undirected(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitset::BitsetDense;
    use std::io::Write;

    #[test]
    fn falls_back_to_edgelist_when_not_dimacs() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "% plain edges").unwrap();
        writeln!(file, "1 2").unwrap();
        writeln!(file, "2 3").unwrap();
        let g: UGraph<BitsetDense> = read_undirected(file.path()).unwrap();
        assert!(g.is_edge(0, 1));
        assert!(g.is_edge(1, 2));
    }

    #[test]
    fn prefers_dimacs_when_valid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "p edge 3 1").unwrap();
        writeln!(file, "e 1 2").unwrap();
        let g: UGraph<BitsetDense> = read_undirected(file.path()).unwrap();
        assert_eq!(g.number_of_vertices(), 3);
        assert!(g.is_edge(0, 1));
    }

    #[test]
    fn dimacs_with_self_loop_still_parses_as_dimacs() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "p edge 3 2").unwrap();
        writeln!(file, "e 1 1").unwrap();
        writeln!(file, "e 1 2").unwrap();
        let g: UGraph<BitsetDense> = read_undirected(file.path()).unwrap();
        assert_eq!(g.number_of_vertices(), 3);
        assert!(g.is_edge(0, 1));
    }
}
