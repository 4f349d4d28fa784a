/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! A bit-parallel set library and adjacency-row graph container for exact
//! combinatorial algorithms on graphs.
//!
//! Three layers, bottom to top:
//!
//! - [`word`] / [`bitset`]: dense and sparse bit-parallel sets of
//!   non-negative integers sharing the [`bitset::Bitset`] trait.
//! - [`graph`]: directed and undirected adjacency-row containers generic
//!   over the row representation, plus vertex- and edge-weighted overlays.
//! - [`io`]: DIMACS, Matrix Market, edge-list, and 0/1 matrix readers and
//!   writers.
//!
//! No algorithms (clique search, coloring, ...) live here; this crate is
//! the storage and I/O substrate such algorithms are built on top of.

pub mod bitset;
pub mod error;
pub mod graph;
pub mod io;
pub mod rng;
pub mod timer;
pub mod word;

pub mod prelude {
    pub use crate::bitset::{Bitset, BitsetDense, BitsetSparse, SentinelBitset};
    pub use crate::error::{BitsetError, FormatError, GraphError, IoError};
    pub use crate::graph::{
        DiGraph, EdgeWeightKind, EdgeWeightedGraph, UGraph, VertexWeightedGraph,
    };
    pub use crate::rng::{RandomSource, SeededRng};
}
