/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Error kinds for the bitset and graph core (spec §7).
//!
//! I/O and format errors are reported by return value from the top-level
//! read operation; invariant violations are fatal by design (they indicate
//! a logic bug upstream of this crate, not a recoverable condition) and are
//! surfaced as a distinct, non-silent variant rather than a panic so that
//! callers embedding this crate still get a typed error back.

use thiserror::Error;

/// Errors raised by bitset construction, mutation, and scanning.
#[derive(Debug, Error)]
pub enum BitsetError {
    #[error("invalid capacity {0}: bitset universe size must be >= 0")]
    InvalidCapacity(i64),

    #[error("position {pos} out of range for bitset of capacity {capacity}")]
    OutOfRange { pos: i64, capacity: usize },

    #[error("scan_init attempted on an empty sparse bitset")]
    ScanOnEmpty,
}

/// Errors raised by graph mutation and queries.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("graph size must be positive, got {0}")]
    InvalidSize(i64),

    #[error(transparent)]
    Bitset(#[from] BitsetError),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

/// Errors raised while parsing an external graph format (spec §6).
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("malformed header: {0}")]
    BadHeader(String),

    #[error("expected {expected} edge lines, found {found}")]
    EdgeCountMismatch { expected: usize, found: usize },

    #[error("non-numeric token {token:?} at line {line}")]
    NonNumericToken { line: usize, token: String },

    #[error("edge line encountered where none was expected (line {0})")]
    UnexpectedEdgeLine(usize),

    #[error("inconsistent edge line token count at line {line}: first edge line had {first_tokens} tokens, this one has {tokens}")]
    InconsistentEdgeForm {
        line: usize,
        first_tokens: usize,
        tokens: usize,
    },

    #[error("non-square matrix: {rows} rows, {cols} cols")]
    NonSquareMatrix { rows: usize, cols: usize },

    #[error("floating point matrix entries are not supported")]
    FloatingPointMatrix,
}

/// Top-level error for any fallible read/write operation exposed by this
/// crate (spec §7 propagation policy: I/O and format errors are reported by
/// return code from the top-level operation; the container is left empty on
/// failure, never partially filled).
#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}
