/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Scanning cursors as first-class, borrowing values (spec §4.4, §9).
//!
//! The cached-in-bitset cursor on [`BitsetDense`]/[`BitsetSparse`] is kept
//! for callers that want it (spec §4.2/§4.3's public contract lists it
//! explicitly), but this module is the canonical iteration surface: each
//! cursor borrows its bitset and carries its own state, so Rust's borrow
//! checker — rather than a documented discipline — rules out the aliasing
//! hazards the cached-cursor style invites.

use crate::bitset::dense::{dense_next_bit, dense_next_bit_del, dense_prev_bit, dense_prev_bit_del, BitsetDense};
use crate::bitset::sparse::BitsetSparse;
use crate::word::NO_BIT;

/// Forward, non-destructive cursor over a [`BitsetDense`].
pub struct ForwardCursor<'a> {
    words: &'a [u64],
    block: usize,
    pos: i64,
}

impl<'a> ForwardCursor<'a> {
    pub fn new(bitset: &'a BitsetDense) -> Self {
        Self { words: bitset.words(), block: 0, pos: NO_BIT }
    }

    pub fn from_position(bitset: &'a BitsetDense, from: i64) -> Self {
        if from == NO_BIT {
            return Self::new(bitset);
        }
        Self { words: bitset.words(), block: from as usize / 64, pos: (from as usize % 64) as i64 }
    }

    pub fn next_bit(&mut self) -> i64 {
        dense_next_bit(self.words, &mut self.block, &mut self.pos)
    }

    pub fn current_block(&self) -> usize {
        self.block
    }
}

/// Reverse, non-destructive cursor over a [`BitsetDense`].
pub struct ReverseCursor<'a> {
    words: &'a [u64],
    block: usize,
    pos: i64,
}

impl<'a> ReverseCursor<'a> {
    pub fn new(bitset: &'a BitsetDense) -> Self {
        Self {
            words: bitset.words(),
            block: bitset.words().len().saturating_sub(1),
            pos: crate::word::WORD_SIZE as i64,
        }
    }

    pub fn next_bit(&mut self) -> i64 {
        dense_prev_bit(self.words, &mut self.block, &mut self.pos)
    }

    pub fn current_block(&self) -> usize {
        self.block
    }
}

/// Forward, destructive cursor over a [`BitsetDense`]: clears each bit as
/// it is yielded.
pub struct ForwardDeleteCursor<'a> {
    words: &'a mut [u64],
    block: usize,
}

impl<'a> ForwardDeleteCursor<'a> {
    pub fn new(bitset: &'a mut BitsetDense) -> Self {
        Self { words: bitset.words_mut(), block: 0 }
    }

    pub fn next_bit(&mut self) -> i64 {
        dense_next_bit_del(self.words, &mut self.block)
    }

    pub fn current_block(&self) -> usize {
        self.block
    }
}

/// Reverse, destructive cursor over a [`BitsetDense`].
pub struct ReverseDeleteCursor<'a> {
    words: &'a mut [u64],
    block: usize,
}

impl<'a> ReverseDeleteCursor<'a> {
    pub fn new(bitset: &'a mut BitsetDense) -> Self {
        let block = bitset.words().len().saturating_sub(1);
        Self { words: bitset.words_mut(), block }
    }

    pub fn next_bit(&mut self) -> i64 {
        dense_prev_bit_del(self.words, &mut self.block)
    }

    pub fn current_block(&self) -> usize {
        self.block
    }
}

/// Forward, non-destructive cursor over a [`BitsetSparse`]. Yields the
/// same sequence as [`BitsetSparse::next_bit`]; [`Self::current_block`]
/// reports the *logical* block index (spec §4.4: "the sparse variant
/// yields the block index of the last reported bit").
pub struct SparseForwardCursor<'a> {
    bitset: &'a BitsetSparse,
    index: usize,
    pos: i64,
    last_block: i64,
}

impl<'a> SparseForwardCursor<'a> {
    pub fn new(bitset: &'a BitsetSparse) -> Self {
        Self { bitset, index: 0, pos: NO_BIT, last_block: NO_BIT }
    }

    pub fn next_bit(&mut self) -> i64 {
        let entries = self.bitset.entries();
        let (blk, p) = crate::bitset::sparse::scan_next(entries, &mut self.index, &mut self.pos);
        self.last_block = blk;
        p
    }

    pub fn current_block(&self) -> i64 {
        self.last_block
    }
}

/// Forward, destructive cursor over a [`BitsetSparse`]. Per spec §4.4, a
/// destructive sparse cursor on an empty bitset must signal "empty" at
/// construction so callers don't need to call `next_bit` to discover it.
pub struct SparseForwardDeleteCursor<'a> {
    bitset: &'a mut BitsetSparse,
    index: usize,
    empty: bool,
}

impl<'a> SparseForwardDeleteCursor<'a> {
    pub fn new(bitset: &'a mut BitsetSparse) -> Self {
        let empty = bitset.is_empty();
        Self { bitset, index: 0, empty }
    }

    /// True if the bitset was empty when this cursor was constructed.
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn next_bit(&mut self) -> i64 {
        if self.empty {
            return NO_BIT;
        }
        crate::bitset::sparse::scan_next_del(self.bitset.entries_mut(), &mut self.index).1
    }
}

/// Reverse, non-destructive cursor over a [`BitsetSparse`]. Yields the
/// same sequence as [`BitsetSparse::prev_bit`]; [`Self::current_block`]
/// reports the logical block index of the last reported bit.
pub struct SparseReverseCursor<'a> {
    bitset: &'a BitsetSparse,
    index: usize,
    pos: i64,
    last_block: i64,
}

impl<'a> SparseReverseCursor<'a> {
    pub fn new(bitset: &'a BitsetSparse) -> Self {
        let index = bitset.entries().len().saturating_sub(1);
        Self { bitset, index, pos: crate::word::WORD_SIZE as i64, last_block: NO_BIT }
    }

    pub fn next_bit(&mut self) -> i64 {
        let entries = self.bitset.entries();
        let (blk, p) = crate::bitset::sparse::scan_prev(entries, &mut self.index, &mut self.pos);
        self.last_block = blk;
        p
    }

    pub fn current_block(&self) -> i64 {
        self.last_block
    }
}

/// Reverse, destructive cursor over a [`BitsetSparse`]. Like
/// [`SparseForwardDeleteCursor`], signals "empty" up front so callers
/// don't need a first `next_bit` call to discover it.
pub struct SparseReverseDeleteCursor<'a> {
    bitset: &'a mut BitsetSparse,
    index: usize,
    empty: bool,
}

impl<'a> SparseReverseDeleteCursor<'a> {
    pub fn new(bitset: &'a mut BitsetSparse) -> Self {
        let empty = bitset.is_empty();
        let index = bitset.entries().len().saturating_sub(1);
        Self { bitset, index, empty }
    }

    /// True if the bitset was empty when this cursor was constructed.
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn next_bit(&mut self) -> i64 {
        if self.empty {
            return NO_BIT;
        }
        crate::bitset::sparse::scan_prev_del(self.bitset.entries_mut(), &mut self.index).1
    }
}
