/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Sentinel-bounded dense bitset (spec §4.4, "optional capability"),
//! grounded on `bitscan/bbsentinel.h`/`.cpp`'s `BBSentinel` class: a dense
//! bitset that tracks the inclusive range of blocks known to be
//! non-empty, `[low_block, high_block]`, and restricts population count
//! and scanning to that range.
//!
//! Semantics reduce exactly to [`BitsetDense`] restricted to
//! `[low_block*64, high_block*64+63]`; this type is a performance layer,
//! not a new set of behaviors.

use crate::bitset::dense::BitsetDense;
use crate::bitset::Bitset;
use crate::word::NO_BIT;

#[derive(Clone, Debug)]
pub struct SentinelBitset {
    inner: BitsetDense,
    low_block: usize,
    high_block: usize,
}

impl SentinelBitset {
    /// Recomputes `(low_block, high_block)` from scratch; called after a
    /// destructive operation that may have emptied a boundary block.
    fn refresh_bounds(&mut self) {
        let words = self.inner.words();
        let low = words.iter().position(|&w| w != 0);
        let high = words.iter().rposition(|&w| w != 0);
        match (low, high) {
            (Some(l), Some(h)) => {
                self.low_block = l;
                self.high_block = h;
            }
            _ => {
                self.low_block = 0;
                self.high_block = 0;
            }
        }
    }

    pub fn set(&mut self, p: usize) {
        let was_empty = self.inner.is_empty();
        self.inner.set(p);
        let blk = p / 64;
        if was_empty {
            self.low_block = blk;
            self.high_block = blk;
        } else {
            self.low_block = self.low_block.min(blk);
            self.high_block = self.high_block.max(blk);
        }
    }

    pub fn clear(&mut self, p: usize) {
        self.inner.clear(p);
        self.refresh_bounds();
    }

    pub fn clear_all(&mut self) {
        self.inner.clear_all();
        self.low_block = 0;
        self.high_block = 0;
    }

    pub fn size(&self) -> usize {
        if self.inner.is_empty() {
            return 0;
        }
        self.inner.size_range(self.low_block * 64, (self.high_block * 64 + 63) as i64)
    }

    pub fn is_set(&self, p: usize) -> bool {
        self.inner.is_set(p)
    }

    pub fn msb(&self) -> i64 {
        if self.inner.is_empty() {
            return NO_BIT;
        }
        self.inner.msb()
    }

    pub fn lsb(&self) -> i64 {
        if self.inner.is_empty() {
            return NO_BIT;
        }
        self.inner.lsb()
    }

    pub fn bounds(&self) -> (usize, usize) {
        (self.low_block, self.high_block)
    }

    pub fn as_dense(&self) -> &BitsetDense {
        &self.inner
    }
}

impl From<BitsetDense> for SentinelBitset {
    fn from(inner: BitsetDense) -> Self {
        let mut s = Self { inner, low_block: 0, high_block: 0 };
        s.refresh_bounds();
        s
    }
}

impl Bitset for SentinelBitset {
    fn new(capacity: usize) -> Self {
        Self { inner: BitsetDense::new(capacity), low_block: 0, high_block: 0 }
    }

    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    fn reset(&mut self, capacity: usize) {
        self.inner.reset(capacity);
        self.low_block = 0;
        self.high_block = 0;
    }

    fn set(&mut self, p: usize) {
        SentinelBitset::set(self, p);
    }

    fn clear(&mut self, p: usize) {
        SentinelBitset::clear(self, p);
    }

    fn is_set(&self, p: usize) -> bool {
        SentinelBitset::is_set(self, p)
    }

    fn clear_all(&mut self) {
        SentinelBitset::clear_all(self);
    }

    fn size(&self) -> usize {
        SentinelBitset::size(self)
    }

    fn msb(&self) -> i64 {
        SentinelBitset::msb(self)
    }

    fn lsb(&self) -> i64 {
        SentinelBitset::lsb(self)
    }

    fn is_disjoint(&self, other: &Self) -> bool {
        let (lo, hi) = (self.low_block.max(other.low_block), self.high_block.min(other.high_block));
        if lo > hi {
            return true;
        }
        self.inner.words()[lo..=hi]
            .iter()
            .zip(other.inner.words()[lo..=hi].iter())
            .all(|(a, b)| a & b == 0)
    }

    fn block_count(&self) -> usize {
        self.inner.block_count()
    }

    fn non_empty_block_count(&self) -> usize {
        self.inner.non_empty_block_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_track_content() {
        let mut b = SentinelBitset::new(300);
        b.set(70);
        b.set(200);
        assert_eq!(b.bounds(), (1, 3));
        assert_eq!(b.size(), 2);
    }

    #[test]
    fn bounds_shrink_on_clear() {
        let mut b = SentinelBitset::new(300);
        b.set(70);
        b.set(200);
        b.clear(200);
        assert_eq!(b.bounds(), (1, 1));
        assert_eq!(b.size(), 1);
    }

    #[test]
    fn reduces_to_dense_semantics() {
        let mut dense = BitsetDense::new(200);
        let mut sentinel = SentinelBitset::new(200);
        for p in [5, 70, 130, 199] {
            dense.set(p);
            sentinel.set(p);
        }
        for p in 0..200 {
            assert_eq!(dense.is_set(p), sentinel.is_set(p));
        }
        assert_eq!(dense.size(), sentinel.size());
    }
}
