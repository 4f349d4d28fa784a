/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Dense bitset: a contiguous array of 64-bit words (spec §4.2).
//!
//! Grounded on `bitscan/bbintrinsic.h`'s `BBIntrin` class: the scanning
//! algorithms below (forward/reverse, destructive/non-destructive) are a
//! direct translation of `next_bit`/`prev_bit`/`next_bit_del`/`prev_bit_del`.

use std::ops::{BitAnd, BitOr, BitXor, Sub};

use crate::bitset::{Bitset, ScanType};
use crate::word::{self, NO_BIT, WORD_SIZE};

/// A set of non-negative integers over a fixed universe `[0, N)`, packed
/// into 64-bit words.
///
/// Bits at positions `>= N` within the last word are always zero; every
/// mutating operation maintains this invariant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitsetDense {
    words: Vec<u64>,
    capacity: usize,
    // cached scan cursor (legacy "in-bitset" surface, spec §9) — the
    // canonical iteration surface is the external cursors in `cursor.rs`.
    scan_block: usize,
    scan_pos: i64,
}

impl BitsetDense {
    /// Number of 64-bit blocks backing this bitset.
    pub fn number_of_blocks(&self) -> usize {
        self.words.len()
    }

    fn trim_tail(&mut self) {
        if self.capacity == 0 {
            return;
        }
        let last = self.words.len() - 1;
        let valid_bits = self.capacity - last * 64;
        if valid_bits < 64 {
            self.words[last] &= word::mask_low(valid_bits as u32);
        }
    }

    /// Sets every position in `[a, b]` (both inclusive).
    pub fn set_range(&mut self, a: usize, b: usize) {
        debug_assert!(a <= b, "set_range: a={a} > b={b}");
        if b >= self.capacity {
            debug_assert!(false, "set_range: b={b} out of range (capacity {})", self.capacity);
        }
        let (a, b) = (a.min(self.capacity.saturating_sub(1)), b.min(self.capacity.saturating_sub(1)));
        if self.capacity == 0 {
            return;
        }
        let first_blk = a / 64;
        let last_blk = b / 64;
        if first_blk == last_blk {
            self.words[first_blk] |= word::mask_high(a as u32 % 64) & word::mask_low(b as u32 % 64 + 1);
            return;
        }
        self.words[first_blk] |= word::mask_high(a as u32 % 64);
        for blk in &mut self.words[first_blk + 1..last_blk] {
            *blk = u64::MAX;
        }
        self.words[last_blk] |= word::mask_low(b as u32 % 64 + 1);
        self.trim_tail();
    }

    /// Clears every position in `[a, b]` (both inclusive).
    pub fn clear_range(&mut self, a: usize, b: usize) {
        debug_assert!(a <= b, "clear_range: a={a} > b={b}");
        if self.capacity == 0 {
            return;
        }
        let (a, b) = (a.min(self.capacity - 1), b.min(self.capacity - 1));
        let first_blk = a / 64;
        let last_blk = b / 64;
        if first_blk == last_blk {
            self.words[first_blk] &= !(word::mask_high(a as u32 % 64) & word::mask_low(b as u32 % 64 + 1));
            return;
        }
        self.words[first_blk] &= !word::mask_high(a as u32 % 64);
        for blk in &mut self.words[first_blk + 1..last_blk] {
            *blk = 0;
        }
        self.words[last_blk] &= !word::mask_low(b as u32 % 64 + 1);
    }

    /// Popcount restricted to `[from, to]`; `to == -1` means "to the end".
    pub fn size_range(&self, from: usize, to: i64) -> usize {
        let to = if to < 0 { self.capacity.saturating_sub(1) } else { to as usize };
        if self.capacity == 0 || from > to {
            return 0;
        }
        let first_blk = from / 64;
        let last_blk = to.min(self.capacity - 1) / 64;
        let mut count = 0u32;
        for (i, &w) in self.words[first_blk..=last_blk].iter().enumerate() {
            let blk = first_blk + i;
            let mut w = w;
            if blk == first_blk {
                w &= word::mask_high(from as u32 % 64);
            }
            if blk == last_blk {
                w &= word::mask_low(to as u32 % 64 + 1);
            }
            count += word::popcount(w);
        }
        count as usize
    }

    /// Builds a bitset from an ordered list of positions, tolerating
    /// duplicates silently.
    pub fn from_positions(capacity: usize, positions: &[usize]) -> Self {
        let mut bs = Self::new(capacity);
        for &p in positions {
            bs.set(p);
        }
        bs
    }

    // --- cached scan cursor (legacy surface) ---

    /// Initializes the cached scan cursor for `kind`.
    pub fn scan_init(&mut self, kind: ScanType) {
        match kind {
            ScanType::Forward | ScanType::ForwardDestructive => {
                self.scan_block = 0;
                self.scan_pos = NO_BIT;
            }
            ScanType::Reverse | ScanType::ReverseDestructive => {
                self.scan_block = self.words.len().saturating_sub(1);
                self.scan_pos = WORD_SIZE as i64;
            }
        }
    }

    /// Initializes the cached scan cursor so the next yield is strictly
    /// after/before `from` (direction per `kind`). `from == NO_BIT` behaves
    /// like [`Self::scan_init`].
    pub fn scan_init_from(&mut self, from: i64, kind: ScanType) {
        if from == NO_BIT {
            self.scan_init(kind);
            return;
        }
        let from = from as usize;
        // Forward and reverse use the same (block, pos) encoding here: the
        // forward scan looks past `pos`, the reverse scan looks before it.
        self.scan_block = from / 64;
        self.scan_pos = (from % 64) as i64;
    }

    /// Next position in ascending order, or [`NO_BIT`].
    pub fn next_bit(&mut self) -> i64 {
        dense_next_bit(&self.words, &mut self.scan_block, &mut self.scan_pos)
    }

    /// Next position in descending order, or [`NO_BIT`].
    pub fn prev_bit(&mut self) -> i64 {
        dense_prev_bit(&self.words, &mut self.scan_block, &mut self.scan_pos)
    }

    /// Next position in ascending order, clearing it before returning.
    pub fn next_bit_del(&mut self) -> i64 {
        dense_next_bit_del(&mut self.words, &mut self.scan_block)
    }

    /// Next position in descending order, clearing it before returning.
    pub fn prev_bit_del(&mut self) -> i64 {
        dense_prev_bit_del(&mut self.words, &mut self.scan_block)
    }

    /// Read-only access to the backing words, for graph row masking and
    /// subgraph extraction.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    pub fn words_mut(&mut self) -> &mut [u64] {
        &mut self.words
    }
}

impl Bitset for BitsetDense {
    fn new(capacity: usize) -> Self {
        Self {
            words: vec![0u64; word::blocks_needed(capacity)],
            capacity,
            scan_block: 0,
            scan_pos: NO_BIT,
        }
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn reset(&mut self, capacity: usize) {
        self.words = vec![0u64; word::blocks_needed(capacity)];
        self.capacity = capacity;
        self.scan_block = 0;
        self.scan_pos = NO_BIT;
    }

    fn set(&mut self, p: usize) {
        debug_assert!(p < self.capacity, "set: position {p} out of range (capacity {})", self.capacity);
        if p >= self.capacity {
            return;
        }
        self.words[p / 64] |= word::mask_single((p % 64) as u32);
    }

    fn clear(&mut self, p: usize) {
        debug_assert!(p < self.capacity, "clear: position {p} out of range (capacity {})", self.capacity);
        if p >= self.capacity {
            return;
        }
        self.words[p / 64] &= !word::mask_single((p % 64) as u32);
    }

    fn is_set(&self, p: usize) -> bool {
        debug_assert!(p < self.capacity, "is_set: position {p} out of range (capacity {})", self.capacity);
        if p >= self.capacity {
            return false;
        }
        self.words[p / 64] & word::mask_single((p % 64) as u32) != 0
    }

    fn clear_all(&mut self) {
        for w in &mut self.words {
            *w = 0;
        }
    }

    fn size(&self) -> usize {
        self.words.iter().map(|w| word::popcount(*w) as usize).sum()
    }

    fn msb(&self) -> i64 {
        for (i, &w) in self.words.iter().enumerate().rev() {
            if w != 0 {
                return (word::leading_zero_complement(w) as usize + i * 64) as i64;
            }
        }
        NO_BIT
    }

    fn lsb(&self) -> i64 {
        for (i, &w) in self.words.iter().enumerate() {
            if w != 0 {
                return (word::trailing_zero(w) as usize + i * 64) as i64;
            }
        }
        NO_BIT
    }

    fn next_after(&self, p: usize) -> i64 {
        let blk = p / 64;
        if blk >= self.words.len() {
            return NO_BIT;
        }
        let w = self.words[blk] & word::mask_high((p % 64) as u32 + 1);
        if w != 0 {
            return (word::trailing_zero(w) as usize + blk * 64) as i64;
        }
        for (i, &w) in self.words.iter().enumerate().skip(blk + 1) {
            if w != 0 {
                return (word::trailing_zero(w) as usize + i * 64) as i64;
            }
        }
        NO_BIT
    }

    fn is_disjoint(&self, other: &Self) -> bool {
        self.words.iter().zip(other.words.iter()).all(|(a, b)| a & b == 0)
    }

    fn block_count(&self) -> usize {
        self.words.len()
    }

    fn non_empty_block_count(&self) -> usize {
        self.words.iter().filter(|&&w| w != 0).count()
    }
}

/// Element-wise AND of `a` and `b`, written into `out` (must share `a`'s
/// capacity/block count).
pub fn and_into(a: &BitsetDense, b: &BitsetDense, out: &mut BitsetDense) {
    for ((o, x), y) in out.words.iter_mut().zip(&a.words).zip(&b.words) {
        *o = x & y;
    }
}

pub fn or_into(a: &BitsetDense, b: &BitsetDense, out: &mut BitsetDense) {
    for ((o, x), y) in out.words.iter_mut().zip(&a.words).zip(&b.words) {
        *o = x | y;
    }
}

pub fn xor_into(a: &BitsetDense, b: &BitsetDense, out: &mut BitsetDense) {
    for ((o, x), y) in out.words.iter_mut().zip(&a.words).zip(&b.words) {
        *o = x ^ y;
    }
}

/// `a` minus `b` (`a AND NOT b`), written into `out`.
pub fn erase_into(a: &BitsetDense, b: &BitsetDense, out: &mut BitsetDense) {
    for ((o, x), y) in out.words.iter_mut().zip(&a.words).zip(&b.words) {
        *o = x & !y;
    }
}

impl BitAnd for &BitsetDense {
    type Output = BitsetDense;
    fn bitand(self, rhs: Self) -> BitsetDense {
        let mut out = BitsetDense::new(self.capacity);
        and_into(self, rhs, &mut out);
        out
    }
}

impl BitOr for &BitsetDense {
    type Output = BitsetDense;
    fn bitor(self, rhs: Self) -> BitsetDense {
        let mut out = BitsetDense::new(self.capacity);
        or_into(self, rhs, &mut out);
        out
    }
}

impl BitXor for &BitsetDense {
    type Output = BitsetDense;
    fn bitxor(self, rhs: Self) -> BitsetDense {
        let mut out = BitsetDense::new(self.capacity);
        xor_into(self, rhs, &mut out);
        out
    }
}

impl Sub for &BitsetDense {
    type Output = BitsetDense;
    fn sub(self, rhs: Self) -> BitsetDense {
        let mut out = BitsetDense::new(self.capacity);
        erase_into(self, rhs, &mut out);
        out
    }
}

/// Forward non-destructive scan step, shared by the cached cursor methods
/// above and the external [`crate::bitset::cursor::ForwardCursor`].
pub(crate) fn dense_next_bit(words: &[u64], bbi: &mut usize, pos: &mut i64) -> i64 {
    if words.is_empty() {
        return NO_BIT;
    }
    let from = if *pos < 0 { 0 } else { (*pos as u32) + 1 };
    let w = words[*bbi] & word::mask_high(from);
    if w != 0 {
        let p = word::trailing_zero(w);
        *pos = p as i64;
        return (p as usize + *bbi * 64) as i64;
    }
    for i in (*bbi + 1)..words.len() {
        if words[i] != 0 {
            let p = word::trailing_zero(words[i]);
            *bbi = i;
            *pos = p as i64;
            return (p as usize + i * 64) as i64;
        }
    }
    NO_BIT
}

pub(crate) fn dense_prev_bit(words: &[u64], bbi: &mut usize, pos: &mut i64) -> i64 {
    if words.is_empty() {
        return NO_BIT;
    }
    let upto = if *pos < 0 { 0 } else { *pos as u32 };
    let w = words[*bbi] & word::mask_low(upto);
    if w != 0 {
        let p = word::leading_zero_complement(w);
        *pos = p as i64;
        return (p as usize + *bbi * 64) as i64;
    }
    for i in (0..*bbi).rev() {
        if words[i] != 0 {
            let p = word::leading_zero_complement(words[i]);
            *bbi = i;
            *pos = p as i64;
            return (p as usize + i * 64) as i64;
        }
    }
    NO_BIT
}

pub(crate) fn dense_next_bit_del(words: &mut [u64], bbi: &mut usize) -> i64 {
    for i in *bbi..words.len() {
        if words[i] != 0 {
            let p = word::trailing_zero(words[i]);
            *bbi = i;
            words[i] &= !word::mask_single(p);
            return (p as usize + i * 64) as i64;
        }
    }
    NO_BIT
}

pub(crate) fn dense_prev_bit_del(words: &mut [u64], bbi: &mut usize) -> i64 {
    let start = (*bbi).min(words.len().saturating_sub(1));
    for i in (0..=start).rev() {
        if words[i] != 0 {
            let p = word::leading_zero_complement(words[i]);
            *bbi = i;
            words[i] &= !word::mask_single(p);
            return (p as usize + i * 64) as i64;
        }
    }
    NO_BIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiples_of_50_in_301() {
        let mut b = BitsetDense::new(301);
        for p in (0..=300).step_by(50) {
            b.set(p);
        }
        assert_eq!(b.size(), 7);
        for p in (0..=300).step_by(50) {
            assert!(b.is_set(p));
        }
        assert_eq!(b.number_of_blocks(), 5);
        assert_eq!(b.msb(), 300);
        assert_eq!(b.lsb(), 0);
    }

    #[test]
    fn reverse_destructive_scan_yields_all_then_empties() {
        let mut b = BitsetDense::new(301);
        for p in (0..=300).step_by(50) {
            b.set(p);
        }
        b.scan_init(ScanType::ReverseDestructive);
        let mut out = Vec::new();
        loop {
            let v = b.prev_bit_del();
            if v == NO_BIT {
                break;
            }
            out.push(v);
        }
        assert_eq!(out, vec![300, 250, 200, 150, 100, 50, 0]);
        assert_eq!(b.size(), 0);
    }

    #[test]
    fn set_range_touches_expected_words() {
        let mut b = BitsetDense::new(200);
        b.set_range(3, 130);
        assert_eq!(b.size(), 128);
        assert!(!b.is_set(2));
        assert!(b.is_set(3));
        assert!(b.is_set(130));
        assert!(!b.is_set(131));
    }

    #[test]
    fn set_range_single_bit() {
        let mut b = BitsetDense::new(10);
        b.set_range(4, 4);
        assert_eq!(b.to_vector(), vec![4]);
    }

    #[test]
    fn clear_all_empties() {
        let mut b = BitsetDense::new(128);
        b.set_range(0, 127);
        b.clear_all();
        assert!(b.is_empty());
    }

    #[test]
    fn boolean_algebra() {
        let mut a = BitsetDense::new(128);
        let mut b = BitsetDense::new(128);
        a.set_range(0, 63);
        b.set_range(32, 95);
        let and = &a & &b;
        let or = &a | &b;
        let xor = &a ^ &b;
        let erase = &a - &b;
        for p in 0..128 {
            assert_eq!(and.is_set(p), a.is_set(p) && b.is_set(p));
            assert_eq!(or.is_set(p), a.is_set(p) || b.is_set(p));
            assert_eq!(xor.is_set(p), a.is_set(p) != b.is_set(p));
            assert_eq!(erase.is_set(p), a.is_set(p) && !b.is_set(p));
        }
    }

    #[test]
    fn from_positions_tolerates_duplicates() {
        let b = BitsetDense::from_positions(10, &[1, 2, 2, 5, 1]);
        assert_eq!(b.size(), 3);
        assert_eq!(b.to_vector(), vec![1, 2, 5]);
    }

    #[test]
    fn zero_capacity_is_valid_and_empty() {
        let b = BitsetDense::new(0);
        assert!(b.is_empty());
        assert_eq!(b.msb(), NO_BIT);
        assert_eq!(b.lsb(), NO_BIT);
    }

    #[test]
    fn size_range_to_end_sentinel() {
        let mut b = BitsetDense::new(200);
        b.set_range(0, 199);
        assert_eq!(b.size_range(100, -1), 100);
        assert_eq!(b.size_range(0, 49), 50);
    }
}
