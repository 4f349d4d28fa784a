/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Sparse bitset: a sorted vector of non-empty `(block_index, word)`
//! entries (spec §4.3), grounded on `bitscan/bbscan_sparse.h`'s `BBScanSp`.
//!
//! The entry-vector index (`scan_.bbi_` in the original) is distinct from
//! the logical block index stored inside each entry (`vBB_[i].idx_`); the
//! API exposes both where the original does.

use crate::bitset::{Bitset, ScanType};
use crate::word::{self, NO_BIT, WORD_SIZE};

/// One non-empty 64-bit block: `block` is the logical block index
/// (`p / 64`), `word` is never zero as a maintained invariant (transient
/// zero entries are tolerated mid-mutation and removed by
/// [`BitsetSparse::shrink_to_fit`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub block: u32,
    pub word: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitsetSparse {
    entries: Vec<Entry>,
    capacity: usize,
    scan_index: usize,
    scan_pos: i64,
}

impl BitsetSparse {
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut Vec<Entry> {
        &mut self.entries
    }

    /// Binary search for logical block `k`; returns `(found, index)` where
    /// `index` is the position in the entry vector (either the match, or
    /// the insertion point that keeps the vector sorted).
    fn find_block(&self, k: u32) -> (bool, usize) {
        match self.entries.binary_search_by_key(&k, |e| e.block) {
            Ok(i) => (true, i),
            Err(i) => (false, i),
        }
    }

    fn word_at(&self, block: u32) -> u64 {
        match self.find_block(block) {
            (true, i) => self.entries[i].word,
            (false, _) => 0,
        }
    }

    /// Removes entries whose word has become zero, restoring the
    /// "non-empty blocks only" invariant (spec §4.3).
    pub fn shrink_to_fit(&mut self) {
        self.entries.retain(|e| e.word != 0);
    }

    /// Sets every position in `[a, b]` (both inclusive), upserting each
    /// touched block; interior blocks become `u64::MAX`.
    pub fn set_range(&mut self, a: usize, b: usize) {
        debug_assert!(a <= b, "set_range: a={a} > b={b}");
        if self.capacity == 0 {
            return;
        }
        let (a, b) = (a.min(self.capacity - 1), b.min(self.capacity - 1));
        let first_blk = (a / 64) as u32;
        let last_blk = (b / 64) as u32;
        for blk in first_blk..=last_blk {
            let mask = if blk == first_blk && blk == last_blk {
                word::mask_high(a as u32 % 64) & word::mask_low(b as u32 % 64 + 1)
            } else if blk == first_blk {
                word::mask_high(a as u32 % 64)
            } else if blk == last_blk {
                word::mask_low(b as u32 % 64 + 1)
            } else {
                u64::MAX
            };
            self.upsert(blk, |w| w | mask);
        }
    }

    pub fn clear_range(&mut self, a: usize, b: usize) {
        debug_assert!(a <= b, "clear_range: a={a} > b={b}");
        if self.capacity == 0 {
            return;
        }
        let (a, b) = (a.min(self.capacity - 1), b.min(self.capacity - 1));
        let first_blk = (a / 64) as u32;
        let last_blk = (b / 64) as u32;
        for blk in first_blk..=last_blk {
            let mask = if blk == first_blk && blk == last_blk {
                word::mask_high(a as u32 % 64) & word::mask_low(b as u32 % 64 + 1)
            } else if blk == first_blk {
                word::mask_high(a as u32 % 64)
            } else if blk == last_blk {
                word::mask_low(b as u32 % 64 + 1)
            } else {
                u64::MAX
            };
            if let (true, i) = self.find_block(blk) {
                self.entries[i].word &= !mask;
            }
        }
    }

    fn upsert(&mut self, block: u32, combine: impl FnOnce(u64) -> u64) {
        match self.find_block(block) {
            (true, i) => self.entries[i].word = combine(self.entries[i].word),
            (false, i) => self.entries.insert(i, Entry { block, word: combine(0) }),
        }
    }

    pub fn from_positions(capacity: usize, positions: &[usize]) -> Self {
        let mut bs = Self::new(capacity);
        for &p in positions {
            bs.set(p);
        }
        bs
    }

    // --- cached scan cursor ---

    pub fn scan_init(&mut self, kind: ScanType) -> i64 {
        if self.entries.is_empty() {
            return NO_BIT;
        }
        match kind {
            ScanType::Forward | ScanType::ForwardDestructive => {
                self.scan_index = 0;
                self.scan_pos = NO_BIT;
            }
            ScanType::Reverse | ScanType::ReverseDestructive => {
                self.scan_index = self.entries.len() - 1;
                self.scan_pos = WORD_SIZE as i64;
            }
        }
        0
    }

    /// Finds the entry-vector index for logical block `from_block`, or the
    /// nearest present block after it (used by `scan_init_from`, which per
    /// spec is only required for the non-destructive case).
    pub fn scan_init_from(&mut self, from: i64, kind: ScanType) -> i64 {
        if from == NO_BIT {
            return self.scan_init(kind);
        }
        let from = from as usize;
        let (found, idx) = self.find_block((from / 64) as u32);
        if idx >= self.entries.len() {
            return NO_BIT;
        }
        self.scan_index = idx;
        self.scan_pos = if found { (from % 64) as i64 } else { NO_BIT };
        0
    }

    pub fn next_bit(&mut self) -> i64 {
        scan_next(&self.entries, &mut self.scan_index, &mut self.scan_pos).1
    }

    /// Like [`Self::next_bit`] but also reports the logical block index of
    /// the entry the bit came from.
    pub fn next_bit_with_block(&mut self) -> (i64, i64) {
        let (blk, p) = scan_next(&self.entries, &mut self.scan_index, &mut self.scan_pos);
        (blk, p)
    }

    pub fn prev_bit(&mut self) -> i64 {
        scan_prev(&self.entries, &mut self.scan_index, &mut self.scan_pos).1
    }

    pub fn next_bit_del(&mut self) -> i64 {
        scan_next_del(&mut self.entries, &mut self.scan_index).1
    }

    /// Destructive forward scan reporting the logical block index carried
    /// by the entry (spec §4.3, "block report" variant).
    pub fn next_bit_del_block(&mut self) -> (i64, i64) {
        scan_next_del(&mut self.entries, &mut self.scan_index)
    }

    /// Destructive forward scan reporting the entry-vector index instead
    /// of the logical block index (spec §4.3, "entry-position report"
    /// variant) — callers typically batch-erase entries with this index
    /// after the scan.
    pub fn next_bit_del_entry_pos(&mut self) -> (i64, i64) {
        let p = scan_next_del(&mut self.entries, &mut self.scan_index).1;
        if p == NO_BIT {
            (NO_BIT, NO_BIT)
        } else {
            (self.scan_index as i64, p)
        }
    }

    pub fn prev_bit_del(&mut self) -> i64 {
        scan_prev_del(&mut self.entries, &mut self.scan_index).1
    }
}

impl Bitset for BitsetSparse {
    fn new(capacity: usize) -> Self {
        Self { entries: Vec::new(), capacity, scan_index: 0, scan_pos: NO_BIT }
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn reset(&mut self, capacity: usize) {
        self.entries.clear();
        self.capacity = capacity;
        self.scan_index = 0;
        self.scan_pos = NO_BIT;
    }

    fn set(&mut self, p: usize) {
        debug_assert!(p < self.capacity, "set: position {p} out of range (capacity {})", self.capacity);
        if p >= self.capacity {
            return;
        }
        let block = (p / 64) as u32;
        let mask = word::mask_single((p % 64) as u32);
        self.upsert(block, |w| w | mask);
    }

    fn clear(&mut self, p: usize) {
        debug_assert!(p < self.capacity, "clear: position {p} out of range (capacity {})", self.capacity);
        if p >= self.capacity {
            return;
        }
        let block = (p / 64) as u32;
        if let (true, i) = self.find_block(block) {
            self.entries[i].word &= !word::mask_single((p % 64) as u32);
        }
    }

    fn is_set(&self, p: usize) -> bool {
        if p >= self.capacity {
            return false;
        }
        self.word_at((p / 64) as u32) & word::mask_single((p % 64) as u32) != 0
    }

    fn clear_all(&mut self) {
        self.entries.clear();
    }

    fn size(&self) -> usize {
        self.entries.iter().map(|e| word::popcount(e.word) as usize).sum()
    }

    fn msb(&self) -> i64 {
        self.entries
            .last()
            .filter(|e| e.word != 0)
            .map(|e| (word::leading_zero_complement(e.word) as usize + e.block as usize * 64) as i64)
            .unwrap_or(NO_BIT)
    }

    fn lsb(&self) -> i64 {
        self.entries
            .first()
            .filter(|e| e.word != 0)
            .map(|e| (word::trailing_zero(e.word) as usize + e.block as usize * 64) as i64)
            .unwrap_or(NO_BIT)
    }

    fn is_disjoint(&self, other: &Self) -> bool {
        merge_and(&self.entries, &other.entries).is_empty()
    }

    fn block_count(&self) -> usize {
        self.entries.len()
    }

    fn non_empty_block_count(&self) -> usize {
        self.entries.iter().filter(|e| e.word != 0).count()
    }

    fn shrink_to_fit(&mut self) {
        BitsetSparse::shrink_to_fit(self);
    }
}

fn merge_and(a: &[Entry], b: &[Entry]) -> Vec<Entry> {
    let (mut i, mut j) = (0, 0);
    let mut out = Vec::new();
    while i < a.len() && j < b.len() {
        match a[i].block.cmp(&b[j].block) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                let w = a[i].word & b[j].word;
                if w != 0 {
                    out.push(Entry { block: a[i].block, word: w });
                }
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Two-pointer AND merge (spec §4.3): output only where both sides share a
/// block, emitting the intersection word if non-zero.
pub fn and(a: &BitsetSparse, b: &BitsetSparse) -> BitsetSparse {
    BitsetSparse {
        entries: merge_and(&a.entries, &b.entries),
        capacity: a.capacity,
        scan_index: 0,
        scan_pos: NO_BIT,
    }
}

/// Two-pointer OR merge: emits every block present in either side.
pub fn or(a: &BitsetSparse, b: &BitsetSparse) -> BitsetSparse {
    let (mut i, mut j) = (0, 0);
    let mut out = Vec::new();
    while i < a.entries.len() || j < b.entries.len() {
        match (a.entries.get(i), b.entries.get(j)) {
            (Some(x), Some(y)) if x.block == y.block => {
                out.push(Entry { block: x.block, word: x.word | y.word });
                i += 1;
                j += 1;
            }
            (Some(x), Some(y)) if x.block < y.block => {
                out.push(*x);
                i += 1;
            }
            (Some(_), Some(y)) => {
                out.push(*y);
                j += 1;
            }
            (Some(x), None) => {
                out.push(*x);
                i += 1;
            }
            (None, Some(y)) => {
                out.push(*y);
                j += 1;
            }
            (None, None) => unreachable!(),
        }
    }
    BitsetSparse { entries: out, capacity: a.capacity, scan_index: 0, scan_pos: NO_BIT }
}

/// Two-pointer XOR merge: shared blocks emit `a ^ b` (omitted if zero);
/// singleton blocks pass through unchanged.
pub fn xor(a: &BitsetSparse, b: &BitsetSparse) -> BitsetSparse {
    let (mut i, mut j) = (0, 0);
    let mut out = Vec::new();
    while i < a.entries.len() || j < b.entries.len() {
        match (a.entries.get(i), b.entries.get(j)) {
            (Some(x), Some(y)) if x.block == y.block => {
                let w = x.word ^ y.word;
                if w != 0 {
                    out.push(Entry { block: x.block, word: w });
                }
                i += 1;
                j += 1;
            }
            (Some(x), Some(y)) if x.block < y.block => {
                out.push(*x);
                i += 1;
            }
            (Some(_), Some(y)) => {
                out.push(*y);
                j += 1;
            }
            (Some(x), None) => {
                out.push(*x);
                i += 1;
            }
            (None, Some(y)) => {
                out.push(*y);
                j += 1;
            }
            (None, None) => unreachable!(),
        }
    }
    BitsetSparse { entries: out, capacity: a.capacity, scan_index: 0, scan_pos: NO_BIT }
}

/// `a` minus `b`: for every block of `a`, emit `a.word & !b.word` if
/// non-zero when `b` also has the block, else pass `a`'s entry through.
pub fn erase(a: &BitsetSparse, b: &BitsetSparse) -> BitsetSparse {
    let mut out = Vec::new();
    for e in &a.entries {
        match b.find_block(e.block) {
            (true, j) => {
                let w = e.word & !b.entries[j].word;
                if w != 0 {
                    out.push(Entry { block: e.block, word: w });
                }
            }
            (false, _) => out.push(*e),
        }
    }
    BitsetSparse { entries: out, capacity: a.capacity, scan_index: 0, scan_pos: NO_BIT }
}

/// `AND_block` (spec §4.3): restricts the AND merge to the inclusive
/// logical block range `[first_block, last_block]`.
pub fn and_block(a: &BitsetSparse, b: &BitsetSparse, first_block: u32, last_block: u32) -> BitsetSparse {
    let entries = merge_and(&a.entries, &b.entries)
        .into_iter()
        .filter(|e| e.block >= first_block && e.block <= last_block)
        .collect();
    BitsetSparse { entries, capacity: a.capacity, scan_index: 0, scan_pos: NO_BIT }
}

/// `OR_block` (spec §4.3): restricts the OR merge to the inclusive logical
/// block range `[first_block, last_block]`.
pub fn or_block(a: &BitsetSparse, b: &BitsetSparse, first_block: u32, last_block: u32) -> BitsetSparse {
    let mut result = or(a, b);
    result.entries.retain(|e| e.block >= first_block && e.block <= last_block);
    result
}

/// `XOR_block` (spec §4.3): restricts the XOR merge to the inclusive
/// logical block range `[first_block, last_block]`.
pub fn xor_block(a: &BitsetSparse, b: &BitsetSparse, first_block: u32, last_block: u32) -> BitsetSparse {
    let mut result = xor(a, b);
    result.entries.retain(|e| e.block >= first_block && e.block <= last_block);
    result
}

/// `ERASE_block` (spec §4.3): restricts the difference to the inclusive
/// logical block range `[first_block, last_block]`.
pub fn erase_block(a: &BitsetSparse, b: &BitsetSparse, first_block: u32, last_block: u32) -> BitsetSparse {
    let mut result = erase(a, b);
    result.entries.retain(|e| e.block >= first_block && e.block <= last_block);
    result
}

pub(crate) fn scan_next(entries: &[Entry], idx: &mut usize, pos: &mut i64) -> (i64, i64) {
    if entries.is_empty() || *idx >= entries.len() {
        return (NO_BIT, NO_BIT);
    }
    let from = if *pos < 0 { 0 } else { (*pos as u32) + 1 };
    let w = entries[*idx].word & word::mask_high(from);
    if w != 0 {
        let p = word::trailing_zero(w);
        *pos = p as i64;
        let blk = entries[*idx].block;
        return (blk as i64, (p as usize + blk as usize * 64) as i64);
    }
    for i in (*idx + 1)..entries.len() {
        if entries[i].word != 0 {
            let p = word::trailing_zero(entries[i].word);
            *idx = i;
            *pos = p as i64;
            let blk = entries[i].block;
            return (blk as i64, (p as usize + blk as usize * 64) as i64);
        }
    }
    (NO_BIT, NO_BIT)
}

pub(crate) fn scan_prev(entries: &[Entry], idx: &mut usize, pos: &mut i64) -> (i64, i64) {
    if entries.is_empty() {
        return (NO_BIT, NO_BIT);
    }
    let upto = if *pos < 0 { 0 } else { *pos as u32 };
    let w = entries[*idx].word & word::mask_low(upto);
    if w != 0 {
        let p = word::leading_zero_complement(w);
        *pos = p as i64;
        let blk = entries[*idx].block;
        return (blk as i64, (p as usize + blk as usize * 64) as i64);
    }
    for i in (0..*idx).rev() {
        if entries[i].word != 0 {
            let p = word::leading_zero_complement(entries[i].word);
            *idx = i;
            *pos = p as i64;
            let blk = entries[i].block;
            return (blk as i64, (p as usize + blk as usize * 64) as i64);
        }
    }
    (NO_BIT, NO_BIT)
}

pub(crate) fn scan_next_del(entries: &mut [Entry], idx: &mut usize) -> (i64, i64) {
    for i in *idx..entries.len() {
        if entries[i].word != 0 {
            let p = word::trailing_zero(entries[i].word);
            *idx = i;
            entries[i].word &= !word::mask_single(p);
            let blk = entries[i].block;
            return (blk as i64, (p as usize + blk as usize * 64) as i64);
        }
    }
    (NO_BIT, NO_BIT)
}

pub(crate) fn scan_prev_del(entries: &mut [Entry], idx: &mut usize) -> (i64, i64) {
    let start = (*idx).min(entries.len().saturating_sub(1));
    if entries.is_empty() {
        return (NO_BIT, NO_BIT);
    }
    for i in (0..=start).rev() {
        if entries[i].word != 0 {
            let p = word::leading_zero_complement(entries[i].word);
            *idx = i;
            entries[i].word &= !word::mask_single(p);
            let blk = entries[i].block;
            return (blk as i64, (p as usize + blk as usize * 64) as i64);
        }
    }
    (NO_BIT, NO_BIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_set_spanning_blocks() {
        let mut b = BitsetSparse::new(10000);
        b.set_range(3, 27);
        b.set(1002);
        b.set_range(29, 125);
        assert_eq!(b.size(), 25 + 1 + 97);
        assert!(!b.is_set(28));
        assert!(b.is_set(125));
        let mut prev = -1i64;
        for e in b.entries() {
            assert!((e.block as i64) > prev);
            prev = e.block as i64;
        }
    }

    #[test]
    fn shrink_to_fit_removes_zero_entries() {
        let mut b = BitsetSparse::new(200);
        b.set(10);
        b.set(70);
        b.clear(10);
        assert_eq!(b.entries().len(), 2);
        b.shrink_to_fit();
        assert_eq!(b.entries().len(), 1);
    }

    #[test]
    fn merges_match_pointwise_semantics() {
        let mut a = BitsetSparse::new(300);
        let mut b = BitsetSparse::new(300);
        for p in [1, 70, 130, 200] {
            a.set(p);
        }
        for p in [70, 71, 130, 250] {
            b.set(p);
        }
        let r_and = and(&a, &b);
        let r_or = or(&a, &b);
        let r_xor = xor(&a, &b);
        let r_erase = erase(&a, &b);
        for p in 0..300 {
            assert_eq!(r_and.is_set(p), a.is_set(p) && b.is_set(p));
            assert_eq!(r_or.is_set(p), a.is_set(p) || b.is_set(p));
            assert_eq!(r_xor.is_set(p), a.is_set(p) != b.is_set(p));
            assert_eq!(r_erase.is_set(p), a.is_set(p) && !b.is_set(p));
        }
    }

    #[test]
    fn scan_sequence_matches_to_vector() {
        let mut b = BitsetSparse::new(500);
        for p in [3, 64, 65, 400] {
            b.set(p);
        }
        b.scan_init(ScanType::Forward);
        let mut out = Vec::new();
        loop {
            let v = b.next_bit();
            if v == NO_BIT {
                break;
            }
            out.push(v);
        }
        assert_eq!(out, vec![3, 64, 65, 400]);
    }

    #[test]
    fn destructive_scan_empties_bitset() {
        let mut b = BitsetSparse::new(500);
        for p in [3, 64, 65, 400] {
            b.set(p);
        }
        b.scan_init(ScanType::ForwardDestructive);
        while b.next_bit_del() != NO_BIT {}
        b.shrink_to_fit();
        assert!(b.is_empty());
    }

    #[test]
    fn block_restricted_merges_ignore_blocks_outside_range() {
        let mut a = BitsetSparse::new(300);
        let mut b = BitsetSparse::new(300);
        for p in [1, 70, 130, 200] {
            a.set(p);
        }
        for p in [1, 70, 71, 130, 250] {
            b.set(p);
        }
        // restrict to block 1 only (positions 64..127)
        let r_and = and_block(&a, &b, 1, 1);
        assert!(!r_and.is_set(1));
        assert!(r_and.is_set(70));
        assert!(!r_and.is_set(130));

        let r_or = or_block(&a, &b, 1, 1);
        assert!(!r_or.is_set(1));
        assert!(r_or.is_set(70));
        assert!(r_or.is_set(71));
        assert!(!r_or.is_set(200));

        let r_xor = xor_block(&a, &b, 1, 1);
        assert!(!r_xor.is_set(70));
        assert!(r_xor.is_set(71));
        assert!(!r_xor.is_set(200));

        let r_erase = erase_block(&a, &b, 1, 1);
        assert!(!r_erase.is_set(70));
        assert!(!r_erase.is_set(200));
    }

    #[test]
    fn scan_init_on_empty_signals_absent() {
        let mut b = BitsetSparse::new(100);
        assert_eq!(b.scan_init(ScanType::ForwardDestructive), NO_BIT);
    }
}
