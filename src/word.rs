/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! L0: word-level primitives shared by the dense and sparse bitsets.
//!
//! A [`Word`] is a 64-bit unsigned integer viewed as bit positions `0..64`
//! from the LSB. All mask tables are precomputed at compile time; there is
//! no process-wide global state (see spec §9, "Global state and timers").

/// Number of bits in a word.
pub const WORD_SIZE: u32 = 64;

/// Integer sentinel meaning "no bit found / end of scan". Kept as a raw
/// `i64` (rather than `Option<i64>`) because it is observable at the
/// public API boundary (spec §9, "Sentinel integer vs. optional").
pub const NO_BIT: i64 = -1;

/// Number of set bits in `w`.
#[inline(always)]
pub fn popcount(w: u64) -> u32 {
    w.count_ones()
}

/// Index of the lowest set bit of `w`. Undefined (returns 64) if `w == 0`;
/// callers must check for zero first, matching `_BitScanForward64`'s
/// contract in `bbintrinsic.h`.
#[inline(always)]
pub fn trailing_zero(w: u64) -> u32 {
    w.trailing_zeros()
}

/// Index of the highest set bit of `w`, i.e. `63 - leading_zeros(w)`.
/// Undefined if `w == 0`.
#[inline(always)]
pub fn leading_zero_complement(w: u64) -> u32 {
    63 - w.leading_zeros()
}

/// Bits `[0, k)` set. `mask_low(0) == 0`, `mask_low(64) == u64::MAX`.
#[inline(always)]
pub fn mask_low(k: u32) -> u64 {
    if k == 0 {
        0
    } else if k >= 64 {
        u64::MAX
    } else {
        (1u64 << k) - 1
    }
}

/// Bits `[k, 64)` set. `mask_high(64) == 0`.
#[inline(always)]
pub fn mask_high(k: u32) -> u64 {
    if k == 0 {
        u64::MAX
    } else if k >= 64 {
        0
    } else {
        !((1u64 << k) - 1)
    }
}

/// `1 << k` for `k` in `0..64`.
#[inline(always)]
pub fn mask_single(k: u32) -> u64 {
    debug_assert!(k < 64, "mask_single: k={k} out of range");
    1u64 << k
}

/// Block index of global bit position `p` (`p / 64`).
#[inline(always)]
pub fn block_of(p: u32) -> u32 {
    p / WORD_SIZE
}

/// In-block position of global bit position `p` (`p % 64`).
#[inline(always)]
pub fn offset_of(p: u32) -> u32 {
    p % WORD_SIZE
}

/// Number of 64-bit blocks needed to hold `n` bits (`ceil(n / 64)`).
#[inline(always)]
pub fn blocks_needed(n: usize) -> usize {
    n.div_ceil(64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_low_edges() {
        assert_eq!(mask_low(0), 0);
        assert_eq!(mask_low(64), u64::MAX);
        assert_eq!(mask_low(1), 1);
        assert_eq!(mask_low(63), u64::MAX >> 1);
    }

    #[test]
    fn mask_high_edges() {
        assert_eq!(mask_high(0), u64::MAX);
        assert_eq!(mask_high(64), 0);
        assert_eq!(mask_high(63), 1u64 << 63);
    }

    #[test]
    fn mask_single_values() {
        assert_eq!(mask_single(0), 1);
        assert_eq!(mask_single(63), 1u64 << 63);
    }

    #[test]
    fn popcount_basic() {
        assert_eq!(popcount(0), 0);
        assert_eq!(popcount(u64::MAX), 64);
        assert_eq!(popcount(0b1011), 3);
    }

    #[test]
    fn scan_primitives() {
        assert_eq!(trailing_zero(0b1000), 3);
        assert_eq!(leading_zero_complement(0b1000), 3);
        assert_eq!(leading_zero_complement(1u64 << 63), 63);
    }

    #[test]
    fn block_and_offset() {
        assert_eq!(block_of(0), 0);
        assert_eq!(block_of(63), 0);
        assert_eq!(block_of(64), 1);
        assert_eq!(offset_of(64), 0);
        assert_eq!(offset_of(127), 63);
        assert_eq!(blocks_needed(0), 0);
        assert_eq!(blocks_needed(1), 1);
        assert_eq!(blocks_needed(64), 1);
        assert_eq!(blocks_needed(65), 2);
    }
}
