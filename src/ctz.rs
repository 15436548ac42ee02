//! Trailing-zero count implementations with compile-time switching.
//!
//! This module provides the count-trailing-zeros primitive the scanner and
//! both flatteners are built on. The strategy is selected via feature flags:
//!
//! - Default: Uses Rust's `trailing_zeros()` (`tzcnt` on x86_64 with BMI1,
//!   `rbit` + `clz` on aarch64)
//! - `portable-ctz`: Uses a De Bruijn multiply-and-lookup (no intrinsics)
//!
//! Both strategies return 64 for a zero word; the scan loops rely on that
//! as their termination condition.

/// De Bruijn sequence B(2, 6): every 6-bit window of the rotation is unique.
const DEBRUIJN64: u64 = 0x03f7_9d71_b4cb_0a89;

/// Maps the top 6 bits of `(1 << i) * DEBRUIJN64` back to `i`.
const DEBRUIJN_TABLE: [u8; 64] = build_debruijn_table();

const fn build_debruijn_table() -> [u8; 64] {
    let mut table = [0u8; 64];
    let mut i = 0;
    while i < 64 {
        let slot = ((1u64 << i).wrapping_mul(DEBRUIJN64) >> 58) as usize;
        table[slot] = i as u8;
        i += 1;
    }
    table
}

/// Count trailing zeros of a u64 word.
///
/// Returns 64 when `word == 0`.
#[inline(always)]
pub fn trailing_zeros_word(word: u64) -> u32 {
    #[cfg(feature = "portable-ctz")]
    {
        trailing_zeros_debruijn(word)
    }

    #[cfg(not(feature = "portable-ctz"))]
    {
        // Default: let Rust/LLVM choose the best instruction
        word.trailing_zeros()
    }
}

/// Portable trailing-zero count (no intrinsics).
///
/// Isolates the lowest set bit, multiplies it by a De Bruijn constant and
/// reads the bit index from a 64-entry table.
#[inline(always)]
pub fn trailing_zeros_debruijn(word: u64) -> u32 {
    if word == 0 {
        return 64;
    }
    let lowest = word & word.wrapping_neg();
    DEBRUIJN_TABLE[(lowest.wrapping_mul(DEBRUIJN64) >> 58) as usize] as u32
}
