//! Bit flattening: turning per-window masks into index entries.
//!
//! Two encodings are provided:
//! - [`flatten_bits`]: absolute offsets, independent per window given its base
//! - [`flatten_bits_incremental`]: 1-based gaps, with a carry threaded across
//!   windows so empty windows fold into the next gap
//!
//! Both write into a caller-provided slice at `*cursor` and advance the
//! cursor. The slice must have room for `popcount(mask)` more entries;
//! running out is a bug in whoever sized the buffer and panics.

use crate::ctz::trailing_zeros_word;
use crate::scan::set_bits;

/// Number of input bytes covered by one mask.
pub const WINDOW_BITS: u32 = 64;

/// Offset of bit 0 of window `window_index` in the byte stream.
#[inline]
pub fn window_base(window_index: usize) -> u32 {
    (window_index as u32) * WINDOW_BITS
}

#[inline(always)]
fn debug_check_room(out: &[u32], cursor: usize, mask: u64) {
    debug_assert!(
        cursor + mask.count_ones() as usize <= out.len(),
        "index buffer too small: cursor {} + {} entries > capacity {}",
        cursor,
        mask.count_ones(),
        out.len()
    );
}

/// Append `base + bit` for every set bit of `mask`, in ascending order.
///
/// Does not read or write any cross-window state; windows may be flattened
/// in any order (or concurrently, into disjoint slices) as long as each gets
/// its own `base`.
///
/// # Panics
///
/// If `out` has fewer than `mask.count_ones()` slots left after `*cursor`.
///
/// # Example
///
/// ```
/// use bitflatten::flatten_bits;
///
/// let mut out = [0u32; 64];
/// let mut len = 0;
/// flatten_bits(&mut out, &mut len, 128, 0xf000_0000_0000_0000);
/// assert_eq!(&out[..len], &[188, 189, 190, 191]);
/// ```
#[inline]
pub fn flatten_bits(out: &mut [u32], cursor: &mut usize, base: u32, mask: u64) {
    debug_check_room(out, *cursor, mask);

    let mut len = *cursor;
    for pos in set_bits(mask) {
        out[len] = base + pos;
        len += 1;
    }
    *cursor = len;
}

/// Append the gap to every set bit of `mask`, continuing from `carry`.
///
/// A gap is the number of bit positions from the previous set bit
/// (exclusive) to the current one (inclusive). `carry` holds the zero bits
/// seen since the last emitted gap; it must start at 0 for a new stream and
/// be passed back unchanged on the next call. After the call it holds the
/// zero bits above the highest set bit of `mask` (64 for an empty mask, on
/// top of whatever it held before).
///
/// Prefix-summing the emitted gaps and subtracting 1 yields the absolute
/// positions [`flatten_bits`] would produce over the same stream.
///
/// # Panics
///
/// If `out` has fewer than `mask.count_ones()` slots left after `*cursor`.
///
/// # Example
///
/// ```
/// use bitflatten::flatten_bits_incremental;
///
/// let mut out = [0u32; 64];
/// let mut len = 0;
/// let mut carry = 0;
/// flatten_bits_incremental(&mut out, &mut len, 0x11, &mut carry);
/// assert_eq!(&out[..len], &[1, 4]);
/// assert_eq!(carry, 59);
/// ```
#[inline]
pub fn flatten_bits_incremental(out: &mut [u32], cursor: &mut usize, mask: u64, carry: &mut u32) {
    debug_check_room(out, *cursor, mask);

    let mut remaining = mask;
    let mut shifted = 0u32;
    let mut len = *cursor;
    loop {
        let zeros = trailing_zeros_word(remaining);
        if zeros == 64 {
            *carry += WINDOW_BITS - shifted;
            break;
        }
        let step = zeros + 1;
        out[len] = step + *carry;
        len += 1;
        *carry = 0;
        remaining = (remaining >> zeros) >> 1;
        shifted += step;
    }
    *cursor = len;
}

/// Absolute-flatten a run of consecutive windows, the first of which is
/// window `first_window` of the stream.
///
/// This is the unit of work for partitioned flattening: each partition gets
/// its own output slice and its own starting window index.
pub fn flatten_windows(out: &mut [u32], cursor: &mut usize, first_window: usize, masks: &[u64]) {
    let mut base = window_base(first_window);
    for &mask in masks {
        flatten_bits(out, cursor, base, mask);
        base += WINDOW_BITS;
    }
}

/// Gap-flatten a run of consecutive windows, threading `carry` through.
pub fn flatten_windows_incremental(
    out: &mut [u32],
    cursor: &mut usize,
    masks: &[u64],
    carry: &mut u32,
) {
    for &mask in masks {
        flatten_bits_incremental(out, cursor, mask, carry);
    }
}
