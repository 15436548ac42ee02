//! Set-bit scanning over a single 64-bit word.

use core::iter::FusedIterator;

use crate::ctz::trailing_zeros_word;

/// Iterator over the set-bit positions of a word, in ascending order.
///
/// Each step counts the trailing zeros of the remaining word, reports the
/// cumulative shift plus that count, then shifts the consumed bits out.
/// No per-bit loop is involved: a word with `k` set bits takes `k + 1`
/// trailing-zero counts.
#[derive(Clone, Debug)]
pub struct SetBits {
    remaining: u64,
    shift: u32,
}

/// Scan the set bits of `word`.
///
/// # Example
///
/// ```
/// use bitflatten::set_bits;
///
/// let positions: Vec<u32> = set_bits(0x11).collect();
/// assert_eq!(positions, vec![0, 4]);
/// ```
#[inline]
pub fn set_bits(word: u64) -> SetBits {
    SetBits {
        remaining: word,
        shift: 0,
    }
}

impl Iterator for SetBits {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32> {
        let zeros = trailing_zeros_word(self.remaining);
        if zeros == 64 {
            return None;
        }
        let pos = self.shift + zeros;
        // Two shifts: `zeros + 1` may be 64, which `>>` does not accept.
        self.remaining = (self.remaining >> zeros) >> 1;
        self.shift = pos + 1;
        Some(pos)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for SetBits {}

impl FusedIterator for SetBits {}

/// Build a word with exactly the given bits set.
///
/// Positions outside `0..64` are ignored.
pub fn word_from_positions<I>(positions: I) -> u64
where
    I: IntoIterator<Item = u32>,
{
    positions
        .into_iter()
        .filter(|&p| p < 64)
        .fold(0u64, |word, p| word | (1u64 << p))
}
