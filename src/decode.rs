//! Conversion between gap-encoded and absolute index entries.
//!
//! A gap sequence reconstructs absolute positions by prefix sum: the k-th
//! position is the sum of the first k gaps, minus one (gaps are 1-based).
//! That is the only contract the gap encoding carries.

#[cfg(not(test))]
use alloc::vec::Vec;

use core::iter::{Copied, FusedIterator};
use core::slice;

/// Iterator adaptor yielding absolute positions from a gap sequence.
#[derive(Clone, Debug)]
pub struct GapPositions<I> {
    gaps: I,
    // Position just past the previous set bit
    next_start: u32,
}

impl<I> GapPositions<I>
where
    I: Iterator<Item = u32>,
{
    /// Wrap an iterator of gaps.
    pub fn new<G>(gaps: G) -> Self
    where
        G: IntoIterator<IntoIter = I>,
    {
        Self {
            gaps: gaps.into_iter(),
            next_start: 0,
        }
    }
}

impl<I> Iterator for GapPositions<I>
where
    I: Iterator<Item = u32>,
{
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32> {
        let gap = self.gaps.next()?;
        debug_assert!(gap > 0, "gaps are 1-based and never zero");
        self.next_start += gap;
        Some(self.next_start - 1)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.gaps.size_hint()
    }
}

impl<I> ExactSizeIterator for GapPositions<I> where I: ExactSizeIterator<Item = u32> {}

impl<I> FusedIterator for GapPositions<I> where I: FusedIterator<Item = u32> {}

/// Reconstruct absolute positions from a slice of gaps.
///
/// # Example
///
/// ```
/// use bitflatten::gaps_to_positions;
///
/// let positions: Vec<u32> = gaps_to_positions(&[1, 191]).collect();
/// assert_eq!(positions, vec![0, 191]);
/// ```
#[inline]
pub fn gaps_to_positions(gaps: &[u32]) -> GapPositions<Copied<slice::Iter<'_, u32>>> {
    GapPositions::new(gaps.iter().copied())
}

/// Gap-encode a strictly increasing sequence of absolute positions.
///
/// The inverse of [`gaps_to_positions`].
pub fn positions_to_gaps(positions: &[u32]) -> Vec<u32> {
    let mut gaps = Vec::with_capacity(positions.len());
    let mut next_start = 0u32;
    for &pos in positions {
        debug_assert!(pos >= next_start, "positions must be strictly increasing");
        gaps.push(pos + 1 - next_start);
        next_start = pos + 1;
    }
    gaps
}
