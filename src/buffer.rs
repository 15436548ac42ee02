//! Fixed-capacity output buffer for index entries.

#[cfg(not(test))]
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::IndexError;
use crate::flatten::{flatten_bits, flatten_bits_incremental, WINDOW_BITS};

/// Append-only `u32` buffer with a write cursor.
///
/// All slots are allocated up front so the scanning loop never reallocates.
/// Size it for the worst case: one entry per input byte
/// ([`IndexBuffer::for_input_len`] does this).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "IndexBufferRepr", into = "IndexBufferRepr")
)]
pub struct IndexBuffer {
    slots: Vec<u32>,
    len: usize,
}

impl IndexBuffer {
    /// Create a buffer with room for exactly `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize(capacity, 0);
        Self { slots, len: 0 }
    }

    /// Create a buffer large enough for any mask stream over `input_len`
    /// bytes, rounded up to whole windows.
    pub fn for_input_len(input_len: usize) -> Self {
        let window = WINDOW_BITS as usize;
        Self::with_capacity(input_len.div_ceil(window) * window)
    }

    /// Number of entries written.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if no entries have been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slots still free.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.slots.len() - self.len
    }

    /// The entries written so far.
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.slots[..self.len]
    }

    /// Reset the cursor so the buffer can be reused for another stream.
    ///
    /// Stale slot contents are left in place; they are overwritten before
    /// they become visible again.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Verify that flattening `mask` will fit.
    pub fn check_window(&self, mask: u64) -> Result<(), IndexError> {
        let required = self.len + mask.count_ones() as usize;
        if required > self.capacity() {
            return Err(IndexError::CapacityExceeded {
                capacity: self.capacity(),
                required,
            });
        }
        Ok(())
    }

    /// Append the absolute offsets of `mask`'s set bits, relative to `base`.
    ///
    /// See [`flatten_bits`]. Panics if the buffer is too small.
    #[inline]
    pub fn push_window(&mut self, base: u32, mask: u64) {
        flatten_bits(&mut self.slots, &mut self.len, base, mask);
    }

    /// Append the gaps of `mask`'s set bits, continuing from `carry`.
    ///
    /// See [`flatten_bits_incremental`]. Panics if the buffer is too small.
    #[inline]
    pub fn push_window_incremental(&mut self, mask: u64, carry: &mut u32) {
        flatten_bits_incremental(&mut self.slots, &mut self.len, mask, carry);
    }

    /// Consume the buffer, returning only the written entries.
    pub fn into_vec(mut self) -> Vec<u32> {
        self.slots.truncate(self.len);
        self.slots
    }
}

impl PartialEq for IndexBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.capacity() == other.capacity() && self.as_slice() == other.as_slice()
    }
}

impl Eq for IndexBuffer {}

impl AsRef<[u32]> for IndexBuffer {
    fn as_ref(&self) -> &[u32] {
        self.as_slice()
    }
}

/// Wire form: unwritten slots are not serialized.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct IndexBufferRepr {
    capacity: usize,
    entries: Vec<u32>,
}

#[cfg(feature = "serde")]
impl From<IndexBuffer> for IndexBufferRepr {
    fn from(buffer: IndexBuffer) -> Self {
        let capacity = buffer.capacity();
        Self {
            capacity,
            entries: buffer.into_vec(),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<IndexBufferRepr> for IndexBuffer {
    type Error = IndexError;

    fn try_from(repr: IndexBufferRepr) -> Result<Self, Self::Error> {
        let len = repr.entries.len();
        if len > repr.capacity {
            return Err(IndexError::CapacityExceeded {
                capacity: repr.capacity,
                required: len,
            });
        }
        let mut slots = repr.entries;
        slots.resize(repr.capacity, 0);
        Ok(Self { slots, len })
    }
}
