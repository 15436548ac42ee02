//! Sequential driver that flattens one stream of masks into an index.
//!
//! [`Indexer`] owns the per-stream state the free functions leave to the
//! caller: the output buffer, the window counter used for absolute bases,
//! and the carry used for gaps. Windows must be pushed in stream order.

#[cfg(not(test))]
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::buffer::IndexBuffer;
use crate::decode::gaps_to_positions;
use crate::error::IndexError;
use crate::flatten::{window_base, WINDOW_BITS};
use crate::{Config, Encoding};

/// Incremental builder for a [`StructuralIndex`].
///
/// # Example
///
/// ```
/// use bitflatten::{Encoding, Indexer};
///
/// let mut indexer = Indexer::new(Encoding::Gap, 192);
/// indexer.push_all(&[0x1, 0x0, 0x8000_0000_0000_0000]).unwrap();
/// let index = indexer.finish();
/// assert_eq!(index.entries(), &[1, 191]);
/// assert_eq!(index.positions(), vec![0, 191]);
/// ```
#[derive(Clone, Debug)]
pub struct Indexer {
    buffer: IndexBuffer,
    encoding: Encoding,
    windows: usize,
    carry: u32,
}

impl Indexer {
    /// Create an indexer sized for `input_len` bytes of input.
    pub fn new(encoding: Encoding, input_len: usize) -> Self {
        Self::with_buffer(IndexBuffer::for_input_len(input_len), encoding)
    }

    /// Create an indexer from a [`Config`].
    pub fn with_config(config: &Config, input_len: usize) -> Self {
        Self::new(config.encoding, input_len)
    }

    /// Create an indexer that writes into an existing buffer.
    ///
    /// The buffer is cleared first.
    pub fn with_buffer(mut buffer: IndexBuffer, encoding: Encoding) -> Self {
        buffer.clear();
        Self {
            buffer,
            encoding,
            windows: 0,
            carry: 0,
        }
    }

    /// Encoding of the entries being produced.
    #[inline]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Number of windows pushed so far.
    #[inline]
    pub fn windows(&self) -> usize {
        self.windows
    }

    /// Zero bits pending since the last gap (always 0 in absolute mode).
    #[inline]
    pub fn carry(&self) -> u32 {
        self.carry
    }

    /// Entries written so far.
    #[inline]
    pub fn buffer(&self) -> &IndexBuffer {
        &self.buffer
    }

    /// Flatten the next window of the stream.
    ///
    /// Fails without writing anything if the buffer cannot take every set
    /// bit of `mask`; the window counter and carry are left unchanged so the
    /// stream can be resumed with a larger buffer.
    pub fn push(&mut self, mask: u64) -> Result<(), IndexError> {
        if let Err(err) = self.buffer.check_window(mask) {
            log::warn!("window {} rejected: {}", self.windows, err);
            return Err(err);
        }
        match self.encoding {
            Encoding::Absolute => self.buffer.push_window(window_base(self.windows), mask),
            Encoding::Gap => self.buffer.push_window_incremental(mask, &mut self.carry),
        }
        self.windows += 1;
        Ok(())
    }

    /// Flatten a run of consecutive windows.
    ///
    /// Stops at the first window that does not fit.
    pub fn push_all(&mut self, masks: &[u64]) -> Result<(), IndexError> {
        for &mask in masks {
            self.push(mask)?;
        }
        Ok(())
    }

    /// Start a new stream, reusing the buffer.
    pub fn reset(&mut self) {
        log::trace!(
            "resetting indexer after {} windows, {} entries",
            self.windows,
            self.buffer.len()
        );
        self.buffer.clear();
        self.windows = 0;
        self.carry = 0;
    }

    /// Finish the stream.
    pub fn finish(self) -> StructuralIndex {
        let entries = self.buffer.into_vec();
        let scanned = self.windows as u32 * WINDOW_BITS;
        let trailing_zeros = match self.encoding {
            Encoding::Gap => self.carry,
            Encoding::Absolute => match entries.last() {
                Some(&last) => scanned - last - 1,
                None => scanned,
            },
        };
        log::debug!(
            "flattened {} windows into {} {:?} entries",
            self.windows,
            entries.len(),
            self.encoding
        );
        StructuralIndex {
            entries,
            encoding: self.encoding,
            windows: self.windows,
            trailing_zeros,
        }
    }
}

/// Finished index of one stream.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StructuralIndex {
    entries: Vec<u32>,
    encoding: Encoding,
    windows: usize,
    trailing_zeros: u32,
}

impl StructuralIndex {
    /// Raw entries, to be read according to [`encoding`](Self::encoding).
    #[inline]
    pub fn entries(&self) -> &[u32] {
        &self.entries
    }

    /// How [`entries`](Self::entries) are encoded.
    #[inline]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Number of entries (one per set bit in the stream).
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the stream had no set bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of windows the stream covered.
    #[inline]
    pub fn windows(&self) -> usize {
        self.windows
    }

    /// Zero bits after the last set bit (the whole stream if empty).
    #[inline]
    pub fn trailing_zeros(&self) -> u32 {
        self.trailing_zeros
    }

    /// Absolute positions of every set bit, whatever the encoding.
    pub fn positions(&self) -> Vec<u32> {
        match self.encoding {
            Encoding::Absolute => self.entries.clone(),
            Encoding::Gap => gaps_to_positions(&self.entries).collect(),
        }
    }

    /// Consume the index, returning the raw entries.
    pub fn into_entries(self) -> Vec<u32> {
        self.entries
    }
}
