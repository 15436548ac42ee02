//! # Bitflatten
//!
//! Structural index extraction for SIMD tokenizers.
//!
//! A classifier stage turns each 64-byte window of input into a `u64` mask
//! whose set bits mark bytes of interest. This crate turns those masks into
//! a sequence of `u32` values a tape builder can consume, in one of two
//! encodings:
//!
//! - **Absolute**: every set bit becomes `window_index * 64 + bit`.
//! - **Gap**: every set bit becomes the 1-based distance from the previous
//!   set bit, with a carry threaded across windows so that runs of empty
//!   windows fold into the next gap.
//!
//! ## Quick Start
//!
//! ```
//! use bitflatten::{flatten_bits, flatten_bits_incremental, window_base};
//!
//! let mut out = [0u32; 128];
//! let mut len = 0;
//! flatten_bits(&mut out, &mut len, window_base(1), 0x11);
//! assert_eq!(&out[..len], &[64, 68]);
//!
//! let mut gaps = [0u32; 128];
//! let mut len = 0;
//! let mut carry = 0;
//! for mask in [0x1, 0x0, 0x8000_0000_0000_0000] {
//!     flatten_bits_incremental(&mut gaps, &mut len, mask, &mut carry);
//! }
//! assert_eq!(&gaps[..len], &[1, 191]);
//! ```
//!
//! ## Features
//!
//! Trailing-zero strategies (for benchmarking and odd targets):
//! - Default: Uses Rust's `trailing_zeros()` which lowers to `tzcnt`/`rbit+clz`
//! - `portable-ctz` - Use a De Bruijn multiply-and-lookup (no intrinsics)
//!
//! Other features:
//! - `std` - Implement `std::error::Error` for [`IndexError`]
//! - `serde` - Enable serialization/deserialization support

// Use no_std unless std feature is enabled or we're in test mode
#![cfg_attr(not(any(test, feature = "std")), no_std)]

// When using no_std, we need to explicitly link the alloc crate
#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

// When using std, re-export alloc types from std for compatibility
#[cfg(any(test, feature = "std"))]
extern crate std as alloc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod buffer;
mod ctz;
pub mod decode;
mod error;
mod flatten;
mod indexer;
mod scan;

pub use buffer::IndexBuffer;
pub use ctz::{trailing_zeros_debruijn, trailing_zeros_word};
pub use decode::{gaps_to_positions, positions_to_gaps, GapPositions};
pub use error::IndexError;
pub use flatten::{
    flatten_bits, flatten_bits_incremental, flatten_windows, flatten_windows_incremental,
    window_base, WINDOW_BITS,
};
pub use indexer::{Indexer, StructuralIndex};
pub use scan::{set_bits, word_from_positions, SetBits};

/// How the values of an index are to be read.
///
/// The flatteners do not tag their output; the consumer has to know which
/// convention a sequence follows. [`Indexer`] and [`StructuralIndex`] carry
/// it alongside the entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Encoding {
    /// Stream-relative byte offsets, strictly increasing.
    #[default]
    Absolute,
    /// 1-based distances from the previous set bit (or stream start).
    Gap,
}

/// Configuration for building structural indices.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Output encoding (default: absolute offsets)
    pub encoding: Encoding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            encoding: Encoding::Absolute,
        }
    }
}
