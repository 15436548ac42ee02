//! Errors for the checked (caller-side) index APIs.
//!
//! The flatteners themselves never fail. These errors come from the
//! precondition checks a caller can run before handing a window to them.

use core::fmt;

/// Errors reported when an index buffer cannot take more entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// The buffer has fewer free slots than the window has set bits.
    CapacityExceeded {
        /// Total slots in the buffer
        capacity: usize,
        /// Slots that would be in use after the write
        required: usize,
    },
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::CapacityExceeded { capacity, required } => write!(
                f,
                "index buffer capacity exceeded: {} entries required, capacity is {}",
                required, capacity
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for IndexError {}
