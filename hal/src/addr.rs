//! # Address Types
//!
//! Type-safe addresses for the coprocessor's data address space.
//!
//! The coprocessor addresses its data RAM in 32-bit words, not bytes. All
//! descriptor addresses, constants-block bases and queue tail addresses that
//! cross the host/coprocessor boundary are word addresses in this space.

use core::fmt;
use core::ops::Add;

// =============================================================================
// Data Address
// =============================================================================

/// A word address in the coprocessor's data address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DataAddress(u32);

impl DataAddress {
    /// Create a data address from a raw word index
    #[inline]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Get the raw word index
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Address `words` words beyond this one
    #[inline]
    pub const fn offset(self, words: u32) -> Self {
        Self(self.0 + words)
    }
}

impl Add<u32> for DataAddress {
    type Output = DataAddress;

    #[inline]
    fn add(self, words: u32) -> DataAddress {
        self.offset(words)
    }
}

impl fmt::Display for DataAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}w", self.0)
    }
}

// =============================================================================
// Tests
// =============================================================================
