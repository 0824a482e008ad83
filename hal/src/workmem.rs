//! # Work Memory
//!
//! Views onto the coprocessor-addressable data RAM that job descriptors and
//! constants blocks live in.
//!
//! The host writes descriptors through a [`WorkMemory`] view; the coprocessor
//! reads them by [`DataAddress`]. Out-of-range access is a contract
//! violation, not a recoverable error.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use spin::Mutex;

use crate::addr::DataAddress;

// =============================================================================
// Work Memory Trait
// =============================================================================

/// Word-granular access to coprocessor data RAM
pub trait WorkMemory: Send + Sync {
    /// Read the word at `addr`
    fn read_word(&self, addr: DataAddress) -> u32;

    /// Write the word at `addr`
    fn write_word(&self, addr: DataAddress, value: u32);
}

// =============================================================================
// Mapped View
// =============================================================================

/// Volatile view over a host mapping of the coprocessor data RAM.
///
/// Covers `words` words starting at coprocessor address `origin`.
pub struct MappedGram {
    base: *mut u32,
    origin: DataAddress,
    words: usize,
}

impl MappedGram {
    /// Create a view over a host mapping.
    ///
    /// # Safety
    ///
    /// `base` must point at a mapping of at least `words` words of
    /// coprocessor data RAM, valid for the lifetime of the view, and host
    /// word `i` must alias coprocessor word `origin + i`.
    pub const unsafe fn new(base: *mut u32, origin: DataAddress, words: usize) -> Self {
        Self { base, origin, words }
    }

    fn host_ptr(&self, addr: DataAddress) -> *mut u32 {
        let offset = addr.raw().checked_sub(self.origin.raw());
        let offset = match offset {
            Some(o) if (o as usize) < self.words => o as usize,
            _ => panic!("work memory access out of range: {addr}"),
        };
        unsafe { self.base.add(offset) }
    }
}

// The mapping is device memory; volatile word access needs no host-side
// synchronization.
unsafe impl Send for MappedGram {}
unsafe impl Sync for MappedGram {}

impl WorkMemory for MappedGram {
    fn read_word(&self, addr: DataAddress) -> u32 {
        unsafe { core::ptr::read_volatile(self.host_ptr(addr)) }
    }

    fn write_word(&self, addr: DataAddress, value: u32) {
        unsafe { core::ptr::write_volatile(self.host_ptr(addr), value) }
    }
}

impl fmt::Debug for MappedGram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappedGram")
            .field("origin", &self.origin)
            .field("words", &self.words)
            .finish()
    }
}

// =============================================================================
// Buffer-Backed View
// =============================================================================

/// Buffer-backed work memory for bring-up rigs and tests.
pub struct BufferGram {
    origin: DataAddress,
    words: Mutex<Vec<u32>>,
}

impl BufferGram {
    /// Create a zeroed buffer covering `words` words at `origin`
    pub fn new(origin: DataAddress, words: usize) -> Self {
        Self {
            origin,
            words: Mutex::new(vec![0; words]),
        }
    }

    fn index(&self, addr: DataAddress) -> usize {
        let offset = addr.raw().checked_sub(self.origin.raw());
        match offset {
            Some(o) if (o as usize) < self.words.lock().len() => o as usize,
            _ => panic!("work memory access out of range: {addr}"),
        }
    }
}

impl WorkMemory for BufferGram {
    fn read_word(&self, addr: DataAddress) -> u32 {
        let index = self.index(addr);
        self.words.lock()[index]
    }

    fn write_word(&self, addr: DataAddress, value: u32) {
        let index = self.index(addr);
        self.words.lock()[index] = value;
    }
}

impl fmt::Debug for BufferGram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferGram")
            .field("origin", &self.origin)
            .field("words", &self.words.lock().len())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_read_write() {
        let mem = BufferGram::new(DataAddress::new(0x100), 16);
        let addr = DataAddress::new(0x104);
        mem.write_word(addr, 0x1234_5678);
        assert_eq!(mem.read_word(addr), 0x1234_5678);
        assert_eq!(mem.read_word(DataAddress::new(0x100)), 0);
    }

    #[test]
    fn test_buffer_overwrite() {
        let mem = BufferGram::new(DataAddress::new(0), 4);
        let addr = DataAddress::new(2);
        mem.write_word(addr, 1);
        mem.write_word(addr, 2);
        assert_eq!(mem.read_word(addr), 2);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_buffer_below_origin_panics() {
        let mem = BufferGram::new(DataAddress::new(0x100), 16);
        mem.read_word(DataAddress::new(0xFF));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_buffer_past_end_panics() {
        let mem = BufferGram::new(DataAddress::new(0x100), 16);
        mem.write_word(DataAddress::new(0x110), 0);
    }

    #[test]
    fn test_mapped_view_aliases_host_words() {
        let mut backing = [0u32; 8];
        let mem = unsafe { MappedGram::new(backing.as_mut_ptr(), DataAddress::new(0x40), 8) };
        mem.write_word(DataAddress::new(0x43), 0xA5A5_A5A5);
        assert_eq!(mem.read_word(DataAddress::new(0x43)), 0xA5A5_A5A5);
        drop(mem);
        assert_eq!(backing[3], 0xA5A5_A5A5);
    }
}
