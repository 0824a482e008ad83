//! # Job Arena
//!
//! A fixed set of descriptor slots over a contiguous region of work memory,
//! with the host/hardware ownership handoff made explicit as slot indices.
//!
//! A slot index held by the host may be built and started; once its chain is
//! started the index is conceptually in flight, and must only be released
//! back after completion (or discard) has been independently observed.
//! Releasing is the host's acknowledgement that hardware can no longer reach
//! the slot. The arena polices double-release and range, nothing more.

use alloc::collections::VecDeque;
use core::fmt;

use spin::Mutex;
use weft_hal::DataAddress;

use crate::descriptor::JOB_WORDS;

// =============================================================================
// Slot Index
// =============================================================================

/// Handle to one descriptor slot within a [`JobArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotIndex(u16);

impl SlotIndex {
    /// Raw slot number
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot{}", self.0)
    }
}

// =============================================================================
// Job Arena
// =============================================================================

/// Fixed-capacity descriptor arena.
///
/// Slot `i` covers [`JOB_WORDS`] words starting at `base + i * JOB_WORDS`.
/// The free list is FIFO, so slots recycle round-robin over the working set
/// the way the original harnesses reuse their job blocks.
pub struct JobArena {
    base: DataAddress,
    slot_count: usize,
    free: Mutex<VecDeque<u16>>,
}

impl JobArena {
    /// Create an arena of `slot_count` slots at `base`
    pub fn new(base: DataAddress, slot_count: usize) -> Self {
        assert!(slot_count > 0 && slot_count <= u16::MAX as usize);
        Self {
            base,
            slot_count,
            free: Mutex::new((0..slot_count as u16).collect()),
        }
    }

    /// Number of slots in the arena
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Descriptor address of a slot
    pub fn address(&self, slot: SlotIndex) -> DataAddress {
        assert!(slot.index() < self.slot_count, "{slot} out of range");
        self.base.offset(slot.index() as u32 * JOB_WORDS)
    }

    /// Take ownership of a free slot, `None` when the working set is
    /// exhausted
    pub fn acquire(&self) -> Option<SlotIndex> {
        self.free.lock().pop_front().map(SlotIndex)
    }

    /// Return a slot to the free list.
    ///
    /// Only valid once the host has observed that no in-flight chain can
    /// still reach the slot. Double-release is a contract violation.
    pub fn release(&self, slot: SlotIndex) {
        assert!(slot.index() < self.slot_count, "{slot} out of range");
        let mut free = self.free.lock();
        assert!(!free.contains(&(slot.index() as u16)), "{slot} released twice");
        free.push_back(slot.index() as u16);
    }
}

impl fmt::Debug for JobArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobArena")
            .field("base", &self.base)
            .field("slot_count", &self.slot_count)
            .field("free", &self.free.lock().len())
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
    fn test_slot_addresses_stride_by_job_words() {
        let arena = JobArena::new(DataAddress::new(0x400), 3);
        let a = arena.acquire().unwrap();
        let b = arena.acquire().unwrap();
        assert_eq!(arena.address(a).raw(), 0x400);
        assert_eq!(arena.address(b).raw(), 0x400 + JOB_WORDS);
    }

    #[test]
    fn test_exhaustion_and_reuse() {
        let arena = JobArena::new(DataAddress::new(0), 2);
        let a = arena.acquire().unwrap();
        let b = arena.acquire().unwrap();
        assert_eq!(arena.acquire(), None);

        arena.release(a);
        let c = arena.acquire().unwrap();
        assert_eq!(c, a);
        assert_eq!(arena.acquire(), None);
        arena.release(b);
        arena.release(c);
    }

    #[test]
    fn test_free_list_is_round_robin() {
        let arena = JobArena::new(DataAddress::new(0), 3);
        let a = arena.acquire().unwrap();
        arena.release(a);
        // The released slot goes to the back, not the front.
        assert_ne!(arena.acquire().unwrap(), a);
    }

    #[test]
    #[should_panic(expected = "released twice")]
    fn test_double_release_panics() {
        let arena = JobArena::new(DataAddress::new(0), 2);
        let a = arena.acquire().unwrap();
        arena.release(a);
        arena.release(a);
    }
}
