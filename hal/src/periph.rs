//! # Peripheral Register Map
//!
//! Register-region constants and volatile MMIO access for the queue manager
//! and the coprocessor control block.
//!
//! Register offsets below are byte offsets within the peripheral region; the
//! coprocessor-visible addresses derived from them (queue tail addresses,
//! [`NULL_QUEUE_TAIL`]) are word addresses, matching what coprocessor-side
//! code expects to find in descriptor word 4.

use core::sync::atomic::{AtomicUsize, Ordering};

use bitflags::bitflags;
use static_assertions::const_assert;

// =============================================================================
// Register Regions
// =============================================================================

/// Base of the peripheral register region, as the coprocessor sees it
pub const REG_REGION_BASE: u32 = 0x0480_0000;

/// Base of the queue-manager register block
pub const QM_REGION_BASE: u32 = 0x0488_0000;

/// Byte offset of the first queue build (post-to-tail) register
pub const QM_BUILD_0: u32 = 0x0000;

/// Byte offset of the first queue head (pop) register
pub const QM_HEAD_0: u32 = 0x1000;

/// Byte offset of the first queue fill-count register
pub const QM_COUNT_0: u32 = 0x2000;

/// Base of the coprocessor control register block
pub const COPRO_REGION_BASE: u32 = 0x0484_0000;

/// Byte offset of the coprocessor wait/interrupt source register
pub const COPRO_WAIT_SOURCE: u32 = 0x0040;

/// Tail word address of the system null queue.
///
/// Posts to this address are accepted and discarded by the queue manager.
/// Descriptors whose next-action is "discard" carry this in word 4, bypassing
/// logical queue resolution entirely.
pub const NULL_QUEUE_TAIL: u32 = (QM_REGION_BASE - REG_REGION_BASE + QM_BUILD_0) >> 2;

const_assert!(QM_REGION_BASE > REG_REGION_BASE);
const_assert!(COPRO_REGION_BASE > REG_REGION_BASE);

// =============================================================================
// Wait Source Register
// =============================================================================

bitflags! {
    /// Fields of the coprocessor wait/interrupt source register
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct WaitSource: u32 {
        /// Wake on queue-manager event
        const QUEUE_EVENT = 1 << 0;
        /// Wake on external interrupt line
        const EXT_IRQ = 1 << 1;
        /// Legacy wait mode (pre-queue-fabric parts)
        const LEGACY_WAIT = 1 << 4;
    }
}

// =============================================================================
// MMIO Access
// =============================================================================

/// Host virtual address mapping the peripheral region. Zero until set.
static PERIPH_BASE: AtomicUsize = AtomicUsize::new(0);

/// Set the host mapping of the peripheral register region.
///
/// # Safety
///
/// `base` must be a valid, device-mapped host address covering the whole
/// peripheral region, and must remain valid for the program's lifetime.
#[inline]
pub unsafe fn set_periph_base(base: *mut u32) {
    PERIPH_BASE.store(base as usize, Ordering::SeqCst);
}

#[inline]
fn periph_base() -> usize {
    let base = PERIPH_BASE.load(Ordering::Relaxed);
    assert!(base != 0, "peripheral base not set");
    base
}

/// Read a peripheral register at a byte offset from the region base
#[inline]
pub fn read_reg(byte_offset: u32) -> u32 {
    let addr = periph_base() + byte_offset as usize;
    unsafe { core::ptr::read_volatile(addr as *const u32) }
}

/// Write a peripheral register at a byte offset from the region base
#[inline]
pub fn write_reg(byte_offset: u32, value: u32) {
    let addr = periph_base() + byte_offset as usize;
    unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
}

// =============================================================================
// Wait Source Control
// =============================================================================

/// Switch the coprocessor out of legacy wait mode.
///
/// One-time bring-up step on platform variants whose coprocessor defaults to
/// the legacy wait source. After this the coprocessor wakes on queue-manager
/// events, which job chaining depends on.
pub fn select_queue_wait_source() {
    let offset = COPRO_REGION_BASE - REG_REGION_BASE + COPRO_WAIT_SOURCE;
    let mut reg = WaitSource::from_bits_retain(read_reg(offset));
    reg.remove(WaitSource::LEGACY_WAIT);
    write_reg(offset, reg.bits());
    log::debug!("coprocessor wait source switched to queue events");
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_queue_tail_is_word_address_of_build_0() {
        assert_eq!(NULL_QUEUE_TAIL, (QM_REGION_BASE - REG_REGION_BASE) >> 2);
    }

    #[test]
    fn test_wait_source_legacy_clear() {
        let mut reg = WaitSource::QUEUE_EVENT | WaitSource::LEGACY_WAIT;
        reg.remove(WaitSource::LEGACY_WAIT);
        assert_eq!(reg, WaitSource::QUEUE_EVENT);
    }

    #[test]
    #[should_panic(expected = "peripheral base not set")]
    fn test_read_without_base_panics() {
        super::read_reg(0);
    }
}
