//! # Queue Fabric
//!
//! Access to the hardware FIFO subsystem.
//!
//! Queues are identified by small integer IDs. Each queue has a tail
//! (build) register that values are posted into and a head register they are
//! popped from; the *word address* of the tail register is what a job
//! descriptor carries in word 4, so the coprocessor can post a completion
//! value without host involvement.
//!
//! Two backends are provided: [`MmioFabric`] drives the real queue-manager
//! registers, and [`SoftFabric`] is a software model used by bring-up rigs
//! and the test suite.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};

use spin::Mutex;

use crate::periph::{
    self, NULL_QUEUE_TAIL, QM_BUILD_0, QM_COUNT_0, QM_HEAD_0, QM_REGION_BASE, REG_REGION_BASE,
};

/// Region-relative byte offset of a per-queue register
#[inline]
const fn qm_reg(block: u32, queue: QueueId) -> u32 {
    QM_REGION_BASE - REG_REGION_BASE + block + 4 * queue.index() as u32
}

// =============================================================================
// Queue ID
// =============================================================================

/// Identifier of one hardware queue within the fabric
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueueId(u16);

impl QueueId {
    /// Create a queue ID from a raw queue number
    #[inline]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw queue number
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QueueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

// =============================================================================
// Queue Fabric Trait
// =============================================================================

/// Post/pop access to the hardware queue fabric.
///
/// All operations are non-blocking. FIFO order per queue is a hardware
/// guarantee; nothing here adds cross-queue ordering.
pub trait QueueFabric: Send + Sync {
    /// Post a value to the tail of a queue.
    ///
    /// Queue-full conditions are outside this layer's contract.
    fn post(&self, queue: QueueId, value: u32);

    /// Pop a value from the head of a queue, `None` when empty
    fn pop(&self, queue: QueueId) -> Option<u32>;

    /// Coprocessor-space word address of the queue's tail register.
    ///
    /// This is the value written into descriptor word 4.
    fn tail_address(&self, queue: QueueId) -> u32;
}

// =============================================================================
// MMIO Backend
// =============================================================================

/// Thin register driver over the real queue manager.
///
/// Requires [`periph::set_periph_base`] to have been called.
#[derive(Debug)]
pub struct MmioFabric;

impl MmioFabric {
    /// Create the MMIO-backed fabric
    pub const fn new() -> Self {
        Self
    }
}

impl QueueFabric for MmioFabric {
    fn post(&self, queue: QueueId, value: u32) {
        periph::write_reg(qm_reg(QM_BUILD_0, queue), value);
    }

    fn pop(&self, queue: QueueId) -> Option<u32> {
        let count = periph::read_reg(qm_reg(QM_COUNT_0, queue));
        if count == 0 {
            return None;
        }
        Some(periph::read_reg(qm_reg(QM_HEAD_0, queue)))
    }

    fn tail_address(&self, queue: QueueId) -> u32 {
        // Queue 0's build register doubles as the system null queue.
        NULL_QUEUE_TAIL + queue.index() as u32
    }
}

// =============================================================================
// Software Backend
// =============================================================================

/// Word-address base of the synthetic tail register block used by
/// [`SoftFabric`]. Distinct from the real queue-manager region so a
/// misrouted post is caught rather than silently absorbed.
pub const SOFT_TAIL_BASE: u32 = 0x0100_0000;

/// Software model of the queue fabric.
///
/// FIFOs behind a spinlock, with synthetic tail addresses that can be mapped
/// back to queue IDs. Posts addressed at [`NULL_QUEUE_TAIL`] are counted and
/// discarded, mirroring the hardware null queue.
pub struct SoftFabric {
    queues: Mutex<Vec<VecDeque<u32>>>,
    discarded: AtomicUsize,
}

impl SoftFabric {
    /// Create a software fabric with `count` queues
    pub fn new(count: usize) -> Self {
        let mut queues = Vec::with_capacity(count);
        for _ in 0..count {
            queues.push(VecDeque::new());
        }
        Self {
            queues: Mutex::new(queues),
            discarded: AtomicUsize::new(0),
        }
    }

    /// Map a tail word address back to its queue
    pub fn queue_for_tail(&self, tail_addr: u32) -> Option<QueueId> {
        let count = self.queues.lock().len() as u32;
        if (SOFT_TAIL_BASE..SOFT_TAIL_BASE + count).contains(&tail_addr) {
            Some(QueueId::new((tail_addr - SOFT_TAIL_BASE) as u16))
        } else {
            None
        }
    }

    /// Post a value the way the coprocessor does: by tail address.
    ///
    /// Used by chain simulation to execute descriptor word 4.
    pub fn post_to_tail(&self, tail_addr: u32, value: u32) {
        if tail_addr == NULL_QUEUE_TAIL {
            self.discarded.fetch_add(1, Ordering::Relaxed);
            return;
        }
        match self.queue_for_tail(tail_addr) {
            Some(queue) => self.post(queue, value),
            None => panic!("post to unmapped tail address {tail_addr:#x}"),
        }
    }

    /// Number of posts discarded via the null queue
    pub fn discarded(&self) -> usize {
        self.discarded.load(Ordering::Relaxed)
    }

    /// Number of values currently held in a queue
    pub fn len(&self, queue: QueueId) -> usize {
        self.queues.lock()[queue.index()].len()
    }

    /// Whether a queue is currently empty
    pub fn is_empty(&self, queue: QueueId) -> bool {
        self.len(queue) == 0
    }
}

impl fmt::Debug for SoftFabric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoftFabric")
            .field("queues", &self.queues.lock().len())
            .field("discarded", &self.discarded())
            .finish()
    }
}

impl QueueFabric for SoftFabric {
    fn post(&self, queue: QueueId, value: u32) {
        let mut queues = self.queues.lock();
        let fifo = queues
            .get_mut(queue.index())
            .unwrap_or_else(|| panic!("post to unknown queue {queue}"));
        fifo.push_back(value);
        log::trace!("{queue} <- {value:#010x}");
    }

    fn pop(&self, queue: QueueId) -> Option<u32> {
        let mut queues = self.queues.lock();
        let fifo = queues
            .get_mut(queue.index())
            .unwrap_or_else(|| panic!("pop from unknown queue {queue}"));
        fifo.pop_front()
    }

    fn tail_address(&self, queue: QueueId) -> u32 {
        assert!(queue.index() < self.queues.lock().len(), "unknown queue {queue}");
        SOFT_TAIL_BASE + queue.index() as u32
    }
}

// =============================================================================
// Tests
// =============================================================================
