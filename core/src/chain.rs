//! # Chain Builder
//!
//! Strings a fixed sequence of work steps into arena slots so the whole
//! unit of work runs in hardware off a single start.
//!
//! Every step but the last yields to its successor through the use's yield
//! queue; the last step carries the caller's terminal directive. This is the
//! canonical in-use chaining pattern: cross-pipeline continuations go
//! through [`build_job_to_pipeline`](crate::UseBinding::build_job_to_pipeline)
//! instead.

use alloc::vec::Vec;

use weft_hal::DataAddress;
use weft_pipeline::UseId;

use crate::arena::{JobArena, SlotIndex};
use crate::descriptor::NextAction;
use crate::starter::QueueSelector;
use crate::usage::UseBinding;

// =============================================================================
// Steps and Terminals
// =============================================================================

/// One unit of work within a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobStep {
    /// Opaque argument handed to the job's code
    pub work_arg: u32,
    /// Where the coprocessor starts executing
    pub entry_point: u32,
}

/// How a chain ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    /// Post a completion token for `use_id` to the final queue
    Final {
        /// Use the completion token identifies
        use_id: UseId,
    },
    /// End silently via the system null queue
    Discard,
}

impl Terminal {
    fn next_action(self) -> NextAction {
        match self {
            Terminal::Final { use_id } => NextAction::Final { use_id },
            Terminal::Discard => NextAction::Discard,
        }
    }
}

// =============================================================================
// Chain
// =============================================================================

/// A built, not-yet-released chain occupying arena slots.
///
/// The slots stay owned by the chain until the host observes the terminal
/// (completion token popped, or the discard otherwise accounted for) and
/// calls [`release`](Chain::release).
#[derive(Debug)]
pub struct Chain {
    first_job: DataAddress,
    slots: Vec<SlotIndex>,
}

impl Chain {
    /// Build a chain of `steps` in `arena`, terminated by `terminal`.
    ///
    /// Acquires one slot per step; panics if the arena cannot hold the
    /// chain (sizing the working set is the caller's design decision).
    pub fn build(
        use_binding: &UseBinding,
        arena: &JobArena,
        steps: &[JobStep],
        terminal: Terminal,
    ) -> Self {
        assert!(!steps.is_empty(), "a chain needs at least one step");

        let slots: Vec<SlotIndex> = steps
            .iter()
            .map(|_| {
                arena
                    .acquire()
                    .unwrap_or_else(|| panic!("arena exhausted while building chain"))
            })
            .collect();

        for (i, step) in steps.iter().enumerate() {
            let next = if i + 1 < steps.len() {
                NextAction::Yield {
                    next_job: arena.address(slots[i + 1]),
                }
            } else {
                terminal.next_action()
            };
            use_binding.build_job(arena.address(slots[i]), step.work_arg, step.entry_point, next);
        }

        log::debug!("chain of {} step(s) built from {}", steps.len(), slots[0]);

        Self {
            first_job: arena.address(slots[0]),
            slots,
        }
    }

    /// Descriptor address of the chain's first job
    pub fn first_job(&self) -> DataAddress {
        self.first_job
    }

    /// Slots the chain occupies, in step order
    pub fn slots(&self) -> &[SlotIndex] {
        &self.slots
    }

    /// Start the chain on the use binding's job queue
    pub fn start(&self, use_binding: &UseBinding) {
        use_binding.start_job(QueueSelector::JobQueue, self.first_job);
    }

    /// Return the chain's slots to the arena.
    ///
    /// Only after the host has observed the chain's terminal.
    pub fn release(self, arena: &JobArena) {
        for slot in self.slots {
            arena.release(slot);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
