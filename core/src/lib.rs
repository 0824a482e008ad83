//! # Weft Core
//!
//! Host-side scheduling core for a job-chaining execution engine on an
//! auxiliary coprocessor.
//!
//! A job is four words of coprocessor data RAM: a work argument, an entry
//! point, and a next-value/next-queue pair that tells the coprocessor what
//! to do when the job finishes. Because the continuation is baked into the
//! descriptor, the host builds a whole chain up front, posts the first job's
//! address into a hardware queue, and then does nothing until the chain's
//! terminal step posts a completion token - no per-job polling, no
//! interrupts, no locks.
//!
//! ## Flow
//!
//! 1. [`DeviceBinding::new`] once per coprocessor device, after its image is
//!    loaded.
//! 2. [`UseBinding::new`] once per occurrence of the device in a pipeline.
//! 3. [`UseBinding::build_job`] for every job in the chain; every job but
//!    the last continues or yields to its successor, the last is
//!    [`NextAction::Final`] (or [`NextAction::Discard`]).
//! 4. [`UseBinding::start_job`] on the first job. The chain now runs to its
//!    terminal entirely in hardware.
//! 5. Observe completion by popping the final queue (external to this
//!    crate).
//!
//! ## Ownership
//!
//! A descriptor's memory is owned by whichever chain references it.
//! Ownership passes host to hardware at `start_job` and back only once the
//! host observes completion; [`arena::JobArena`] makes that discipline
//! explicit as slot indices. Nothing here blocks, and contract violations
//! panic rather than returning errors, matching the embedded posture of the
//! surrounding system.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

extern crate alloc;

pub mod arena;
pub mod builder;
pub mod chain;
pub mod descriptor;
pub mod device;
pub mod starter;
pub mod usage;

#[cfg(test)]
mod testutil;

pub use arena::{JobArena, SlotIndex};
pub use chain::{Chain, JobStep, Terminal};
pub use descriptor::{NextAction, JOB_WORDS};
pub use device::DeviceBinding;
pub use starter::QueueSelector;
pub use usage::UseBinding;
