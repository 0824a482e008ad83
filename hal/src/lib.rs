//! # Weft HAL
//!
//! Hardware access layer for the Weft scheduling core.
//!
//! This crate owns the three hardware surfaces the scheduler touches:
//!
//! - **Queue fabric**: the hardware FIFO subsystem used for every
//!   host/coprocessor and coprocessor/coprocessor handoff
//!   ([`queue::QueueFabric`]).
//! - **Peripheral registers**: the register region holding the queue-manager
//!   build registers and the coprocessor wait-source control
//!   ([`periph`]).
//! - **Work memory**: the coprocessor-addressable data RAM that job
//!   descriptors live in ([`workmem::WorkMemory`]).
//!
//! Everything above this crate deals in [`addr::DataAddress`] word addresses
//! and [`queue::QueueId`] handles; only this crate knows how those map onto
//! registers and host pointers.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

extern crate alloc;

pub mod addr;
pub mod periph;
pub mod queue;
pub mod workmem;

pub use addr::DataAddress;
pub use queue::{QueueFabric, QueueId};
pub use workmem::WorkMemory;
