//! # Weft Pipeline Binding
//!
//! Maps logical uses of a device within a configured accelerator pipeline
//! onto concrete queue IDs, descriptor addresses and job-identifying tokens.
//!
//! The scheduling core never hardcodes queue numbers. At initialization it
//! asks a [`PipelineBinding`] to resolve named use-scope parameters (job,
//! yield and final queues) for one occurrence of the device in the pipeline,
//! and at build time it asks for job addresses and completion tokens. How
//! those answers are produced - image metadata on real systems,
//! [`table::StaticPipeline`] on bring-up rigs and in tests - is this crate's
//! concern alone.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

pub mod binding;
pub mod param;
pub mod table;

pub use binding::{CoproDevice, PipelineBinding};
pub use param::{UseId, UseParam, DYNAMIC_JOB_SLOT};
pub use table::{FixedDevice, StaticPipeline, UseDesc};
