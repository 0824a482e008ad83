//! # Job Descriptor
//!
//! The four-word in-memory layout of a schedulable job and the next-action
//! directive that fixes a job's continuation at build time.
//!
//! Word order and meaning are a bit-exact contract with coprocessor-side
//! code and must never change unilaterally:
//!
//! | word | contents                                        |
//! |------|-------------------------------------------------|
//! | 0    | work argument (opaque to the scheduler)         |
//! | 1    | entry point the coprocessor starts executing at |
//! | 2    | next value: next-job address, token, or 0       |
//! | 3    | tail word address the coprocessor posts word 2 into |

use static_assertions::const_assert;
use weft_hal::{DataAddress, QueueId};
use weft_pipeline::UseId;

// =============================================================================
// Layout
// =============================================================================

/// Size of a job descriptor in words
pub const JOB_WORDS: u32 = 4;

/// Word offset of the work argument
pub const JOB_WORK_ARG: u32 = 0;

/// Word offset of the entry point
pub const JOB_ENTRY_POINT: u32 = 1;

/// Word offset of the next value
pub const JOB_NEXT_VALUE: u32 = 2;

/// Word offset of the next-queue tail address
pub const JOB_NEXT_QUEUE: u32 = 3;

const_assert!(JOB_WORK_ARG < JOB_WORDS);
const_assert!(JOB_ENTRY_POINT < JOB_WORDS);
const_assert!(JOB_NEXT_VALUE < JOB_WORDS);
const_assert!(JOB_NEXT_QUEUE == JOB_WORDS - 1);

// =============================================================================
// Next Action
// =============================================================================

/// What the coprocessor does when a job completes.
///
/// Exactly one directive per descriptor, fixed at build time. The variants
/// carry the arguments that are meaningful for them and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    /// Post an explicit next-job address into an explicit queue
    Continue {
        /// Descriptor address of the next job in the chain
        next_job: DataAddress,
        /// Queue its address is posted into
        next_queue: QueueId,
    },
    /// Post the next-job address into the use's yield queue.
    ///
    /// Cooperative rescheduling within a chain, not true completion.
    Yield {
        /// Descriptor address of the next job in the chain
        next_job: DataAddress,
    },
    /// Terminate the chain: post a synthesized completion token for
    /// (use, reserved dynamic job slot) into the use's final queue.
    ///
    /// The final queue must have been connected by pipeline assembly;
    /// building a final job against an unconnected one panics.
    Final {
        /// Use the token identifies
        use_id: UseId,
    },
    /// Terminate the chain silently: post a don't-care value into the fixed
    /// system null queue. No token is ever produced.
    Discard,
}
