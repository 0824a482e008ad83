//! # Binding Traits
//!
//! The two seams between the scheduling core and the surrounding pipeline
//! machinery: [`PipelineBinding`] resolves per-use queues, job addresses and
//! completion tokens; [`CoproDevice`] describes the device registers the
//! scheduler must publish to coprocessor-side code.

use weft_hal::{DataAddress, QueueId};

use crate::param::{UseId, UseParam};

// =============================================================================
// Pipeline Binding
// =============================================================================

/// Resolution of logical pipeline entities to concrete fabric resources.
///
/// Implementations are immutable once the pipeline is assembled; every
/// method may be called repeatedly with identical results.
pub trait PipelineBinding: Send + Sync {
    /// Resolve a named use-scope queue parameter.
    ///
    /// `None` means the parameter was declared but never connected by
    /// pipeline assembly. For [`UseParam::FinalQueue`] that is a legitimate
    /// configuration until a final job actually needs the queue.
    fn use_param(&self, use_id: UseId, param: UseParam) -> Option<QueueId>;

    /// Address of a statically laid-out job descriptor.
    ///
    /// `label` selects the job table within the use; `job_number` indexes
    /// into it. Unknown uses, labels or job numbers are contract violations.
    fn job_address(&self, use_id: UseId, label: u8, job_number: u8) -> DataAddress;

    /// The queue a use's jobs are posted into
    fn job_queue(&self, use_id: UseId) -> QueueId;

    /// Synthesize the job-identifying completion token for
    /// (this pipeline, `use_id`, `job_number`).
    ///
    /// The encoding is private to the fabric; hosts only compare tokens for
    /// equality against values popped from a completion queue.
    fn job_token(&self, use_id: UseId, job_number: u8) -> u32;

    /// The first device occurrence in the pipeline
    fn first_use(&self) -> UseId;
}

// =============================================================================
// Coprocessor Device
// =============================================================================

/// Register surface of one coprocessor device instance
pub trait CoproDevice: Send + Sync {
    /// Word address of the device's aggregate completion (OR-vector)
    /// register. Published into the per-device constants block so
    /// coprocessor-side code can signal completion without host help.
    fn completion_signal_address(&self) -> u32;

    /// Tail word address of the device's diagnostic log queue, if one was
    /// configured.
    fn log_queue_tail(&self) -> Option<u32>;
}
