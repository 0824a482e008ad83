//! # Use Binding
//!
//! Binds one scheduler instance to a specific occurrence of the device
//! within a configured pipeline, resolving the three logical queues jobs
//! are scheduled through.

use alloc::sync::Arc;
use core::fmt;

use weft_hal::QueueId;
use weft_pipeline::{PipelineBinding, UseId, UseParam};

use crate::device::DeviceBinding;

// =============================================================================
// Use Binding
// =============================================================================

/// One scheduler instance bound to one pipeline occurrence of the device.
///
/// Created once per occurrence; immutable thereafter. Resolution happens
/// here, at initialization - the only late check is the final queue, which
/// pipeline assembly may legitimately leave unconnected until a final job
/// actually needs it. Conflict avoidance between multiple use bindings on
/// one device is the caller's responsibility.
pub struct UseBinding {
    device: Arc<DeviceBinding>,
    pipeline: Arc<dyn PipelineBinding>,
    job_queue: QueueId,
    yield_queue: QueueId,
    final_queue: Option<QueueId>,
}

impl UseBinding {
    /// Bind a pipeline occurrence.
    ///
    /// Resolves the job, yield and final queues via named use-scope
    /// parameter lookups. Job and yield queues must be connected; the final
    /// queue may resolve later. No hardware state changes.
    pub fn new(
        device: Arc<DeviceBinding>,
        pipeline: Arc<dyn PipelineBinding>,
        use_id: UseId,
    ) -> Self {
        let job_queue = pipeline
            .use_param(use_id, UseParam::JobQueue)
            .unwrap_or_else(|| panic!("job queue not connected for {use_id}"));
        let yield_queue = pipeline
            .use_param(use_id, UseParam::YieldQueue)
            .unwrap_or_else(|| panic!("yield queue not connected for {use_id}"));
        let final_queue = pipeline.use_param(use_id, UseParam::FinalQueue);

        match final_queue {
            Some(q) => log::debug!("{use_id} bound: job {job_queue}, yield {yield_queue}, final {q}"),
            None => log::debug!("{use_id} bound: job {job_queue}, yield {yield_queue}, final unconnected"),
        }

        Self {
            device,
            pipeline,
            job_queue,
            yield_queue,
            final_queue,
        }
    }

    /// The device binding this use schedules onto
    pub fn device(&self) -> &Arc<DeviceBinding> {
        &self.device
    }

    /// The pipeline this use belongs to
    pub fn pipeline(&self) -> &Arc<dyn PipelineBinding> {
        &self.pipeline
    }

    /// The queue new jobs are posted into
    pub fn job_queue(&self) -> QueueId {
        self.job_queue
    }

    /// The queue yielded continuations pass through
    pub fn yield_queue(&self) -> QueueId {
        self.yield_queue
    }

    /// The completion queue, if pipeline assembly connected it
    pub fn final_queue(&self) -> Option<QueueId> {
        self.final_queue
    }
}

impl fmt::Debug for UseBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UseBinding")
            .field("job_queue", &self.job_queue)
            .field("yield_queue", &self.yield_queue)
            .field("final_queue", &self.final_queue)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
