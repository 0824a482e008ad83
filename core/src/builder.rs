//! # Job Builder
//!
//! Writes job descriptors. Building a job touches exactly the four words at
//! the job's address and posts nothing; starting the chain is
//! [`start_job`](crate::UseBinding::start_job)'s business.
//!
//! All four words must be written before the descriptor's address (or a
//! predecessor's next-value referencing it) reaches any queue the
//! coprocessor reads - building strictly before starting satisfies that.

use weft_hal::periph::NULL_QUEUE_TAIL;
use weft_hal::{DataAddress, QueueFabric, WorkMemory};
use weft_pipeline::{PipelineBinding, DYNAMIC_JOB_SLOT};

use crate::descriptor::{
    NextAction, JOB_ENTRY_POINT, JOB_NEXT_QUEUE, JOB_NEXT_VALUE, JOB_WORK_ARG,
};
use crate::usage::UseBinding;

impl UseBinding {
    /// Build the job at `job_addr`.
    ///
    /// `work_arg` and `entry_point` go in verbatim; `next` selects the
    /// next-value/next-queue pair. Rebuilding an address overwrites all four
    /// words. The descriptor must not currently be reachable by an in-flight
    /// chain; the scheduler does not detect that.
    pub fn build_job(
        &self,
        job_addr: DataAddress,
        work_arg: u32,
        entry_point: u32,
        next: NextAction,
    ) {
        let fabric = self.device().fabric();

        let (next_value, next_queue_tail) = match next {
            NextAction::Continue {
                next_job,
                next_queue,
            } => (next_job.raw(), fabric.tail_address(next_queue)),
            NextAction::Yield { next_job } => {
                (next_job.raw(), fabric.tail_address(self.yield_queue()))
            }
            NextAction::Final { use_id } => {
                let final_queue = self
                    .final_queue()
                    .unwrap_or_else(|| panic!("final queue not connected for {use_id}"));
                let token = self.pipeline().job_token(use_id, DYNAMIC_JOB_SLOT);
                (token, fabric.tail_address(final_queue))
            }
            NextAction::Discard => (0, NULL_QUEUE_TAIL),
        };

        let memory = self.device().memory();
        memory.write_word(job_addr.offset(JOB_WORK_ARG), work_arg);
        memory.write_word(job_addr.offset(JOB_ENTRY_POINT), entry_point);
        memory.write_word(job_addr.offset(JOB_NEXT_VALUE), next_value);
        memory.write_word(job_addr.offset(JOB_NEXT_QUEUE), next_queue_tail);

        log::trace!(
            "job @ {job_addr}: entry {entry_point:#010x}, next {next_value:#010x} -> tail {next_queue_tail:#x}"
        );
    }

    /// Build the job at `job_addr` so that its continuation posts job
    /// `job_number` of `target`'s first use into `target`'s job queue.
    ///
    /// Convenience form of [`build_job`](Self::build_job) with a
    /// [`NextAction::Continue`] derived from the target pipeline.
    pub fn build_job_to_pipeline(
        &self,
        job_addr: DataAddress,
        work_arg: u32,
        entry_point: u32,
        target: &dyn PipelineBinding,
        job_number: u8,
    ) {
        let first = target.first_use();
        self.build_job(
            job_addr,
            work_arg,
            entry_point,
            NextAction::Continue {
                next_job: target.job_address(first, 0, job_number),
                next_queue: target.job_queue(first),
            },
        );
    }
}

// =============================================================================
// Tests
// =============================================================================
