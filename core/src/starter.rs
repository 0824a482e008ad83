//! # Job Starter
//!
//! Posts a built job's address into a queue, handing the whole chain to
//! hardware. From here the chain runs to its terminal step with no further
//! host action per job.

use weft_hal::{DataAddress, QueueFabric, QueueId};

use crate::usage::UseBinding;

// =============================================================================
// Queue Selector
// =============================================================================

/// Which queue a job is started on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueSelector {
    /// The use binding's own job queue
    JobQueue,
    /// An explicit queue
    Explicit(QueueId),
}

// =============================================================================
// Start
// =============================================================================

impl UseBinding {
    /// Start the job at `job_addr`.
    ///
    /// Never blocks. The descriptor (and every descriptor its chain
    /// references) must be fully built; after return their memory belongs to
    /// hardware until completion is observed. Queue-full conditions are
    /// outside this layer's contract.
    pub fn start_job(&self, selector: QueueSelector, job_addr: DataAddress) {
        let queue = match selector {
            QueueSelector::JobQueue => self.job_queue(),
            QueueSelector::Explicit(queue) => queue,
        };
        log::debug!("starting job @ {job_addr} on {queue}");
        self.device().fabric().post(queue, job_addr.raw());
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;
    use weft_hal::QueueFabric;

    #[test]
    fn test_default_selector_posts_to_job_queue() {
        let rig = testutil::rig();
        let addr = rig.job_addr(0);
        rig.usebind.start_job(QueueSelector::JobQueue, addr);
        assert_eq!(rig.fabric.pop(testutil::JOB_QUEUE), Some(addr.raw()));
    }

    #[test]
    fn test_explicit_selector_wins() {
        let rig = testutil::rig();
        let addr = rig.job_addr(0);
        rig.usebind
            .start_job(QueueSelector::Explicit(testutil::YIELD_QUEUE), addr);
        assert!(rig.fabric.is_empty(testutil::JOB_QUEUE));
        assert_eq!(rig.fabric.pop(testutil::YIELD_QUEUE), Some(addr.raw()));
    }
}
