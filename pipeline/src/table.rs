//! # Static Pipeline Description
//!
//! A fixed-capacity, table-driven [`PipelineBinding`] for bring-up rigs and
//! tests: every use, queue and job address is declared explicitly when the
//! rig is assembled. Tables are built once at initialization and never
//! resized.

use core::fmt;

use heapless::Vec;
use weft_hal::{DataAddress, QueueId};

use crate::binding::{CoproDevice, PipelineBinding};
use crate::param::{UseId, UseParam};

/// Maximum device occurrences in one static pipeline description
pub const MAX_USES: usize = 8;

/// Maximum statically laid-out jobs per use
pub const MAX_JOBS: usize = 16;

// =============================================================================
// Use Description
// =============================================================================

/// Declaration of one device occurrence within a [`StaticPipeline`]
#[derive(Debug, Clone, Copy)]
pub struct UseDesc {
    /// The use being described
    pub use_id: UseId,
    /// Job queue, if connected
    pub job_queue: Option<QueueId>,
    /// Yield queue, if connected
    pub yield_queue: Option<QueueId>,
    /// Final (completion) queue, if connected
    pub final_queue: Option<QueueId>,
}

struct UseEntry {
    desc: UseDesc,
    jobs: Vec<DataAddress, MAX_JOBS>,
}

// =============================================================================
// Static Pipeline
// =============================================================================

/// Table-driven pipeline binding
pub struct StaticPipeline {
    id: u8,
    uses: Vec<UseEntry, MAX_USES>,
}

impl StaticPipeline {
    /// Create an empty description for pipeline `id`
    pub const fn new(id: u8) -> Self {
        Self {
            id,
            uses: Vec::new(),
        }
    }

    /// Declare a use and its statically laid-out job addresses.
    ///
    /// Uses resolve in declaration order; the first declared use is the
    /// pipeline's first use. Duplicate IDs and table overflow are contract
    /// violations.
    pub fn add_use(&mut self, desc: UseDesc, jobs: &[DataAddress]) {
        assert!(
            self.entry(desc.use_id).is_none(),
            "duplicate {} in pipeline {}",
            desc.use_id,
            self.id
        );
        let mut entry = UseEntry {
            desc,
            jobs: Vec::new(),
        };
        entry
            .jobs
            .extend_from_slice(jobs)
            .unwrap_or_else(|()| panic!("job table overflow for {}", desc.use_id));
        self.uses
            .push(entry)
            .map_err(|_| ())
            .unwrap_or_else(|()| panic!("use table overflow in pipeline {}", self.id));
        log::debug!(
            "pipeline {}: declared {} with {} static job(s)",
            self.id,
            desc.use_id,
            jobs.len()
        );
    }

    fn entry(&self, use_id: UseId) -> Option<&UseEntry> {
        self.uses.iter().find(|e| e.desc.use_id == use_id)
    }

    fn entry_or_panic(&self, use_id: UseId) -> &UseEntry {
        self.entry(use_id)
            .unwrap_or_else(|| panic!("unknown {} in pipeline {}", use_id, self.id))
    }
}

impl PipelineBinding for StaticPipeline {
    fn use_param(&self, use_id: UseId, param: UseParam) -> Option<QueueId> {
        let desc = &self.entry_or_panic(use_id).desc;
        match param {
            UseParam::JobQueue => desc.job_queue,
            UseParam::YieldQueue => desc.yield_queue,
            UseParam::FinalQueue => desc.final_queue,
        }
    }

    fn job_address(&self, use_id: UseId, label: u8, job_number: u8) -> DataAddress {
        // A static description carries a single job table per use.
        assert!(label == 0, "unknown job table label {label} for {use_id}");
        let entry = self.entry_or_panic(use_id);
        *entry
            .jobs
            .get(job_number as usize)
            .unwrap_or_else(|| panic!("job {job_number} out of range for {use_id}"))
    }

    fn job_queue(&self, use_id: UseId) -> QueueId {
        self.entry_or_panic(use_id)
            .desc
            .job_queue
            .unwrap_or_else(|| panic!("{use_id} has no job queue connected"))
    }

    fn job_token(&self, use_id: UseId, job_number: u8) -> u32 {
        ((self.id as u32) << 24) | ((use_id.index() as u32) << 8) | job_number as u32
    }

    fn first_use(&self) -> UseId {
        assert!(!self.uses.is_empty(), "pipeline {} has no uses", self.id);
        self.uses[0].desc.use_id
    }
}

impl fmt::Debug for StaticPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticPipeline")
            .field("id", &self.id)
            .field("uses", &self.uses.len())
            .finish()
    }
}

// =============================================================================
// Fixed Device
// =============================================================================

/// A [`CoproDevice`] described by explicit register addresses
#[derive(Debug, Clone, Copy)]
pub struct FixedDevice {
    /// Aggregate completion (OR-vector) register word address
    pub completion_signal: u32,
    /// Diagnostic log queue tail word address, if configured
    pub log_queue_tail: Option<u32>,
}

impl CoproDevice for FixedDevice {
    fn completion_signal_address(&self) -> u32 {
        self.completion_signal
    }

    fn log_queue_tail(&self) -> Option<u32> {
        self.log_queue_tail
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StaticPipeline {
        let mut p = StaticPipeline::new(3);
        p.add_use(
            UseDesc {
                use_id: UseId::new(0),
                job_queue: Some(QueueId::new(4)),
                yield_queue: Some(QueueId::new(5)),
                final_queue: Some(QueueId::new(6)),
            },
            &[DataAddress::new(0x200), DataAddress::new(0x204)],
        );
        p.add_use(
            UseDesc {
                use_id: UseId::new(1),
                job_queue: Some(QueueId::new(7)),
                yield_queue: None,
                final_queue: None,
            },
            &[],
        );
        p
    }

    #[test]
    fn test_use_param_resolution() {
        let p = sample();
        let u0 = UseId::new(0);
        assert_eq!(p.use_param(u0, UseParam::JobQueue), Some(QueueId::new(4)));
        assert_eq!(p.use_param(u0, UseParam::YieldQueue), Some(QueueId::new(5)));
        assert_eq!(p.use_param(u0, UseParam::FinalQueue), Some(QueueId::new(6)));
        assert_eq!(p.use_param(UseId::new(1), UseParam::FinalQueue), None);
    }

    #[test]
    fn test_job_lookup() {
        let p = sample();
        assert_eq!(p.job_address(UseId::new(0), 0, 1), DataAddress::new(0x204));
        assert_eq!(p.job_queue(UseId::new(0)), QueueId::new(4));
    }

    #[test]
    fn test_first_use_is_declaration_order() {
        let p = sample();
        assert_eq!(p.first_use(), UseId::new(0));
    }

    #[test]
    fn test_tokens_distinguish_jobs_and_uses() {
        let p = sample();
        let t = p.job_token(UseId::new(0), 7);
        assert_ne!(t, p.job_token(UseId::new(0), 8));
        assert_ne!(t, p.job_token(UseId::new(1), 7));
        assert_ne!(t, StaticPipeline::new(4).job_token(UseId::new(0), 7));
    }

    #[test]
    #[should_panic(expected = "unknown use2")]
    fn test_unknown_use_panics() {
        sample().job_queue(UseId::new(2));
    }

    #[test]
    #[should_panic(expected = "duplicate use0")]
    fn test_duplicate_use_panics() {
        let mut p = sample();
        p.add_use(
            UseDesc {
                use_id: UseId::new(0),
                job_queue: None,
                yield_queue: None,
                final_queue: None,
            },
            &[],
        );
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_job_number_out_of_range_panics() {
        sample().job_address(UseId::new(0), 0, 2);
    }
}
