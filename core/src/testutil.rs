//! Shared test rig: a software fabric, buffer-backed work memory, a static
//! pipeline description and a one-descriptor-at-a-time coprocessor model.

use alloc::sync::Arc;

use weft_hal::queue::SoftFabric;
use weft_hal::workmem::BufferGram;
use weft_hal::{DataAddress, QueueFabric, QueueId};
use weft_pipeline::{FixedDevice, StaticPipeline, UseDesc, UseId};

use crate::arena::JobArena;
use crate::descriptor::{JOB_NEXT_QUEUE, JOB_NEXT_VALUE, JOB_WORDS};
use crate::device::DeviceBinding;
use crate::usage::UseBinding;

pub const JOB_QUEUE: QueueId = QueueId::new(1);
pub const YIELD_QUEUE: QueueId = QueueId::new(2);
pub const FINAL_QUEUE: QueueId = QueueId::new(3);
pub const USE: UseId = UseId::new(0);

pub const COMPLETION_SIGNAL: u32 = 0x0121_0040;
#[cfg(feature = "queue-logging")]
pub const LOG_QUEUE_TAIL: u32 = 0x0121_0048;

const MEM_ORIGIN: u32 = 0x400;
const CONSTS_BASE: u32 = 0x400;
const ARENA_BASE: u32 = 0x410;
const ARENA_SLOTS: usize = 4;
const STATIC_JOB_0: u32 = 0x430;
const STATIC_JOB_1: u32 = 0x434;

pub struct Rig {
    pub fabric: Arc<SoftFabric>,
    pub memory: Arc<BufferGram>,
    pub pipeline: Arc<StaticPipeline>,
    pub device: Arc<DeviceBinding>,
    pub usebind: UseBinding,
    pub arena: JobArena,
    pub consts_base: DataAddress,
}

impl Rig {
    /// Address of dynamic job slot `i` in the arena region
    pub fn job_addr(&self, i: u32) -> DataAddress {
        DataAddress::new(ARENA_BASE + i * JOB_WORDS)
    }
}

fn build_rig(final_queue: Option<QueueId>) -> Rig {
    let fabric = Arc::new(SoftFabric::new(4));
    let memory = Arc::new(BufferGram::new(DataAddress::new(MEM_ORIGIN), 256));

    let mut pipeline = StaticPipeline::new(1);
    pipeline.add_use(
        UseDesc {
            use_id: USE,
            job_queue: Some(JOB_QUEUE),
            yield_queue: Some(YIELD_QUEUE),
            final_queue,
        },
        &[DataAddress::new(STATIC_JOB_0), DataAddress::new(STATIC_JOB_1)],
    );
    let pipeline = Arc::new(pipeline);

    let device_desc = FixedDevice {
        completion_signal: COMPLETION_SIGNAL,
        #[cfg(feature = "queue-logging")]
        log_queue_tail: Some(LOG_QUEUE_TAIL),
        #[cfg(not(feature = "queue-logging"))]
        log_queue_tail: None,
    };

    let consts_base = DataAddress::new(CONSTS_BASE);
    let device = Arc::new(DeviceBinding::new(
        fabric.clone(),
        Arc::new(device_desc),
        memory.clone(),
        consts_base,
    ));

    let usebind = UseBinding::new(device.clone(), pipeline.clone(), USE);
    let arena = JobArena::new(DataAddress::new(ARENA_BASE), ARENA_SLOTS);

    Rig {
        fabric,
        memory,
        pipeline,
        device,
        usebind,
        arena,
        consts_base,
    }
}

pub fn rig() -> Rig {
    build_rig(Some(FINAL_QUEUE))
}

pub fn rig_without_final_queue() -> Rig {
    build_rig(None)
}

/// Read the four descriptor words at `addr`
pub fn read_job(rig: &Rig, addr: DataAddress) -> [u32; 4] {
    use weft_hal::WorkMemory;
    [
        rig.memory.read_word(addr),
        rig.memory.read_word(addr.offset(1)),
        rig.memory.read_word(addr.offset(2)),
        rig.memory.read_word(addr.offset(3)),
    ]
}

/// Execute one queued job: pop its address, then do what the coprocessor
/// does on completion - post the next value to the next-queue tail.
fn step(rig: &Rig, queue: QueueId) -> bool {
    use weft_hal::WorkMemory;
    let Some(raw) = rig.fabric.pop(queue) else {
        return false;
    };
    let addr = DataAddress::new(raw);
    let next_value = rig.memory.read_word(addr.offset(JOB_NEXT_VALUE));
    let next_tail = rig.memory.read_word(addr.offset(JOB_NEXT_QUEUE));
    rig.fabric.post_to_tail(next_tail, next_value);
    true
}

/// Run queued jobs (job queue first, then yielded continuations) until both
/// scheduling queues drain. Completion tokens are left for the host.
pub fn run_coprocessor(rig: &Rig) {
    loop {
        if step(rig, JOB_QUEUE) {
            continue;
        }
        if step(rig, YIELD_QUEUE) {
            continue;
        }
        break;
    }
}
