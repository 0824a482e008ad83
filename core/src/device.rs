//! # Device Binding
//!
//! Binds one scheduler instance to one coprocessor device and one work
//! memory view, and publishes the registers coprocessor-side code needs
//! into the per-device constants block.

use alloc::sync::Arc;
use core::fmt;

use weft_hal::{DataAddress, QueueFabric, WorkMemory};
use weft_pipeline::CoproDevice;

/// Constants-block slot holding the aggregate completion register address
pub const CONSTS_COMPLETION_SIGNAL: u32 = 0;

/// Constants-block slot holding the log-queue tail address (8th entry)
#[cfg(feature = "queue-logging")]
pub const CONSTS_LOG_QUEUE: u32 = 7;

// =============================================================================
// Device Binding
// =============================================================================

/// One scheduler instance bound to one coprocessor device.
///
/// Created once per device at bring-up, after the coprocessor image has been
/// loaded (loading may patch the constants block). Immutable thereafter;
/// any number of [use bindings](crate::UseBinding) may share it.
pub struct DeviceBinding {
    fabric: Arc<dyn QueueFabric>,
    device: Arc<dyn CoproDevice>,
    memory: Arc<dyn WorkMemory>,
    consts_base: DataAddress,
}

impl DeviceBinding {
    /// Bind a device.
    ///
    /// Writes the device's aggregate completion register address into the
    /// well-known slot of the constants block at `consts_base`, so
    /// coprocessor-side code can find it. With the `queue-logging` feature
    /// the device's log-queue tail goes into the eighth slot as well. On
    /// platforms built with `fixed-wait-source`, performs the one-time
    /// switch out of legacy wait mode.
    pub fn new(
        fabric: Arc<dyn QueueFabric>,
        device: Arc<dyn CoproDevice>,
        memory: Arc<dyn WorkMemory>,
        consts_base: DataAddress,
    ) -> Self {
        memory.write_word(
            consts_base.offset(CONSTS_COMPLETION_SIGNAL),
            device.completion_signal_address(),
        );

        #[cfg(feature = "queue-logging")]
        {
            let log_tail = device
                .log_queue_tail()
                .unwrap_or_else(|| panic!("queue-logging enabled but device has no log queue"));
            memory.write_word(consts_base.offset(CONSTS_LOG_QUEUE), log_tail);
        }

        #[cfg(feature = "fixed-wait-source")]
        weft_hal::periph::select_queue_wait_source();

        log::debug!(
            "device bound: completion signal {:#010x} published at {}",
            device.completion_signal_address(),
            consts_base
        );

        Self {
            fabric,
            device,
            memory,
            consts_base,
        }
    }

    /// The queue fabric this device posts and pops through
    pub fn fabric(&self) -> &Arc<dyn QueueFabric> {
        &self.fabric
    }

    /// The work memory view descriptors are written through
    pub fn memory(&self) -> &Arc<dyn WorkMemory> {
        &self.memory
    }

    /// The underlying device
    pub fn device(&self) -> &Arc<dyn CoproDevice> {
        &self.device
    }

    /// Base of the per-device constants block
    pub fn consts_base(&self) -> DataAddress {
        self.consts_base
    }
}

impl fmt::Debug for DeviceBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceBinding")
            .field("consts_base", &self.consts_base)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
