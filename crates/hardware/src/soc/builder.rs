//! System construction and top-level `System` type.
//!
//! This module builds the test-bench system from configuration. It performs:
//! 1. **Interconnect setup:** Creates the interconnect with the configured wait states.
//! 2. **Device registration:** Instantiates RAM, the console, the IRQ trigger and the CLINT.
//! 3. **Image loading:** Places program segments into memory via `load_binary_at`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

use crate::common::SimError;
use crate::config::Config;
use crate::soc::devices::{Clint, Console, IrqTrigger};
use crate::soc::interconnect::Interconnect;
use crate::soc::memory::Memory;

/// Exit-request value meaning "still running".
const NO_EXIT: u64 = u64::MAX;

/// Top-level system instance containing the interconnect and exit flag.
///
/// The exit request is shared with the console so a halt write is visible to the
/// run loop without downcasting.
#[derive(Debug)]
pub struct System {
    /// System interconnect; routes accesses to RAM and MMIO devices.
    pub bus: Interconnect,
    /// Atomic exit code: when not `u64::MAX`, simulation should stop and use this as exit code.
    pub exit_request: Arc<AtomicU64>,
}

impl System {
    /// Builds a new system from configuration.
    pub fn new(config: &Config) -> Self {
        let mut bus = Interconnect::new(
            config.memory.read_wait_states,
            config.memory.write_wait_states,
        );
        let exit_request = Arc::new(AtomicU64::new(NO_EXIT));

        let mmio = &config.mmio;
        bus.add_device(Box::new(Memory::new(
            config.memory.ram_base,
            config.memory.ram_size,
        )));
        bus.add_device(Box::new(Console::new(
            mmio.console_base,
            mmio.console_echo,
            Arc::clone(&exit_request),
        )));
        bus.add_device(Box::new(IrqTrigger::new(
            mmio.irq_trigger_addr,
            mmio.irq_pulse_cycles,
        )));
        bus.add_device(Box::new(Clint::new(mmio.clint_base, mmio.clint_divider)));

        Self { bus, exit_request }
    }

    /// Loads a program segment into memory.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ImageOutOfRange`] if the segment does not fit a device.
    pub fn load(&mut self, addr: u32, data: &[u8]) -> Result<(), SimError> {
        self.bus.load_binary_at(data, addr)?;
        info!(
            addr = format_args!("{addr:#010x}"),
            bytes = data.len(),
            "loaded segment"
        );
        Ok(())
    }

    /// Returns the halt code if the program has requested an exit.
    pub fn exit_code(&self) -> Option<u32> {
        match self.exit_request.load(Ordering::Relaxed) {
            NO_EXIT => None,
            code => Some(code as u32),
        }
    }
}
