//! Memory-mapped devices.
//!
//! This module contains the devices found on the test-bench system map: the
//! console used for program output and halting, a one-shot interrupt trigger,
//! and the core-local interruptor (CLINT).

/// Core Local Interruptor (timer and software interrupt controller).
pub mod clint;

/// Character, integer and halt output port.
pub mod console;

/// Write-triggered timer interrupt pulse.
pub mod irq_trigger;

pub use clint::Clint;
pub use console::Console;
pub use irq_trigger::IrqTrigger;

pub use crate::soc::traits::Device;
