//! Interrupt trigger.
//!
//! Any write to the trigger register raises the machine timer line for a
//! fixed number of cycles. Test programs use it to provoke an interrupt at a
//! known point without programming a timer.

use crate::core::arch::trap::InterruptLines;
use crate::soc::traits::Device;

/// IRQ trigger device structure.
#[derive(Debug)]
pub struct IrqTrigger {
    base_addr: u32,
    pulse_cycles: u32,
    remaining: u32,
}

impl IrqTrigger {
    /// Creates a trigger at `base_addr` whose pulse lasts `pulse_cycles` cycles.
    pub const fn new(base_addr: u32, pulse_cycles: u32) -> Self {
        Self {
            base_addr,
            pulse_cycles,
            remaining: 0,
        }
    }

    /// Returns whether the pulse is currently high.
    pub const fn is_active(&self) -> bool {
        self.remaining > 0
    }
}

impl Device for IrqTrigger {
    fn name(&self) -> &str {
        "IRQ_TRIGGER"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, 4)
    }

    fn read(&mut self, _offset: u32) -> u32 {
        u32::from(self.is_active())
    }

    fn write(&mut self, _offset: u32, _data: u32, _byte_enable: u8) {
        self.remaining = self.pulse_cycles;
    }

    fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    fn interrupts(&self) -> InterruptLines {
        InterruptLines {
            timer: self.is_active(),
            ..InterruptLines::default()
        }
    }
}
