//! Interrupt sampling and trap entry.
//!
//! Interrupts are only recognised at an instruction boundary: the FETCH state
//! checks for an enabled, pending interrupt before it touches the instruction
//! port. Synchronous exceptions are raised by the next-state logic, which
//! carries the cause and the saved PC in the TRAP state itself.

use tracing::debug;

use super::Cpu;
use crate::common::Trap;
use crate::core::arch::csr::TrapEntry;
use crate::core::fsm::State;
use crate::soc::Bus;

impl Cpu {
    /// Samples the interrupt lines and returns the interrupt to take this cycle, if any.
    pub(crate) fn sample_interrupts<B: Bus + ?Sized>(&mut self, bus: &B) -> Option<Trap> {
        self.csrs.set_interrupt_lines(bus.interrupts());
        if self.state == State::Fetch {
            self.csrs.pending_interrupt()
        } else {
            None
        }
    }

    /// Returns the trap-entry request of the TRAP state and records it.
    pub(crate) fn trap_entry(&mut self) -> Option<TrapEntry> {
        let State::Trap { trap, epc } = self.state else {
            return None;
        };
        debug!(
            %trap,
            epc = format_args!("{epc:#010x}"),
            mtvec = format_args!("{:#010x}", self.csrs.mtvec),
            "trap entry"
        );
        if trap.is_interrupt() {
            self.stats.interrupts_taken += 1;
        } else {
            self.stats.traps_taken += 1;
        }
        Some(TrapEntry::new(trap, epc))
    }
}
