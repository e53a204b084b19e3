//! Interrupt Lines and Pending-Interrupt Selection.
//!
//! This module connects the core to its interrupt sources. It performs
//! the following:
//! 1. **Line Sampling:** Holds the three level-sensitive machine interrupt inputs.
//! 2. **Interrupt Mapping:** Converts pending bits into architectural trap types, in the
//!    fixed RISC-V priority order (external, software, timer).

use crate::common::error::Trap;
use crate::core::arch::csr;

/// Machine interrupt input lines driven by the collaborators outside the core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InterruptLines {
    /// Machine external interrupt (`mip.MEIP`, bit 11).
    pub external: bool,
    /// Machine timer interrupt (`mip.MTIP`, bit 7).
    pub timer: bool,
    /// Machine software interrupt (`mip.MSIP`, bit 3).
    pub software: bool,
}

impl InterruptLines {
    /// Returns the `mip` image of these lines.
    pub const fn mip(self) -> u32 {
        let mut bits = 0;
        if self.external {
            bits |= csr::MIP_MEIP;
        }
        if self.timer {
            bits |= csr::MIP_MTIP;
        }
        if self.software {
            bits |= csr::MIP_MSIP;
        }
        bits
    }

    /// Combines two sets of lines (wired OR).
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        Self {
            external: self.external || other.external,
            timer: self.timer || other.timer,
            software: self.software || other.software,
        }
    }
}

/// Trap handler utility functions.
#[derive(Debug)]
pub struct TrapHandler;

impl TrapHandler {
    /// Interrupt bits in the order they are taken when several are pending.
    const PRIORITY: [u32; 3] = [csr::MIP_MEIP, csr::MIP_MSIP, csr::MIP_MTIP];

    /// Converts an interrupt pending bit to a corresponding trap type.
    ///
    /// # Arguments
    ///
    /// * `bit` - A single interrupt pending bit from `mip`.
    ///
    /// # Returns
    ///
    /// The `Trap` variant for that source, or `None` for bits the core does not implement.
    pub const fn irq_to_trap(bit: u32) -> Option<Trap> {
        match bit {
            csr::MIP_MSIP => Some(Trap::MachineSoftwareInterrupt),
            csr::MIP_MTIP => Some(Trap::MachineTimerInterrupt),
            csr::MIP_MEIP => Some(Trap::MachineExternalInterrupt),
            _ => None,
        }
    }

    /// Selects the interrupt to take, if any.
    ///
    /// # Arguments
    ///
    /// * `mstatus` - Current `mstatus`; nothing is taken while `MIE` is clear.
    /// * `mie` - Per-source enable mask.
    /// * `mip` - Per-source pending mask.
    ///
    /// # Returns
    ///
    /// The highest-priority pending and enabled interrupt.
    pub fn pending_interrupt(mstatus: u32, mie: u32, mip: u32) -> Option<Trap> {
        if mstatus & csr::MSTATUS_MIE == 0 {
            return None;
        }
        let ready = mie & mip;
        Self::PRIORITY
            .iter()
            .find(|&&bit| ready & bit != 0)
            .and_then(|&bit| Self::irq_to_trap(bit))
    }
}
