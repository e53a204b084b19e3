//! Trap and simulator error definitions.
//!
//! This module defines the two error channels of the crate:
//! 1. **Traps:** Architectural events (exceptions and interrupts) raised by the core and
//!    handled in machine mode. They are ordinary values, never Rust errors at runtime.
//! 2. **Simulator Errors:** Host-side failures (image loading, configuration parsing)
//!    reported through [`SimError`].

use std::fmt;

use thiserror::Error;

use crate::isa::privileged::cause::{exception, interrupt, INTERRUPT_BIT};

/// RISC-V machine-mode trap causes supported by the core.
///
/// Traps transfer control to the handler at `mtvec`. Each variant knows its `mcause`
/// encoding and the value written to `mtval` on entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trap {
    /// Illegal instruction exception.
    ///
    /// Raised for an undefined encoding (when illegal-instruction trapping is enabled)
    /// or for an access to a CSR that does not exist or is read-only.
    /// The associated value is the instruction encoding.
    IllegalInstruction(u32),

    /// Breakpoint exception raised by `EBREAK`.
    ///
    /// The associated value is the program counter of the `EBREAK`.
    Breakpoint(u32),

    /// Environment call from machine mode, raised by `ECALL`.
    EnvironmentCallFromMMode,

    /// Machine software interrupt (CLINT `msip`).
    MachineSoftwareInterrupt,

    /// Machine timer interrupt (`mtime >= mtimecmp` or an external timer line).
    MachineTimerInterrupt,

    /// Machine external interrupt.
    MachineExternalInterrupt,
}

impl Trap {
    /// Returns `true` for asynchronous interrupts.
    pub const fn is_interrupt(&self) -> bool {
        matches!(
            self,
            Self::MachineSoftwareInterrupt
                | Self::MachineTimerInterrupt
                | Self::MachineExternalInterrupt
        )
    }

    /// Returns the exception or interrupt code without the interrupt flag.
    pub const fn code(&self) -> u32 {
        match self {
            Self::IllegalInstruction(_) => exception::ILLEGAL_INSTRUCTION,
            Self::Breakpoint(_) => exception::BREAKPOINT,
            Self::EnvironmentCallFromMMode => exception::ENVIRONMENT_CALL_FROM_M_MODE,
            Self::MachineSoftwareInterrupt => interrupt::MACHINE_SOFTWARE,
            Self::MachineTimerInterrupt => interrupt::MACHINE_TIMER,
            Self::MachineExternalInterrupt => interrupt::MACHINE_EXTERNAL,
        }
    }

    /// Returns the value written to `mcause`: the code with bit 31 set for interrupts.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvmc_core::common::Trap;
    ///
    /// assert_eq!(Trap::EnvironmentCallFromMMode.cause(), 11);
    /// assert_eq!(Trap::MachineTimerInterrupt.cause(), 0x8000_0007);
    /// ```
    pub const fn cause(&self) -> u32 {
        if self.is_interrupt() {
            INTERRUPT_BIT | self.code()
        } else {
            self.code()
        }
    }

    /// Returns the value written to `mtval` on trap entry.
    pub const fn tval(&self) -> u32 {
        match self {
            Self::IllegalInstruction(inst) => *inst,
            Self::Breakpoint(pc) => *pc,
            _ => 0,
        }
    }
}

impl fmt::Display for Trap {
    /// Formats the trap for display.
    ///
    /// # Arguments
    ///
    /// * `f` - The formatter to write to.
    ///
    /// # Returns
    ///
    /// A formatting result indicating success or failure.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalInstruction(inst) => write!(f, "IllegalInstruction({inst:#010x})"),
            Self::Breakpoint(pc) => write!(f, "Breakpoint({pc:#010x})"),
            Self::EnvironmentCallFromMMode => write!(f, "EnvironmentCallFromMMode"),
            Self::MachineSoftwareInterrupt => write!(f, "MachineSoftwareInterrupt"),
            Self::MachineTimerInterrupt => write!(f, "MachineTimerInterrupt"),
            Self::MachineExternalInterrupt => write!(f, "MachineExternalInterrupt"),
        }
    }
}

impl std::error::Error for Trap {}

/// Host-side failures while preparing or configuring a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// A file could not be read.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A Verilog hex image contained a malformed record.
    #[error("hex image line {line}: {message}")]
    HexParse {
        /// One-based line number of the offending record.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// An ELF image could not be parsed or is not a 32-bit RISC-V executable.
    #[error("invalid ELF image: {0}")]
    Elf(String),

    /// A program segment does not fit inside RAM.
    #[error("segment at {addr:#010x} ({len} bytes) lies outside RAM")]
    ImageOutOfRange {
        /// Load address of the segment.
        addr: u32,
        /// Length of the segment in bytes.
        len: usize,
    },

    /// The JSON configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
