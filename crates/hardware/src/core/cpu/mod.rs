//! CPU core definition and initialization.
//!
//! This module defines the central `Cpu` structure, which holds the entire
//! architectural and micro-architectural state of the multi-cycle core:
//! 1. **State Management:** General purpose registers, CSRs and the FSM state register.
//! 2. **Datapath:** The program counter and the barrier registers carried between states.
//! 3. **Observability:** Performance statistics and optional per-cycle tracing.
//!
//! The bus is not owned by the core; [`Cpu::tick`] borrows it for one cycle.

/// CSR instruction access.
pub mod csr;

/// Per-cycle orchestration of the FSM and datapath.
pub mod execution;

/// Data port requests and load completion.
pub mod memory;

/// Interrupt sampling and trap entry.
pub mod trap;

use crate::config::Config;
use crate::core::arch::{CsrFile, Gpr};
use crate::core::fsm::{Datapath, State};
use crate::stats::SimStats;

/// Main CPU structure containing all processor state.
#[derive(Debug)]
pub struct Cpu {
    /// General purpose registers.
    pub regs: Gpr,
    /// Control and Status Registers.
    pub csrs: CsrFile,
    /// FSM state register.
    pub state: State,
    /// Program counter and barrier registers.
    pub dp: Datapath,
    /// Performance statistics.
    pub stats: SimStats,
    /// Escalate undefined encodings to illegal-instruction traps.
    pub trap_illegal: bool,
    /// Enable per-state and per-retire trace events.
    pub trace: bool,
    reset_pc: u32,
}

impl Cpu {
    /// Creates a CPU in its reset state according to the configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: Gpr::new(),
            csrs: CsrFile::new(),
            state: State::Fetch,
            dp: Datapath::new(config.general.reset_pc),
            stats: SimStats::default(),
            trap_illegal: config.core.trap_illegal_instructions,
            trace: config.general.trace,
            reset_pc: config.general.reset_pc,
        }
    }

    /// Synchronous reset: FSM to FETCH, PC to the reset vector, registers and CSRs cleared.
    pub fn reset(&mut self) {
        self.regs = Gpr::new();
        self.csrs = CsrFile::new();
        self.state = State::Fetch;
        self.dp = Datapath::new(self.reset_pc);
        self.stats = SimStats::default();
    }

    /// Changes the reset vector and moves the PC there.
    ///
    /// Only meaningful before the first cycle, e.g. after loading an ELF entry point.
    pub fn set_reset_pc(&mut self, pc: u32) {
        self.reset_pc = pc;
        self.dp.pc = pc;
        self.dp.old_pc = pc;
    }

    /// Returns the program counter register.
    pub const fn pc(&self) -> u32 {
        self.dp.pc
    }

    /// Returns a printable dump of the PC, FSM state and registers.
    pub fn dump_state(&self) -> String {
        format!(
            "PC = {:#010x}  STATE = {}  IR = {:#010x}\n{}",
            self.dp.pc,
            self.state,
            self.dp.ir,
            self.regs.dump()
        )
    }
}
