//! Main Execution FSM.
//!
//! The core executes one instruction at a time as a walk through named states,
//! advancing exactly one state per clock edge:
//!
//! ```text
//! FETCH -> DECODE -> EXECUTE_R / EXECUTE_I / UPPER_IMM -> WRITE_BACK -> FETCH
//!                 -> MEM_ADDR -> MEM_READ -> WRITE_BACK -> FETCH
//!                             -> MEM_WRITE -> FETCH
//!                 -> BRANCH | JAL | JALR | CSR | MRET -> FETCH
//!                 -> TRAP -> FETCH
//! ```
//!
//! 1. **States:** [`State`], the FSM register.
//! 2. **Control:** [`control::outputs`] drives the per-state control signals and
//!    [`control::next_state`] picks the successor.
//! 3. **Datapath:** [`datapath::Datapath`] holds the PC and the barrier registers
//!    carried between states.

/// Per-state control outputs and next-state logic.
pub mod control;

/// Program counter and barrier registers.
pub mod datapath;

use std::fmt;

use crate::common::error::Trap;

pub use control::{MicroOps, Transition};
pub use datapath::Datapath;

/// FSM state register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum State {
    /// Fetch `IR <- mem[PC]`, latch OldPC, `PC <- PC + 4`. Interrupts are taken here.
    #[default]
    Fetch,
    /// Read `rs1`/`rs2` into Reg A/Reg B and precompute `OldPC + imm` into ALUOut.
    Decode,
    /// Register-register ALU operation into ALUOut.
    ExecuteR,
    /// Register-immediate ALU operation into ALUOut.
    ExecuteI,
    /// LUI (`0 + imm`) or AUIPC (`OldPC + imm`) into ALUOut.
    UpperImm,
    /// Effective address `rs1 + imm` into ALUOut.
    MemAddr,
    /// Data read; repeats until the memory is ready, then fills the MDR.
    MemRead,
    /// Data write; repeats until the memory is ready.
    MemWrite,
    /// Register write from ALUOut or the MDR.
    WriteBack,
    /// Compare, and write the precomputed target into PC if taken.
    Branch,
    /// `rd <- PC`, `PC <- target`.
    Jal,
    /// `rd <- PC`, `PC <- (rs1 + imm) & !1`.
    Jalr,
    /// Atomic CSR read-modify-write, `rd <- old value`.
    Csr,
    /// Trap return: `PC <- mepc`, `MIE <- MPIE`.
    Mret,
    /// Trap entry: save `epc` and cause, `PC <- mtvec`.
    Trap {
        /// Exception or interrupt being taken.
        trap: Trap,
        /// PC saved into `mepc`.
        epc: u32,
    },
}

impl State {
    /// Returns the state's name as used in traces.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Fetch => "FETCH",
            Self::Decode => "DECODE",
            Self::ExecuteR => "EXECUTE_R",
            Self::ExecuteI => "EXECUTE_I",
            Self::UpperImm => "UPPER_IMM",
            Self::MemAddr => "MEM_ADDR",
            Self::MemRead => "MEM_READ",
            Self::MemWrite => "MEM_WRITE",
            Self::WriteBack => "WRITE_BACK",
            Self::Branch => "BRANCH",
            Self::Jal => "JAL",
            Self::Jalr => "JALR",
            Self::Csr => "CSR",
            Self::Mret => "MRET",
            Self::Trap { .. } => "TRAP",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trap { trap, epc } => write!(f, "TRAP({trap} @ {epc:#010x})"),
            _ => f.write_str(self.name()),
        }
    }
}
