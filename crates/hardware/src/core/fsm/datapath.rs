//! Datapath registers.
//!
//! The program counter and the barrier registers that carry values between FSM
//! states, letting one ALU and one memory port serve every step of an instruction.
//! Reg A, Reg B and MDR each have one writer state. ALUOut has two writer phases:
//! DECODE precomputes the branch/jump target, then an execute or address state
//! (EXECUTE_R, EXECUTE_I, UPPER_IMM, MEM_ADDR) overwrites it with its result.

use crate::common::constants::{NOP, RESET_PC};

/// Program counter and barrier registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Datapath {
    /// Program counter. Points past the current instruction once FETCH completes.
    pub pc: u32,
    /// Address of the instruction in IR (written by FETCH).
    pub old_pc: u32,
    /// Instruction register (written by FETCH).
    pub ir: u32,
    /// `rs1` value (written by DECODE).
    pub reg_a: u32,
    /// `rs2` value (written by DECODE).
    pub reg_b: u32,
    /// ALU result. Written by DECODE (branch/jump target) and again by the
    /// execute or address state (result or effective address).
    pub alu_out: u32,
    /// Memory data register, formatted load data (written by MEM_READ).
    pub mdr: u32,
}

impl Datapath {
    /// Creates the datapath in its reset state with the PC at `reset_pc`.
    pub const fn new(reset_pc: u32) -> Self {
        Self {
            pc: reset_pc,
            old_pc: reset_pc,
            ir: NOP,
            reg_a: 0,
            reg_b: 0,
            alu_out: 0,
            mdr: 0,
        }
    }
}

impl Default for Datapath {
    fn default() -> Self {
        Self::new(RESET_PC)
    }
}
