//! Branch Resolution Unit (BRU).
//!
//! Decides conditional branches from the ALU flags and selects the next PC.
//!
//! The ALU compares `rs1` and `rs2` with SUB (BEQ/BNE), SLT (BLT/BGE) or SLTU
//! (BLTU/BGEU). The zero flag then carries the answer: after SUB it means "equal",
//! after SLT/SLTU it means "not less than".

use crate::core::units::alu::AluFlags;
use crate::isa::rv32i::funct3;

/// Next-PC source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PcSelect {
    /// `PC + 4`.
    #[default]
    Sequential,
    /// `PC + imm` (taken branch or JAL).
    Target,
    /// ALU result with bit 0 cleared (JALR).
    Register,
}

impl PcSelect {
    /// Returns the 2-bit hardware encoding (0, 1, 2).
    pub const fn bits(self) -> u8 {
        match self {
            Self::Sequential => 0,
            Self::Target => 1,
            Self::Register => 2,
        }
    }
}

/// Evaluates a conditional branch.
///
/// # Arguments
///
/// * `branch` - The decoder's branch flag; nothing is taken without it.
/// * `f3` - Branch funct3.
/// * `flags` - Flags of the comparison performed by the ALU.
///
/// # Returns
///
/// `true` if the branch is taken. Undefined funct3 values are never taken.
///
/// # Examples
///
/// ```
/// use rvmc_core::core::units::alu::AluFlags;
/// use rvmc_core::core::units::bru::branch_taken;
///
/// let equal = AluFlags { zero: true, negative: false };
/// assert!(branch_taken(true, 0b000, equal)); // BEQ
/// assert!(!branch_taken(true, 0b001, equal)); // BNE
/// assert!(!branch_taken(false, 0b000, equal));
/// ```
pub const fn branch_taken(branch: bool, f3: u32, flags: AluFlags) -> bool {
    if !branch {
        return false;
    }
    match f3 {
        funct3::BEQ | funct3::BGE | funct3::BGEU => flags.zero,
        funct3::BNE | funct3::BLT | funct3::BLTU => !flags.zero,
        _ => false,
    }
}

/// Selects the next-PC source for a control-flow instruction.
///
/// # Arguments
///
/// * `jump` - JAL or JALR.
/// * `register` - The jump target comes from a register (JALR).
/// * `taken` - A conditional branch resolved taken.
pub const fn pc_select(jump: bool, register: bool, taken: bool) -> PcSelect {
    if jump && register {
        PcSelect::Register
    } else if jump || taken {
        PcSelect::Target
    } else {
        PcSelect::Sequential
    }
}

/// Produces the next PC for `select`.
///
/// # Arguments
///
/// * `select` - Source chosen by [`pc_select`].
/// * `pc_plus4` - Address of the following instruction.
/// * `target` - Precomputed `PC + imm`.
/// * `alu` - ALU result (`rs1 + imm` for JALR).
pub const fn next_pc(select: PcSelect, pc_plus4: u32, target: u32, alu: u32) -> u32 {
    match select {
        PcSelect::Sequential => pc_plus4,
        PcSelect::Target => target,
        PcSelect::Register => alu & !1,
    }
}
