//! Instruction Decoder.
//!
//! Maps a 7-bit opcode to its [`ControlIntent`]. The function is total: FENCE,
//! SYSTEM and every unknown opcode decode to [`ControlIntent::NOP`]. SYSTEM
//! instructions are sequenced by dedicated FSM states instead.

use crate::core::control::signals::{AluOpClass, ControlIntent, OpASrc, OpBSrc, WbSrc};
use crate::isa::instruction::OPCODE_MASK;
use crate::isa::rv32i::opcodes;

/// Decodes an opcode into its control intent.
///
/// Only the low seven bits of `opcode` are examined.
///
/// # Examples
///
/// ```
/// use rvmc_core::core::control::decoder::decode;
/// use rvmc_core::core::control::signals::{AluOpClass, ControlIntent, WbSrc};
///
/// let load = decode(0x03);
/// assert!(load.reg_write);
/// assert_eq!(load.wb_src, WbSrc::Mem);
/// assert_eq!(load.alu_class, AluOpClass::Address);
///
/// assert_eq!(decode(0x0F), ControlIntent::NOP); // FENCE
/// ```
pub const fn decode(opcode: u32) -> ControlIntent {
    let nop = ControlIntent::NOP;
    match opcode & OPCODE_MASK {
        opcodes::OP_REG => ControlIntent {
            reg_write: true,
            alu_class: AluOpClass::RegReg,
            ..nop
        },
        opcodes::OP_IMM => ControlIntent {
            reg_write: true,
            alu_src_b: OpBSrc::Imm,
            alu_class: AluOpClass::RegImm,
            ..nop
        },
        opcodes::OP_LOAD => ControlIntent {
            reg_write: true,
            alu_src_b: OpBSrc::Imm,
            wb_src: WbSrc::Mem,
            ..nop
        },
        opcodes::OP_STORE => ControlIntent {
            alu_src_b: OpBSrc::Imm,
            mem_write: true,
            ..nop
        },
        opcodes::OP_BRANCH => ControlIntent {
            branch: true,
            alu_class: AluOpClass::Branch,
            ..nop
        },
        opcodes::OP_JAL => ControlIntent {
            reg_write: true,
            wb_src: WbSrc::PcPlus4,
            jump: true,
            ..nop
        },
        opcodes::OP_JALR => ControlIntent {
            reg_write: true,
            alu_src_b: OpBSrc::Imm,
            wb_src: WbSrc::PcPlus4,
            jump: true,
            ..nop
        },
        opcodes::OP_LUI => ControlIntent {
            reg_write: true,
            alu_src_a: OpASrc::Zero,
            alu_src_b: OpBSrc::Imm,
            ..nop
        },
        opcodes::OP_AUIPC => ControlIntent {
            reg_write: true,
            alu_src_a: OpASrc::Pc,
            alu_src_b: OpBSrc::Imm,
            ..nop
        },
        _ => nop,
    }
}
