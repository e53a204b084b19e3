//! RISC-V Immediate Reconstruction and Encoding Legality.
//!
//! This module handles the parts of decoding that depend on the instruction format:
//! 1. **Immediates:** Sign-extended I/S/B/J immediates and the U-type upper immediate,
//!    all returned as two's-complement `u32` ready for the 32-bit datapath.
//! 2. **Legality:** Whether an encoding names an instruction the core implements.

use crate::isa::instruction::InstructionBits;
use crate::isa::privileged::opcodes as sys_ops;
use crate::isa::rv32i::{funct3, funct7, opcodes};

/// Total width of a RISC-V instruction in bits.
const INSTRUCTION_WIDTH: u32 = 32;

/// Bit shift for extracting I-Type immediate field (bits 20-31).
///
/// I-Type format: `imm[11:0] | rs1 | funct3 | rd | opcode`
/// The immediate occupies the upper 12 bits and is sign-extended.
const I_IMM_SHIFT: u32 = 20;

/// Bit shift for extracting S-Type immediate low field (bits 7-11).
///
/// S-Type format: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`
const S_IMM_LOW_SHIFT: u32 = 7;

/// Bit mask for S-Type immediate low field (5 bits: imm[4:0]).
const S_IMM_LOW_MASK: u32 = 0x1F;

/// Bit shift for extracting S-Type immediate high field (bits 25-31).
const S_IMM_HIGH_SHIFT: u32 = 25;

/// Bit mask for S-Type immediate high field (7 bits: imm[11:5]).
const S_IMM_HIGH_MASK: u32 = 0x7F;

/// Bit shift for combining S-Type immediate fields after extraction.
const S_IMM_COMBINED_SHIFT: u32 = 5;

/// Total number of bits in S-Type immediate (12 bits).
const S_IMM_BITS: u32 = 12;

/// B-Type format: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`
const B_IMM_11_SHIFT: u32 = 7;
const B_IMM_4_1_SHIFT: u32 = 8;
const B_IMM_4_1_MASK: u32 = 0xF;
const B_IMM_10_5_SHIFT: u32 = 25;
const B_IMM_10_5_MASK: u32 = 0x3F;
const B_IMM_12_SHIFT: u32 = 31;
const B_IMM_BITS: u32 = 13;

/// Bit mask for extracting U-Type immediate field (bits 12-31).
///
/// U-Type format: `imm[31:12] | rd | opcode`. The low 12 bits are zero-filled.
const U_IMM_MASK: u32 = 0xFFFF_F000;

/// J-Type format: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`
const J_IMM_19_12_SHIFT: u32 = 12;
const J_IMM_19_12_MASK: u32 = 0xFF;
const J_IMM_11_SHIFT: u32 = 20;
const J_IMM_10_1_SHIFT: u32 = 21;
const J_IMM_10_1_MASK: u32 = 0x3FF;
const J_IMM_20_SHIFT: u32 = 31;
const J_IMM_BITS: u32 = 21;

/// Returns the immediate encoded by `inst`, selecting the format from its opcode.
///
/// R-type, SYSTEM and unknown opcodes carry no immediate and yield 0.
///
/// # Examples
///
/// ```
/// use rvmc_core::isa::decode::immediate;
///
/// assert_eq!(immediate(0xFFF0_0093), (-1_i32) as u32); // addi x1, x0, -1
/// assert_eq!(immediate(0x1234_50B7), 0x1234_5000); // lui x1, 0x12345
/// ```
pub fn immediate(inst: u32) -> u32 {
    match inst.opcode() {
        opcodes::OP_IMM | opcodes::OP_LOAD | opcodes::OP_JALR => decode_i_type_imm(inst),
        opcodes::OP_STORE => decode_s_type_imm(inst),
        opcodes::OP_BRANCH => decode_b_type_imm(inst),
        opcodes::OP_LUI | opcodes::OP_AUIPC => decode_u_type_imm(inst),
        opcodes::OP_JAL => decode_j_type_imm(inst),
        _ => 0,
    }
}

/// Decodes the immediate value for I-Type instructions.
///
/// Used for Load, JALR, and Immediate Arithmetic instructions.
pub const fn decode_i_type_imm(inst: u32) -> u32 {
    ((inst as i32) >> I_IMM_SHIFT) as u32
}

/// Decodes the immediate value for S-Type instructions.
pub const fn decode_s_type_imm(inst: u32) -> u32 {
    let low = (inst >> S_IMM_LOW_SHIFT) & S_IMM_LOW_MASK;
    let high = (inst >> S_IMM_HIGH_SHIFT) & S_IMM_HIGH_MASK;
    sign_extend((high << S_IMM_COMBINED_SHIFT) | low, S_IMM_BITS)
}

/// Decodes the immediate value for B-Type instructions.
///
/// The immediate is a signed, even byte offset.
pub const fn decode_b_type_imm(inst: u32) -> u32 {
    let bit_11 = (inst >> B_IMM_11_SHIFT) & 1;
    let bits_4_1 = (inst >> B_IMM_4_1_SHIFT) & B_IMM_4_1_MASK;
    let bits_10_5 = (inst >> B_IMM_10_5_SHIFT) & B_IMM_10_5_MASK;
    let bit_12 = (inst >> B_IMM_12_SHIFT) & 1;

    let combined = (bit_12 << 12) | (bit_11 << 11) | (bits_10_5 << 5) | (bits_4_1 << 1);
    sign_extend(combined, B_IMM_BITS)
}

/// Decodes the immediate value for U-Type instructions (LUI, AUIPC).
pub const fn decode_u_type_imm(inst: u32) -> u32 {
    inst & U_IMM_MASK
}

/// Decodes the immediate value for J-Type instructions (JAL).
pub const fn decode_j_type_imm(inst: u32) -> u32 {
    let bits_19_12 = (inst >> J_IMM_19_12_SHIFT) & J_IMM_19_12_MASK;
    let bit_11 = (inst >> J_IMM_11_SHIFT) & 1;
    let bits_10_1 = (inst >> J_IMM_10_1_SHIFT) & J_IMM_10_1_MASK;
    let bit_20 = (inst >> J_IMM_20_SHIFT) & 1;

    let combined = (bit_20 << 20) | (bits_19_12 << 12) | (bit_11 << 11) | (bits_10_1 << 1);
    sign_extend(combined, J_IMM_BITS)
}

/// Sign extends the low `bits` of `val` to 32 bits.
const fn sign_extend(val: u32, bits: u32) -> u32 {
    let shift = INSTRUCTION_WIDTH - bits;
    (((val << shift) as i32) >> shift) as u32
}

/// Returns `true` when `inst` encodes an RV32I or Zicsr/M-mode instruction this core implements.
///
/// Checks the opcode and, for that opcode, the funct3/funct7/funct12 combination.
/// CSR addresses are not checked here; the CSR file rejects unknown addresses itself.
pub fn is_legal(inst: u32) -> bool {
    let f3 = inst.funct3();
    let f7 = inst.funct7();
    match inst.opcode() {
        opcodes::OP_LUI | opcodes::OP_AUIPC | opcodes::OP_JAL => true,
        opcodes::OP_JALR => f3 == 0,
        opcodes::OP_BRANCH => !matches!(f3, 0b010 | 0b011),
        opcodes::OP_LOAD => matches!(
            f3,
            funct3::LB | funct3::LH | funct3::LW | funct3::LBU | funct3::LHU
        ),
        opcodes::OP_STORE => matches!(f3, funct3::SB | funct3::SH | funct3::SW),
        opcodes::OP_IMM => match f3 {
            funct3::SLL => f7 == funct7::DEFAULT,
            funct3::SRL_SRA => f7 == funct7::DEFAULT || f7 == funct7::ALT,
            _ => true,
        },
        opcodes::OP_REG => match f7 {
            funct7::DEFAULT => true,
            funct7::ALT => matches!(f3, funct3::ADD_SUB | funct3::SRL_SRA),
            _ => false,
        },
        opcodes::OP_MISC_MEM => f3 == funct3::FENCE,
        sys_ops::OP_SYSTEM => match f3 {
            sys_ops::PRIV => matches!(
                inst,
                sys_ops::ECALL | sys_ops::EBREAK | sys_ops::MRET | sys_ops::WFI
            ),
            0b100 => false,
            _ => true,
        },
        _ => false,
    }
}
