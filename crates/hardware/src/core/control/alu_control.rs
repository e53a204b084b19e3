//! ALU-Control Resolver.
//!
//! Refines the decoder's two-bit operation class plus funct3/funct7 into one of the
//! ten ALU operations. Bit 5 of funct7 selects SUB and SRA for register-register
//! instructions and SRAI for shift-immediates; ADDI ignores it.

use crate::core::control::signals::{AluOp, AluOpClass};
use crate::isa::rv32i::{funct3, funct7};

/// Resolves the concrete ALU operation.
///
/// # Arguments
///
/// * `class` - Decoder operation class.
/// * `f3` - Instruction funct3.
/// * `f7` - Instruction funct7 (for shift-immediates, bits 31:25 above the shift amount).
///
/// # Returns
///
/// The ALU operation. Unrecognized combinations resolve to [`AluOp::Add`].
///
/// # Examples
///
/// ```
/// use rvmc_core::core::control::alu_control::resolve;
/// use rvmc_core::core::control::signals::{AluOp, AluOpClass};
///
/// assert_eq!(resolve(AluOpClass::RegReg, 0b000, 0b0100000), AluOp::Sub);
/// assert_eq!(resolve(AluOpClass::RegImm, 0b000, 0b0100000), AluOp::Add);
/// assert_eq!(resolve(AluOpClass::Branch, 0b110, 0), AluOp::Sltu);
/// ```
pub const fn resolve(class: AluOpClass, f3: u32, f7: u32) -> AluOp {
    let alt = f7 & funct7::ALT_BIT != 0;
    match class {
        AluOpClass::Address => AluOp::Add,
        AluOpClass::Branch => match f3 {
            0b000 | 0b001 => AluOp::Sub,
            0b100 | 0b101 => AluOp::Slt,
            0b110 | 0b111 => AluOp::Sltu,
            _ => AluOp::Add,
        },
        AluOpClass::RegReg => match f3 {
            funct3::ADD_SUB if alt => AluOp::Sub,
            funct3::SRL_SRA if alt => AluOp::Sra,
            _ => by_funct3(f3),
        },
        AluOpClass::RegImm => match f3 {
            funct3::ADD_SUB => AluOp::Add,
            funct3::SRL_SRA if alt => AluOp::Sra,
            _ => by_funct3(f3),
        },
    }
}

/// Base funct3 table shared by register-register and register-immediate forms.
const fn by_funct3(f3: u32) -> AluOp {
    match f3 {
        funct3::SLL => AluOp::Sll,
        funct3::SLT => AluOp::Slt,
        funct3::SLTU => AluOp::Sltu,
        funct3::XOR => AluOp::Xor,
        funct3::SRL_SRA => AluOp::Srl,
        funct3::OR => AluOp::Or,
        funct3::AND => AluOp::And,
        _ => AluOp::Add,
    }
}
