//! Instruction Disassembler for RV32I and Zicsr.
//!
//! Converts a 32-bit instruction encoding into a human-readable mnemonic
//! string for trace logging, the `disasm` CLI command, and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use rvmc_core::isa::disasm::disassemble;
//! let text = disassemble(0x00A0_0513); // ADDI x10, x0, 10
//! assert_eq!(text, "addi a0, zero, 10");
//! ```

use crate::core::arch::csr;
use crate::isa::abi::name as xreg;
use crate::isa::decode;
use crate::isa::instruction::InstructionBits;
use crate::isa::privileged::opcodes as sys_op;
use crate::isa::rv32i::{funct3 as i_f3, funct7 as i_f7, opcodes as i_op};

/// Disassembles a 32-bit RISC-V instruction into a human-readable string.
///
/// Returns a mnemonic like `"add a0, a1, a2"` or `"unknown (0x...)"` for
/// unrecognised encodings. Immediates are printed as signed decimals; branch
/// and jump offsets are relative to the instruction's own address.
pub fn disassemble(inst: u32) -> String {
    let rd = inst.rd();
    let rs1 = inst.rs1();
    let rs2 = inst.rs2();
    let f3 = inst.funct3();
    let f7 = inst.funct7();

    match inst.opcode() {
        i_op::OP_REG => disasm_op_reg(rd, rs1, rs2, f3, f7),
        i_op::OP_IMM => disasm_op_imm(rd, rs1, f3, f7, decode::decode_i_type_imm(inst) as i32),

        i_op::OP_LOAD => {
            let mn = match f3 {
                i_f3::LB => "lb",
                i_f3::LH => "lh",
                i_f3::LW => "lw",
                i_f3::LBU => "lbu",
                i_f3::LHU => "lhu",
                _ => "l??",
            };
            let imm = decode::decode_i_type_imm(inst) as i32;
            format!("{mn} {}, {imm}({})", xreg(rd), xreg(rs1))
        }

        i_op::OP_STORE => {
            let mn = match f3 {
                i_f3::SB => "sb",
                i_f3::SH => "sh",
                i_f3::SW => "sw",
                _ => "s??",
            };
            let imm = decode::decode_s_type_imm(inst) as i32;
            format!("{mn} {}, {imm}({})", xreg(rs2), xreg(rs1))
        }

        i_op::OP_BRANCH => {
            let mn = match f3 {
                i_f3::BEQ => "beq",
                i_f3::BNE => "bne",
                i_f3::BLT => "blt",
                i_f3::BGE => "bge",
                i_f3::BLTU => "bltu",
                i_f3::BGEU => "bgeu",
                _ => "b??",
            };
            let imm = decode::decode_b_type_imm(inst) as i32;
            format!("{mn} {}, {}, {imm}", xreg(rs1), xreg(rs2))
        }

        i_op::OP_LUI => format!("lui {}, {:#x}", xreg(rd), inst >> 12),
        i_op::OP_AUIPC => format!("auipc {}, {:#x}", xreg(rd), inst >> 12),
        i_op::OP_JAL => format!("jal {}, {}", xreg(rd), decode::decode_j_type_imm(inst) as i32),
        i_op::OP_JALR => format!(
            "jalr {}, {}({})",
            xreg(rd),
            decode::decode_i_type_imm(inst) as i32,
            xreg(rs1)
        ),
        i_op::OP_MISC_MEM => "fence".to_string(),
        sys_op::OP_SYSTEM => disasm_system(inst, rd, rs1, f3),

        _ => format!("unknown ({inst:#010x})"),
    }
}

fn disasm_op_reg(rd: usize, rs1: usize, rs2: usize, f3: u32, f7: u32) -> String {
    let alt = f7 == i_f7::ALT;
    let mn = match (f3, alt) {
        (i_f3::ADD_SUB, false) => "add",
        (i_f3::ADD_SUB, true) => "sub",
        (i_f3::SLL, _) => "sll",
        (i_f3::SLT, _) => "slt",
        (i_f3::SLTU, _) => "sltu",
        (i_f3::XOR, _) => "xor",
        (i_f3::SRL_SRA, false) => "srl",
        (i_f3::SRL_SRA, true) => "sra",
        (i_f3::OR, _) => "or",
        (i_f3::AND, _) => "and",
        _ => "op??",
    };
    format!("{mn} {}, {}, {}", xreg(rd), xreg(rs1), xreg(rs2))
}

fn disasm_op_imm(rd: usize, rs1: usize, f3: u32, f7: u32, imm: i32) -> String {
    let shamt = imm & 0x1F;
    match f3 {
        i_f3::SLL => format!("slli {}, {}, {shamt}", xreg(rd), xreg(rs1)),
        i_f3::SRL_SRA => {
            let mn = if f7 == i_f7::ALT { "srai" } else { "srli" };
            format!("{mn} {}, {}, {shamt}", xreg(rd), xreg(rs1))
        }
        _ => {
            let mn = match f3 {
                i_f3::ADD_SUB => "addi",
                i_f3::SLT => "slti",
                i_f3::SLTU => "sltiu",
                i_f3::XOR => "xori",
                i_f3::OR => "ori",
                _ => "andi",
            };
            format!("{mn} {}, {}, {imm}", xreg(rd), xreg(rs1))
        }
    }
}

fn disasm_system(inst: u32, rd: usize, rs1: usize, f3: u32) -> String {
    match inst {
        sys_op::ECALL => return "ecall".to_string(),
        sys_op::EBREAK => return "ebreak".to_string(),
        sys_op::MRET => return "mret".to_string(),
        sys_op::WFI => return "wfi".to_string(),
        _ => {}
    }

    let addr = inst.csr();
    let csr_name = csr::name(addr).map_or_else(|| format!("{addr:#05x}"), str::to_string);
    let mn = match f3 {
        sys_op::CSRRW => "csrrw",
        sys_op::CSRRS => "csrrs",
        sys_op::CSRRC => "csrrc",
        sys_op::CSRRWI => return format!("csrrwi {}, {csr_name}, {rs1}", xreg(rd)),
        sys_op::CSRRSI => return format!("csrrsi {}, {csr_name}, {rs1}", xreg(rd)),
        sys_op::CSRRCI => return format!("csrrci {}, {csr_name}, {rs1}", xreg(rd)),
        _ => return format!("system?? ({inst:#010x})"),
    };
    format!("{mn} {}, {csr_name}, {}", xreg(rd), xreg(rs1))
}
