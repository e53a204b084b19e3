//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains definitions for opcodes, function codes, and decoding logic, organized
//! by RISC-V extension.
//!
//! # Extensions
//!
//! * `rv32i`: Base Integer Instruction Set (32-bit).
//! * `privileged`: Machine-mode system instructions, Zicsr, and trap causes.

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Immediate reconstruction and encoding legality checks.
pub mod decode;

/// Instruction disassembler for trace logging and diagnostics.
pub mod disasm;

/// Instruction field extraction utilities.
pub mod instruction;

/// Privileged architecture definitions (system instructions, trap causes).
pub mod privileged;

/// Base integer instruction set (RV32I).
pub mod rv32i;
