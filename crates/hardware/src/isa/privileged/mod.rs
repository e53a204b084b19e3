//! Privileged Architecture Definitions.
//!
//! Constants for the machine-mode subset of the RISC-V Privileged Specification
//! implemented by the core.
//!
//! # Modules
//!
//! - `cause`: Exception and Interrupt cause codes.
//! - `opcodes`: System instruction encodings (ECALL, EBREAK, MRET, WFI, CSR*).

/// Exception and interrupt cause code definitions.
pub mod cause;

/// System instruction opcodes (ECALL, EBREAK, MRET, CSR access).
pub mod opcodes;
