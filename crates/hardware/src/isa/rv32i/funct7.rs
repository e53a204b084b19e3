//! RISC-V Base Integer (I) Function Codes (funct7).
//!
//! The `funct7` field (bits 31-25) is used in R-type instructions to
//! distinguish between operations that share the same `funct3` (e.g., ADD vs SUB).
//! Shift-immediates reuse the field above their 5-bit shift amount.

/// Default operation (ADD, SRL, etc.).
pub const DEFAULT: u32 = 0b0000000;

/// Alternate operation (SUB, SRA).
pub const ALT: u32 = 0b0100000;

/// Bit 5 of `funct7`, the only bit that selects an alternate operation in RV32I.
pub const ALT_BIT: u32 = 0b0100000;
