//! Global architectural constants.
//!
//! Values here are fixed by RV32I and by the reset behavior of the core; anything a
//! user may want to change lives in [`crate::config`] instead.

/// Size of an RV32I instruction in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Number of general-purpose integer registers.
pub const GPR_COUNT: usize = 32;

/// Width of a data word in bytes.
pub const WORD_BYTES: u32 = 4;

/// Mask that aligns an address down to its containing word.
pub const WORD_ALIGN_MASK: u32 = !(WORD_BYTES - 1);

/// Program counter value forced by reset.
pub const RESET_PC: u32 = 0x0000_0000;

/// Canonical NOP encoding (`addi x0, x0, 0`).
pub const NOP: u32 = 0x0000_0013;
