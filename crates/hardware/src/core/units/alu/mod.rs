//! Arithmetic Logic Unit (ALU).
//!
//! The core has a single 32-bit ALU shared by every FSM state: it increments the PC
//! during fetch, precomputes branch and jump targets during decode, and executes,
//! forms addresses or compares in the later states.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub
//! - [`logic`]:      Or, And, Xor, Slt, Sltu
//! - [`shifts`]:     Sll, Srl, Sra

/// Integer arithmetic operations (add, subtract).
pub mod arithmetic;

/// Bitwise logical and comparison operations (or, and, xor, slt).
pub mod logic;

/// Shift operations (sll, srl, sra).
pub mod shifts;

use crate::core::control::signals::AluOp;

/// Status flags derived from an ALU result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AluFlags {
    /// The result is zero.
    pub zero: bool,
    /// Bit 31 of the result is set.
    pub negative: bool,
}

/// ALU result with its flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AluResult {
    /// 32-bit result.
    pub value: u32,
    /// Flags of `value`.
    pub flags: AluFlags,
}

/// Arithmetic Logic Unit (ALU) for RV32I integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// Dispatches to the appropriate submodule based on the operation type.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand
    /// * `b`  - Second operand (also the shift amount, low 5 bits)
    ///
    /// # Returns
    ///
    /// The 32-bit result together with its zero and negative flags.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvmc_core::core::units::alu::Alu;
    /// use rvmc_core::core::control::signals::AluOp;
    ///
    /// let r = Alu::execute(AluOp::Add, 42, 8);
    /// assert_eq!(r.value, 50);
    ///
    /// let r = Alu::execute(AluOp::Sub, 7, 7);
    /// assert!(r.flags.zero);
    ///
    /// // Signed comparison
    /// let r = Alu::execute(AluOp::Slt, (-5_i32) as u32, 10);
    /// assert_eq!(r.value, 1);
    ///
    /// let r = Alu::execute(AluOp::Sra, 0x8000_0000, 4);
    /// assert_eq!(r.value, 0xF800_0000);
    /// assert!(r.flags.negative);
    /// ```
    pub const fn execute(op: AluOp, a: u32, b: u32) -> AluResult {
        let value = match op {
            AluOp::Add | AluOp::Sub => arithmetic::execute(op, a, b),
            AluOp::Or | AluOp::And | AluOp::Xor | AluOp::Slt | AluOp::Sltu => {
                logic::execute(op, a, b)
            }
            AluOp::Sll | AluOp::Srl | AluOp::Sra => shifts::execute(op, a, b),
        };
        AluResult {
            value,
            flags: AluFlags {
                zero: value == 0,
                negative: value & 0x8000_0000 != 0,
            },
        }
    }
}
