//! RISC-V General-Purpose Register File.
//!
//! This module implements the General-Purpose Register (GPR) file for RV32I.
//! It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`) of 32 bits.
//! 2. **Invariant Enforcement:** Ensures that register `x0` is hardwired to zero.
//! 3. **Debugging:** Provides utilities for dumping the complete register state.

use std::fmt::Write as _;

use crate::common::constants::GPR_COUNT;
use crate::isa::abi;

/// General-Purpose Register file.
///
/// Read combinationally, written synchronously at the FSM's write-back step.
/// Register `x0` is hardwired to zero and cannot be modified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u32; GPR_COUNT],
}

impl Gpr {
    /// Creates a new general-purpose register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The 32-bit value stored in the specified register. Register `x0` always returns 0.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 {
            0
        } else {
            self.regs.get(idx).copied().unwrap_or(0)
        }
    }

    /// Writes a value to a general-purpose register.
    ///
    /// Writes to `x0` and out-of-range indices are discarded.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The 32-bit value to write.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx == 0 {
            return;
        }
        if let Some(reg) = self.regs.get_mut(idx) {
            *reg = val;
        }
    }

    /// Formats all registers in pairs with their ABI names for diagnostics.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for i in (0..GPR_COUNT).step_by(2) {
            let _ = writeln!(
                out,
                "x{:<2} {:>4} = {:#010x}   x{:<2} {:>4} = {:#010x}",
                i,
                abi::name(i),
                self.read(i),
                i + 1,
                abi::name(i + 1),
                self.read(i + 1)
            );
        }
        out
    }
}
