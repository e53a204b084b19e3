//! RISC-V architectural state.
//!
//! This module contains the state visible to software:
//! 1. **CSRs:** Machine-mode Control and Status Registers with atomic access and the
//!    hardware trap-entry / trap-return path.
//! 2. **GPRs:** General-Purpose Register file.
//! 3. **Traps:** Interrupt input lines and pending-interrupt selection.

/// Control and Status Register (CSR) definitions and access logic.
pub mod csr;

/// General-Purpose Register file implementation.
pub mod gpr;

/// Interrupt lines and pending-interrupt selection.
pub mod trap;

pub use csr::CsrFile;
pub use gpr::Gpr;
pub use trap::{InterruptLines, TrapHandler};
