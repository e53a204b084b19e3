//! RISC-V Trap Cause Codes.
//!
//! Values written to `mcause`. Bit 31 distinguishes interrupts (1) from
//! exceptions (0); the constants below are the codes without that bit.

/// `mcause` flag marking an asynchronous interrupt.
pub const INTERRUPT_BIT: u32 = 0x8000_0000;

/// Interrupt codes (combined with [`INTERRUPT_BIT`] in `mcause`).
pub mod interrupt {
    /// Machine software interrupt.
    pub const MACHINE_SOFTWARE: u32 = 3;

    /// Machine timer interrupt.
    pub const MACHINE_TIMER: u32 = 7;

    /// Machine external interrupt.
    pub const MACHINE_EXTERNAL: u32 = 11;
}

/// Exception codes.
pub mod exception {
    /// Illegal instruction (2).
    pub const ILLEGAL_INSTRUCTION: u32 = 2;
    /// Breakpoint (3).
    pub const BREAKPOINT: u32 = 3;
    /// Environment call from M-mode (11).
    pub const ENVIRONMENT_CALL_FROM_M_MODE: u32 = 11;
}
