//! Core processor implementation.
//!
//! This module contains the multi-cycle core: the architectural register files,
//! the combinational control and execution units, the FSM that sequences them,
//! and the `Cpu` that ties them together one clock at a time.

/// Architectural state (CSRs, general purpose registers, interrupt lines).
pub mod arch;

/// Combinational control (decoder, ALU control, signal bundles).
pub mod control;

/// CPU core and per-cycle orchestration.
pub mod cpu;

/// Main execution FSM (states, control outputs, datapath registers).
pub mod fsm;

/// Execution units (ALU, branch unit, load/store unit).
pub mod units;

pub use self::cpu::Cpu;
