//! Execution units.
//!
//! The combinational units shared by the FSM states: the ALU, the branch
//! resolution unit, and the load/store formatting unit.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch Resolution Unit: branch conditions and next-PC selection.
pub mod bru;

/// Load/Store Unit: lane positioning, byte enables and load extension.
pub mod lsu;
