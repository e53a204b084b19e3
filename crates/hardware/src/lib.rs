//! Cycle-accurate multi-cycle RV32I + Zicsr machine-mode core.
//!
//! This crate models a single-issue core that walks every instruction through a
//! finite-state machine, one state per clock, with the following:
//! 1. **Core:** FSM, barrier registers, GPRs, and the machine-mode CSR file with traps.
//! 2. **Control:** Opcode decoder, ALU-control resolver, and per-state control outputs.
//! 3. **ISA:** RV32I and Zicsr encodings, immediates, legality checks, and a disassembler.
//! 4. **SoC:** Valid/ready data port, interconnect with wait states, RAM, and MMIO devices.
//! 5. **Simulation:** Loader, configuration, run loop, and statistics collection.

/// Common types and constants (traps, errors, access types).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// CPU core (arch, control, FSM, execution units).
pub mod core;
/// Instruction set (decode, instruction fields, ABI names, disassembly).
pub mod isa;
/// Image loader and simulator run loop.
pub mod sim;
/// System-on-chip (builder, bus, devices, memory, traits).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Main CPU type; holds registers, CSRs, FSM state and stats.
pub use crate::core::Cpu;
/// Simulator driving a `Cpu` against a `System`.
pub use crate::sim::Simulator;
/// Top-level system (interconnect, memory, devices); construct with `System::new`.
pub use crate::soc::System;
