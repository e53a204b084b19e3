//! Combinational control logic.
//!
//! This module holds the pure functions that turn instruction bits into control
//! signals. None of them keep state; the FSM evaluates them once per state:
//! 1. **Signals:** Plain-data control bundles and selector enums.
//! 2. **Decoder:** Opcode to [`ControlIntent`](signals::ControlIntent).
//! 3. **ALU Control:** Operation class, funct3 and funct7 to a concrete ALU operation.

/// Opcode decoder producing the per-instruction control intent.
pub mod decoder;

/// ALU-control resolver.
pub mod alu_control;

/// Control signal bundles and selector enums.
pub mod signals;

pub use alu_control::resolve;
pub use decoder::decode;
pub use signals::{AluOp, AluOpClass, ControlIntent, CsrOp, MemWidth, OpASrc, OpBSrc, WbSrc};
