//! Common types shared across the core model.
//!
//! This module provides the building blocks used by every other part of the crate:
//! 1. **Constants:** Architectural widths and reset values.
//! 2. **Memory Access:** Classification of bus accesses (fetch, read, write).
//! 3. **Error Handling:** Architectural traps and host-side simulator errors.

/// Architectural constants (instruction size, register count, reset vector).
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Trap and simulator error definitions.
pub mod error;

pub use data::AccessType;
pub use error::{SimError, Trap};
