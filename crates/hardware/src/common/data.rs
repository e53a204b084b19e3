//! Memory Access Types.
//!
//! Classifies accesses crossing the core's memory ports. The classification is used for:
//! 1. **Routing diagnostics:** Unmapped-address warnings name the kind of access.
//! 2. **Statistics Tracking:** Separating data reads from data writes.

use std::fmt;

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch on the always-ready instruction port.
    Fetch,

    /// Data read issued from the memory-read state.
    Read,

    /// Data write issued from the memory-write state.
    Write,
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch => write!(f, "fetch"),
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}
