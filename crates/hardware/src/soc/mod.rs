//! System-on-Chip components.
//!
//! This module organizes the components behind the core's memory port,
//! including the interconnect, main memory, devices, and the builder
//! for assembling the system.

/// System builder for assembling components.
pub mod builder;

/// Memory-mapped I/O device implementations.
pub mod devices;

/// Interconnect routing and wait-state timing.
pub mod interconnect;

/// Main memory.
pub mod memory;

/// Core-facing bus and device trait definitions.
pub mod traits;

pub use builder::System;
pub use interconnect::Interconnect;
pub use traits::{Bus, DataRequest, DataResponse, Device};
