//! Simulation driver and program loading.
//!
//! Provides the loader that turns image files into memory segments and the
//! simulator that clocks the core against the system.

/// Verilog-hex, ELF and raw binary image loading.
pub mod loader;

/// Core plus system run loop.
pub mod simulator;

pub use loader::{Image, ImageFormat, Segment, load_image};
pub use simulator::{RunOutcome, Simulator};
