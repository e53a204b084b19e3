//! Interfaces between the core and its collaborators.
//!
//! This module defines the two traits that connect the core to the rest of the system:
//! 1. **Bus:** The core's view of memory. A single-cycle instruction port, a data port
//!    with a `valid`/`ready` handshake, and the three machine interrupt lines.
//! 2. **Device:** A memory-mapped component attached to the interconnect, with
//!    word-granular reads, byte-enabled writes, a per-cycle tick and interrupt outputs.

use crate::core::arch::trap::InterruptLines;
use crate::core::control::signals::MemWidth;
use crate::soc::devices::Console;
use crate::soc::memory::Memory;

/// Request presented on the data port while `valid` is asserted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DataRequest {
    /// Effective byte address.
    pub addr: u32,
    /// Write data, already shifted into its byte lanes.
    pub data: u32,
    /// Byte-enable mask for writes (bit 0 is byte 0 of the word).
    pub byte_enable: u8,
    /// Write (`true`) or read (`false`).
    pub write: bool,
    /// Access width.
    pub width: MemWidth,
    /// Load is sign-extended.
    pub signed: bool,
}

/// Response of the data port for one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DataResponse {
    /// The request completed this cycle.
    pub ready: bool,
    /// Aligned word containing the read data (valid when `ready` on a read).
    pub data: u32,
}

impl DataResponse {
    /// A response that keeps the core waiting.
    pub const WAIT: Self = Self {
        ready: false,
        data: 0,
    };

    /// A completed response carrying `data`.
    pub const fn ready(data: u32) -> Self {
        Self { ready: true, data }
    }
}

/// The core's memory and interrupt interface.
///
/// The core calls [`Bus::data`] once per cycle for as long as it holds a request
/// valid; it never withdraws a request before `ready`. A bus that never answers
/// `ready` stalls the core forever.
pub trait Bus {
    /// Reads the instruction word at `addr`. Always completes in the calling cycle.
    fn fetch(&mut self, addr: u32) -> u32;

    /// Presents `req` on the data port for one cycle.
    fn data(&mut self, req: &DataRequest) -> DataResponse;

    /// Returns the current level of the interrupt lines.
    fn interrupts(&self) -> InterruptLines;

    /// Advances bus-side state by one clock cycle.
    fn tick(&mut self) {}
}

/// Trait for memory-mapped devices attached to the interconnect.
///
/// Offsets passed to a device are relative to its base address and word aligned.
pub trait Device: Send + Sync {
    /// Returns a short name for this device (e.g., `"RAM"`, `"CLINT"`).
    fn name(&self) -> &str;

    /// Returns (base_address, size_in_bytes) for this device's region.
    fn address_range(&self) -> (u32, u32);

    /// Reads the word at the given device-relative offset.
    fn read(&mut self, offset: u32) -> u32;

    /// Writes the enabled bytes of `data` to the word at `offset`.
    fn write(&mut self, offset: u32, data: u32, byte_enable: u8);

    /// Writes a contiguous byte slice at the given offset (default: byte-by-byte).
    fn write_bytes(&mut self, offset: u32, data: &[u8]) {
        for (addr, byte) in (offset..).zip(data) {
            let lane = addr & 0b11;
            self.write(addr & !0b11, u32::from(*byte) << (lane * 8), 1 << lane);
        }
    }

    /// Advances device state by one cycle.
    fn tick(&mut self) {}

    /// Returns the interrupt lines this device is driving.
    fn interrupts(&self) -> InterruptLines {
        InterruptLines::default()
    }

    /// Returns a reference as `Console` if this device is the console; otherwise `None`.
    fn as_console(&self) -> Option<&Console> {
        None
    }

    /// Returns a mutable reference as `Memory` if this device is RAM; otherwise `None`.
    fn as_memory_mut(&mut self) -> Option<&mut Memory> {
        None
    }
}
