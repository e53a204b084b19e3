//! Main memory (RAM).
//!
//! A flat little-endian byte array mapped at a base address. Word reads and
//! byte-enabled word writes are the only access shapes the interconnect uses.

use std::fmt;

use crate::core::units::lsu::Lsu;
use crate::soc::traits::Device;

/// System memory device.
pub struct Memory {
    data: Vec<u8>,
    base_addr: u32,
}

impl Memory {
    /// Creates zero-filled memory of `size` bytes mapped at `base_addr`.
    ///
    /// The size is rounded up to a whole number of words.
    pub fn new(base_addr: u32, size: u32) -> Self {
        let size = (size as usize + 3) & !3;
        Self {
            data: vec![0; size],
            base_addr,
        }
    }

    /// Copies `data` into memory at the given byte offset; out-of-range tails are dropped.
    pub fn load(&mut self, data: &[u8], offset: usize) {
        let end = (offset + data.len()).min(self.data.len());
        if offset < end {
            self.data[offset..end].copy_from_slice(&data[..end - offset]);
        }
    }

    /// Returns the raw contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memory")
            .field("base_addr", &format_args!("{:#010x}", self.base_addr))
            .field("size", &self.data.len())
            .finish()
    }
}

impl Device for Memory {
    fn name(&self) -> &str {
        "RAM"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, self.data.len() as u32)
    }

    fn read(&mut self, offset: u32) -> u32 {
        let i = offset as usize;
        match self.data.get(i..i + 4) {
            Some(&[b0, b1, b2, b3]) => u32::from_le_bytes([b0, b1, b2, b3]),
            _ => 0,
        }
    }

    fn write(&mut self, offset: u32, data: u32, byte_enable: u8) {
        let old = self.read(offset);
        let merged = Lsu::merge(old, data, byte_enable);
        let i = offset as usize;
        if let Some(word) = self.data.get_mut(i..i + 4) {
            word.copy_from_slice(&merged.to_le_bytes());
        }
    }

    fn write_bytes(&mut self, offset: u32, data: &[u8]) {
        self.load(data, offset as usize);
    }

    fn as_memory_mut(&mut self) -> Option<&mut Memory> {
        Some(self)
    }
}
