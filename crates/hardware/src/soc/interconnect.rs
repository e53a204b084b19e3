//! System interconnect for memory and MMIO access.
//!
//! This module implements the bus that routes core accesses to devices. It provides:
//! 1. **Device registration:** Devices are added by address range and sorted for lookup.
//! 2. **Access routing:** Read/write by address with a last-device hint.
//! 3. **Handshake timing:** Configurable read and write wait states on the data port.
//! 4. **Tick and IRQ:** Each device is ticked and its interrupt outputs are merged.

use std::fmt;

use tracing::warn;

use super::traits::{Bus, DataRequest, DataResponse, Device};
use crate::common::{AccessType, SimError, constants::WORD_ALIGN_MASK};
use crate::core::arch::trap::InterruptLines;

/// A data-port request waiting out its wait states.
#[derive(Clone, Copy, Debug)]
struct Pending {
    req: DataRequest,
    remaining: u32,
}

/// System interconnect connecting the core and devices; routes accesses by address.
pub struct Interconnect {
    devices: Vec<Box<dyn Device>>,
    /// Cycles of `ready = 0` before a read completes.
    pub read_wait_states: u32,
    /// Cycles of `ready = 0` before a write completes.
    pub write_wait_states: u32,
    pending: Option<Pending>,
    last_device_idx: usize,
    ram_idx: Option<usize>,
    console_idx: Option<usize>,
}

impl Interconnect {
    /// Creates an empty interconnect with the given data-port wait states.
    pub fn new(read_wait_states: u32, write_wait_states: u32) -> Self {
        Self {
            devices: Vec::new(),
            read_wait_states,
            write_wait_states,
            pending: None,
            last_device_idx: 0,
            ram_idx: None,
            console_idx: None,
        }
    }

    /// Registers a device; devices are sorted by base address for lookup.
    pub fn add_device(&mut self, dev: Box<dyn Device>) {
        self.devices.push(dev);
        self.devices.sort_by_key(|d| d.address_range().0);
        self.ram_idx = self.devices.iter().position(|d| d.name() == "RAM");
        self.console_idx = self.devices.iter().position(|d| d.as_console().is_some());
        self.last_device_idx = 0;
    }

    /// Returns the names of the registered devices in address order.
    pub fn device_names(&self) -> Vec<&str> {
        self.devices.iter().map(|d| d.name()).collect()
    }

    /// Writes a binary blob into memory at the given address.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ImageOutOfRange`] if no single device covers the whole blob.
    pub fn load_binary_at(&mut self, data: &[u8], addr: u32) -> Result<(), SimError> {
        let out_of_range = SimError::ImageOutOfRange {
            addr,
            len: data.len(),
        };
        let Some((dev, offset)) = self.find_device(addr) else {
            return Err(out_of_range);
        };
        let (_, size) = dev.address_range();
        if u64::from(offset) + data.len() as u64 > u64::from(size) {
            return Err(out_of_range);
        }
        dev.write_bytes(offset, data);
        Ok(())
    }

    /// Returns whether the given address is backed by any device.
    pub fn is_valid_address(&self, addr: u32) -> bool {
        self.devices.iter().any(|dev| contains(dev.as_ref(), addr))
    }

    /// Reads the aligned word containing `addr`, or `None` if the address is unmapped.
    ///
    /// Bypasses wait states; used by the loader, tests and the debugger-style dump.
    pub fn read_word(&mut self, addr: u32) -> Option<u32> {
        self.find_device(addr)
            .map(|(dev, offset)| dev.read(offset & WORD_ALIGN_MASK))
    }

    /// Writes a full word at the aligned address containing `addr`; no-op if unmapped.
    pub fn write_word(&mut self, addr: u32, data: u32) {
        if let Some((dev, offset)) = self.find_device(addr) {
            dev.write(offset & WORD_ALIGN_MASK, data, 0b1111);
        }
    }

    /// Returns everything the console device has printed so far.
    pub fn console_output(&self) -> String {
        self.console_idx
            .and_then(|idx| self.devices.get(idx))
            .and_then(|dev| dev.as_console())
            .map(|console| console.transcript())
            .unwrap_or_default()
    }

    fn access(&mut self, req: &DataRequest) -> u32 {
        let kind = if req.write {
            AccessType::Write
        } else {
            AccessType::Read
        };
        match self.find_device(req.addr) {
            Some((dev, offset)) => {
                let offset = offset & WORD_ALIGN_MASK;
                if req.write {
                    dev.write(offset, req.data, req.byte_enable);
                    0
                } else {
                    dev.read(offset)
                }
            }
            None => {
                warn!(addr = format_args!("{:#010x}", req.addr), %kind, "unmapped access");
                0
            }
        }
    }

    fn find_device(&mut self, addr: u32) -> Option<(&mut Box<dyn Device>, u32)> {
        if let Some(dev) = self.devices.get(self.last_device_idx) {
            if contains(dev.as_ref(), addr) {
                let base = dev.address_range().0;
                return Some((&mut self.devices[self.last_device_idx], addr - base));
            }
        }

        if let Some(idx) = self.ram_idx {
            if contains(self.devices[idx].as_ref(), addr) {
                self.last_device_idx = idx;
                let base = self.devices[idx].address_range().0;
                return Some((&mut self.devices[idx], addr - base));
            }
        }

        let idx = self
            .devices
            .iter()
            .position(|dev| contains(dev.as_ref(), addr))?;
        self.last_device_idx = idx;
        let base = self.devices[idx].address_range().0;
        Some((&mut self.devices[idx], addr - base))
    }
}

impl fmt::Debug for Interconnect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interconnect")
            .field("devices", &self.device_names())
            .field("read_wait_states", &self.read_wait_states)
            .field("write_wait_states", &self.write_wait_states)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl Bus for Interconnect {
    fn fetch(&mut self, addr: u32) -> u32 {
        match self.find_device(addr) {
            Some((dev, offset)) => dev.read(offset & WORD_ALIGN_MASK),
            None => {
                warn!(addr = format_args!("{addr:#010x}"), kind = %AccessType::Fetch, "unmapped access");
                0
            }
        }
    }

    fn data(&mut self, req: &DataRequest) -> DataResponse {
        let remaining = match self.pending {
            Some(pending) if pending.req == *req => pending.remaining,
            _ if req.write => self.write_wait_states,
            _ => self.read_wait_states,
        };

        if remaining > 0 {
            self.pending = Some(Pending {
                req: *req,
                remaining: remaining - 1,
            });
            return DataResponse::WAIT;
        }

        self.pending = None;
        DataResponse::ready(self.access(req))
    }

    fn interrupts(&self) -> InterruptLines {
        self.devices
            .iter()
            .fold(InterruptLines::default(), |lines, dev| {
                lines.merge(dev.interrupts())
            })
    }

    fn tick(&mut self) {
        for dev in &mut self.devices {
            dev.tick();
        }
    }
}

fn contains(dev: &dyn Device, addr: u32) -> bool {
    let (start, size) = dev.address_range();
    addr >= start && u64::from(addr) < u64::from(start) + u64::from(size)
}
