//! Core Local Interruptor (CLINT).
//!
//! The CLINT block holds memory-mapped control and status registers associated
//! with software and timer interrupts.
//!
//! # Memory Map
//!
//! * `0x0000`: MSIP (Machine Software Interrupt Pending, bit 0)
//! * `0x4000`: MTIMECMP low word, `0x4004` high word
//! * `0xBFF8`: MTIME low word, `0xBFFC` high word

use crate::core::arch::trap::InterruptLines;
use crate::core::units::lsu::Lsu;
use crate::soc::traits::Device;

/// Offset for the Machine Software Interrupt Pending register.
const MSIP_OFFSET: u32 = 0x0000;
/// Offset for the Machine Time Compare register.
const MTIMECMP_OFFSET: u32 = 0x4000;
/// Offset for the Machine Time register.
const MTIME_OFFSET: u32 = 0xBFF8;

/// CLINT device structure.
#[derive(Debug)]
pub struct Clint {
    /// Base address of the device.
    base_addr: u32,
    /// Current machine time counter.
    mtime: u64,
    /// Machine time compare register.
    mtimecmp: u64,
    /// Machine software interrupt pending register.
    msip: u32,
    /// Divider to scale CPU cycles to timer ticks.
    divider: u32,
    /// Internal counter for the divider.
    counter: u32,
}

impl Clint {
    /// Creates a new CLINT device.
    ///
    /// # Arguments
    ///
    /// * `base_addr` - The base address.
    /// * `divider` - The ratio of CPU cycles to timer ticks (e.g., 10 means timer increments every 10 cycles).
    pub const fn new(base_addr: u32, divider: u32) -> Self {
        Self {
            base_addr,
            mtime: 0,
            mtimecmp: u64::MAX,
            msip: 0,
            divider: if divider == 0 { 1 } else { divider },
            counter: 0,
        }
    }

    /// Returns the current machine time.
    pub const fn mtime(&self) -> u64 {
        self.mtime
    }
}

fn set_low(reg: u64, word: u32) -> u64 {
    (reg & 0xFFFF_FFFF_0000_0000) | u64::from(word)
}

fn set_high(reg: u64, word: u32) -> u64 {
    (reg & 0x0000_0000_FFFF_FFFF) | (u64::from(word) << 32)
}

impl Device for Clint {
    fn name(&self) -> &str {
        "CLINT"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, 0x10000)
    }

    /// Handles reads to MSIP, and the lower/upper halves of MTIME and MTIMECMP.
    fn read(&mut self, offset: u32) -> u32 {
        match offset {
            MSIP_OFFSET => self.msip,
            MTIMECMP_OFFSET => self.mtimecmp as u32,
            o if o == MTIMECMP_OFFSET + 4 => (self.mtimecmp >> 32) as u32,
            MTIME_OFFSET => self.mtime as u32,
            o if o == MTIME_OFFSET + 4 => (self.mtime >> 32) as u32,
            _ => 0,
        }
    }

    /// Handles writes to MSIP, and the lower/upper halves of MTIME and MTIMECMP.
    fn write(&mut self, offset: u32, data: u32, byte_enable: u8) {
        let val = Lsu::merge(self.read(offset), data, byte_enable);
        match offset {
            MSIP_OFFSET => self.msip = val & 1,
            MTIMECMP_OFFSET => self.mtimecmp = set_low(self.mtimecmp, val),
            o if o == MTIMECMP_OFFSET + 4 => self.mtimecmp = set_high(self.mtimecmp, val),
            MTIME_OFFSET => self.mtime = set_low(self.mtime, val),
            o if o == MTIME_OFFSET + 4 => self.mtime = set_high(self.mtime, val),
            _ => {}
        }
    }

    /// Increments `mtime` based on the configured divider.
    fn tick(&mut self) {
        self.counter += 1;
        if self.counter >= self.divider {
            self.mtime = self.mtime.wrapping_add(1);
            self.counter = 0;
        }
    }

    fn interrupts(&self) -> InterruptLines {
        InterruptLines {
            timer: self.mtime >= self.mtimecmp,
            software: self.msip & 1 != 0,
            external: false,
        }
    }
}
