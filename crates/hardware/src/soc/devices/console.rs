//! Test-bench console.
//!
//! A write-only device used by bare-metal programs to report results and stop
//! the simulation.
//!
//! # Registers
//!
//! * `0x0`: Character out (low byte of the written lane)
//! * `0x4`: Integer out (signed decimal followed by a newline)
//! * `0x8`: Halt (the written value becomes the exit code)
//!
//! Byte and halfword stores are narrowed to their width: the integer register
//! sign-extends them and the halt register zero-extends them.

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

use crate::soc::traits::Device;

/// Offset of the character output register.
pub const CHAR_OFFSET: u32 = 0x0;
/// Offset of the integer output register.
pub const INT_OFFSET: u32 = 0x4;
/// Offset of the halt register.
pub const HALT_OFFSET: u32 = 0x8;

/// Console device structure.
#[derive(Debug)]
pub struct Console {
    base_addr: u32,
    /// Everything printed so far.
    transcript: Vec<u8>,
    /// Mirror output to the host's stdout.
    echo: bool,
    /// Shared exit code; `u64::MAX` while running.
    exit_signal: Arc<AtomicU64>,
}

impl Console {
    /// Creates a console at `base_addr` that reports halts through `exit_signal`.
    pub fn new(base_addr: u32, echo: bool, exit_signal: Arc<AtomicU64>) -> Self {
        Self {
            base_addr,
            transcript: Vec::new(),
            echo,
            exit_signal,
        }
    }

    /// Returns the output printed so far, lossily decoded as UTF-8.
    pub fn transcript(&self) -> String {
        String::from_utf8_lossy(&self.transcript).into_owned()
    }

    fn emit(&mut self, bytes: &[u8]) {
        self.transcript.extend_from_slice(bytes);
        if self.echo {
            let mut out = io::stdout();
            let _ = out.write_all(bytes);
            let _ = out.flush();
        }
    }
}

impl Device for Console {
    fn name(&self) -> &str {
        "CONSOLE"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, 0x10)
    }

    fn read(&mut self, _offset: u32) -> u32 {
        0
    }

    fn write(&mut self, offset: u32, data: u32, byte_enable: u8) {
        // Narrow stores land in their byte lane; realign to the lowest enabled lane.
        let lanes = byte_enable & 0xF;
        let value = data >> (8 * (lanes.trailing_zeros() % 4));
        let (unsigned, signed) = match lanes.count_ones() {
            1 => (value & 0xFF, i32::from(value as u8 as i8)),
            2 => (value & 0xFFFF, i32::from(value as u16 as i16)),
            _ => (value, value as i32),
        };
        match offset {
            CHAR_OFFSET => self.emit(&[value as u8]),
            INT_OFFSET => {
                let line = format!("{signed}\n");
                self.emit(line.as_bytes());
            }
            HALT_OFFSET => {
                info!(code = unsigned, "console halt");
                self.exit_signal.store(u64::from(unsigned), Ordering::Relaxed);
            }
            _ => {}
        }
    }

    fn as_console(&self) -> Option<&Console> {
        Some(self)
    }
}
