//! Simulator: owns both the core and the system side-by-side.
//!
//! The core borrows the system's interconnect for each cycle, so neither has to
//! hold a reference to the other.

use tracing::info;

use super::loader::Image;
use crate::common::SimError;
use crate::config::Config;
use crate::core::Cpu;
use crate::soc::{Bus, System};

/// Why [`Simulator::run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The program wrote the console halt register.
    Halted {
        /// Value written to the halt register.
        code: u32,
    },
    /// The cycle budget ran out first.
    CycleLimit,
}

/// Top-level simulator: core state plus the system behind its memory port.
#[derive(Debug)]
pub struct Simulator {
    /// Core architectural and FSM state.
    pub cpu: Cpu,
    /// Interconnect, memory and devices.
    pub system: System,
    max_cycles: u64,
}

impl Simulator {
    /// Creates a simulator with a freshly reset core and system.
    pub fn new(config: &Config) -> Self {
        Self {
            cpu: Cpu::new(config),
            system: System::new(config),
            max_cycles: config.general.max_cycles,
        }
    }

    /// Loads every segment of `image` and adopts its entry point as the reset PC.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ImageOutOfRange`] if a segment does not fit in memory.
    pub fn load(&mut self, image: &Image) -> Result<(), SimError> {
        for seg in &image.segments {
            self.system.load(seg.addr, &seg.data)?;
        }
        if let Some(entry) = image.entry {
            info!(entry = format_args!("{entry:#010x}"), "entry point");
            self.cpu.set_reset_pc(entry);
        }
        Ok(())
    }

    /// Advances the simulator by one clock cycle.
    ///
    /// # Returns
    ///
    /// `true` if an instruction retired at this clock edge.
    pub fn tick(&mut self) -> bool {
        self.system.bus.tick();
        self.cpu.tick(&mut self.system.bus)
    }

    /// Runs until the program halts or the configured cycle budget is spent.
    pub fn run(&mut self) -> RunOutcome {
        self.run_for(self.max_cycles)
    }

    /// Runs until the program halts or `max_cycles` more cycles have elapsed.
    pub fn run_for(&mut self, max_cycles: u64) -> RunOutcome {
        for _ in 0..max_cycles {
            if let Some(code) = self.take_exit() {
                return RunOutcome::Halted { code };
            }
            let _ = self.tick();
        }
        match self.take_exit() {
            Some(code) => RunOutcome::Halted { code },
            None => {
                info!(cycles = self.cpu.stats.cycles, "cycle limit reached");
                RunOutcome::CycleLimit
            }
        }
    }

    /// Retrieves the exit code if the program has halted.
    pub fn take_exit(&self) -> Option<u32> {
        self.system.exit_code()
    }

    /// Returns the console output printed so far.
    pub fn console_output(&self) -> String {
        self.system.bus.console_output()
    }
}
