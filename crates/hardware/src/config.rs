//! Configuration for the multi-cycle core and its test-bench system.
//!
//! This module defines the configuration structures used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline reset vector, memory map and timing constants.
//! 2. **Structures:** Hierarchical config for general, core, memory, and MMIO settings.
//! 3. **Loading:** JSON parsing from a string or a file.
//!
//! Every field is optional in JSON; omitted fields take the values in `defaults`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::SimError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Program counter after reset.
    pub const RESET_PC: u32 = crate::common::constants::RESET_PC;

    /// Cycle budget for `Simulator::run` (10 million cycles).
    pub const MAX_CYCLES: u64 = 10_000_000;

    /// Base address of main RAM.
    pub const RAM_BASE: u32 = 0x0000_0000;

    /// Total size of main RAM (1 MiB).
    pub const RAM_SIZE: u32 = 1024 * 1024;

    /// Base address of the console MMIO region.
    pub const CONSOLE_BASE: u32 = 0x1000_0000;

    /// Address of the interrupt trigger register.
    pub const IRQ_TRIGGER_ADDR: u32 = 0x2000_0000;

    /// Length of a triggered timer pulse, in cycles.
    ///
    /// Long enough to survive the slowest instruction so the pulse is seen in FETCH.
    pub const IRQ_PULSE_CYCLES: u32 = 100;

    /// Base address of CLINT (Core Local Interruptor) timer MMIO region.
    pub const CLINT_BASE: u32 = 0x0200_0000;

    /// CLINT timer divider (mtime increments every N cycles).
    pub const CLINT_DIVIDER: u32 = 1;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use rvmc_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.general.reset_pc, 0);
/// assert_eq!(config.memory.ram_size, 1024 * 1024);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use rvmc_core::config::Config;
///
/// let json = r#"{
///     "general": { "max_cycles": 5000 },
///     "memory": { "read_wait_states": 2 }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.general.max_cycles, 5000);
/// assert_eq!(config.memory.read_wait_states, 2);
/// assert_eq!(config.memory.write_wait_states, 0);
/// assert!(config.core.trap_illegal_instructions);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General simulation settings
    pub general: GeneralConfig,
    /// Core behaviour switches
    pub core: CoreConfig,
    /// Main memory placement and timing
    pub memory: MemoryConfig,
    /// Memory-mapped device placement
    pub mmio: MmioConfig,
}

impl Config {
    /// Parses a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] on malformed JSON or mistyped fields.
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be read, or [`SimError::Config`]
    /// if its contents are not a valid configuration.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Loads the configuration for a command-line run.
    ///
    /// A file, when given, is used exactly as written. Without one the
    /// defaults apply, with console output mirrored to stdout.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_json_file`].
    pub fn for_cli(path: Option<&Path>) -> Result<Self, SimError> {
        match path {
            Some(path) => Self::from_json_file(path),
            None => {
                let mut config = Self::default();
                config.mmio.console_echo = true;
                Ok(config)
            }
        }
    }
}

/// General simulation settings.
///
/// Contains the reset vector, the cycle budget, and instruction tracing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Program counter after reset (overridden by an ELF entry point)
    #[serde(default = "GeneralConfig::default_reset_pc")]
    pub reset_pc: u32,

    /// Cycle budget before `run` gives up
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,

    /// Emit a trace event for every state and retired instruction
    #[serde(default)]
    pub trace: bool,
}

impl GeneralConfig {
    /// Returns the default reset program counter.
    fn default_reset_pc() -> u32 {
        defaults::RESET_PC
    }

    /// Returns the default cycle budget.
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            reset_pc: defaults::RESET_PC,
            max_cycles: defaults::MAX_CYCLES,
            trace: false,
        }
    }
}

/// Core behaviour switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Raise an illegal-instruction trap (cause 2) on undefined encodings.
    /// When false they retire as NOPs.
    #[serde(default = "CoreConfig::default_trap_illegal")]
    pub trap_illegal_instructions: bool,
}

impl CoreConfig {
    fn default_trap_illegal() -> bool {
        true
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            trap_illegal_instructions: true,
        }
    }
}

/// Main memory configuration.
///
/// Wait states model a slow memory: the data port holds `ready` low for that
/// many cycles before completing each request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Main RAM base address
    #[serde(default = "MemoryConfig::default_ram_base")]
    pub ram_base: u32,

    /// Main RAM size in bytes
    #[serde(default = "MemoryConfig::default_ram_size")]
    pub ram_size: u32,

    /// Wait states before a data read completes
    #[serde(default)]
    pub read_wait_states: u32,

    /// Wait states before a data write completes
    #[serde(default)]
    pub write_wait_states: u32,
}

impl MemoryConfig {
    /// Returns the default RAM base address.
    fn default_ram_base() -> u32 {
        defaults::RAM_BASE
    }

    /// Returns the default RAM size in bytes.
    fn default_ram_size() -> u32 {
        defaults::RAM_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            ram_base: defaults::RAM_BASE,
            ram_size: defaults::RAM_SIZE,
            read_wait_states: 0,
            write_wait_states: 0,
        }
    }
}

/// Memory-mapped device placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MmioConfig {
    /// Console MMIO base address
    #[serde(default = "MmioConfig::default_console_base")]
    pub console_base: u32,

    /// Mirror console output to stdout
    #[serde(default)]
    pub console_echo: bool,

    /// Interrupt trigger register address
    #[serde(default = "MmioConfig::default_irq_trigger_addr")]
    pub irq_trigger_addr: u32,

    /// Cycles the triggered timer line stays high
    #[serde(default = "MmioConfig::default_irq_pulse_cycles")]
    pub irq_pulse_cycles: u32,

    /// CLINT (timer) MMIO base address
    #[serde(default = "MmioConfig::default_clint_base")]
    pub clint_base: u32,

    /// CLINT timer divider (mtime increments every N cycles)
    #[serde(default = "MmioConfig::default_clint_divider")]
    pub clint_divider: u32,
}

impl MmioConfig {
    /// Returns the default console base address.
    fn default_console_base() -> u32 {
        defaults::CONSOLE_BASE
    }

    /// Returns the default interrupt trigger address.
    fn default_irq_trigger_addr() -> u32 {
        defaults::IRQ_TRIGGER_ADDR
    }

    /// Returns the default trigger pulse length.
    fn default_irq_pulse_cycles() -> u32 {
        defaults::IRQ_PULSE_CYCLES
    }

    /// Returns the default CLINT MMIO base address.
    fn default_clint_base() -> u32 {
        defaults::CLINT_BASE
    }

    /// Returns the default CLINT timer divider value.
    fn default_clint_divider() -> u32 {
        defaults::CLINT_DIVIDER
    }
}

impl Default for MmioConfig {
    fn default() -> Self {
        Self {
            console_base: defaults::CONSOLE_BASE,
            console_echo: false,
            irq_trigger_addr: defaults::IRQ_TRIGGER_ADDR,
            irq_pulse_cycles: defaults::IRQ_PULSE_CYCLES,
            clint_base: defaults::CLINT_BASE,
            clint_divider: defaults::CLINT_DIVIDER,
        }
    }
}
