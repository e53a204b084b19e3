//! Multi-cycle RV32I core simulator CLI.
//!
//! This binary is the command-line front end of the simulator. It performs:
//! 1. **Run:** Load a program image, build the system from config, run to halt, report statistics.
//! 2. **Disassemble:** Print every word of a program image with its disassembly.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rvmc_core::config::Config;
use rvmc_core::isa::disasm::disassemble;
use rvmc_core::sim::{RunOutcome, Simulator, load_image};

/// Exit status when the cycle budget runs out before the program halts.
const EXIT_CYCLE_LIMIT: i32 = 124;

#[derive(Parser, Debug)]
#[command(
    name = "rvmc",
    author,
    version,
    about = "Cycle-accurate multi-cycle RV32I + Zicsr core simulator",
    long_about = "Run a bare-metal RV32I program on a multi-cycle FSM core.\n\nImages may be objcopy verilog hex (.hex), ELF32 executables, or raw binaries.\n\nExamples:\n  rvmc run program.hex --stats\n  rvmc run program.elf --config slow_mem.json --trace\n  rvmc disasm program.hex"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program until it halts through the console or the cycle budget runs out.
    Run {
        /// Program image (verilog hex, ELF32, or raw binary).
        image: PathBuf,

        /// JSON configuration file. Without one, console output is echoed to stdout.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the cycle budget.
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Trace every FSM state and retired instruction.
        #[arg(long)]
        trace: bool,

        /// Print the statistics report after the run.
        #[arg(long)]
        stats: bool,
    },

    /// Print the disassembly of every word in a program image.
    Disasm {
        /// Program image (verilog hex, ELF32, or raw binary).
        image: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let trace = matches!(cli.command, Commands::Run { trace: true, .. });
    init_tracing(trace);

    let result = match cli.command {
        Commands::Run {
            image,
            config,
            max_cycles,
            trace,
            stats,
        } => cmd_run(&image, config.as_deref(), max_cycles, trace, stats),
        Commands::Disasm { image } => cmd_disasm(&image),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the fmt subscriber; `RUST_LOG` overrides the default filter.
fn init_tracing(trace: bool) {
    let default = if trace { "info,rvmc_core=trace" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads and runs a program; returns the process exit status.
fn cmd_run(
    image_path: &Path,
    config_path: Option<&Path>,
    max_cycles: Option<u64>,
    trace: bool,
    stats: bool,
) -> Result<i32, rvmc_core::common::SimError> {
    let mut config = Config::for_cli(config_path)?;
    if let Some(n) = max_cycles {
        config.general.max_cycles = n;
    }
    config.general.trace |= trace;

    let image = load_image(image_path, config.memory.ram_base)?;
    let mut sim = Simulator::new(&config);
    sim.load(&image)?;

    info!(
        image = %image_path.display(),
        bytes = image.len(),
        reset_pc = format_args!("{:#010x}", sim.cpu.pc()),
        "starting"
    );

    let outcome = sim.run();
    let code = match outcome {
        RunOutcome::Halted { code } => {
            info!(code, cycles = sim.cpu.stats.cycles, "halted");
            code as i32
        }
        RunOutcome::CycleLimit => {
            eprintln!("{}", sim.cpu.dump_state());
            EXIT_CYCLE_LIMIT
        }
    };

    if stats {
        sim.cpu.stats.print();
    }
    Ok(code)
}

/// Prints `address: word  mnemonic` for every word of the image.
fn cmd_disasm(image_path: &Path) -> Result<i32, rvmc_core::common::SimError> {
    let image = load_image(image_path, Config::default().memory.ram_base)?;
    for (addr, word) in image.words() {
        println!("{addr:08x}:  {word:08x}  {}", disassemble(word));
    }
    Ok(0)
}
