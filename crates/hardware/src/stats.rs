//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the multi-cycle core. It provides:
//! 1. **Cycle and CPI:** Total cycles, retired instructions, and derived metrics.
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch, system).
//! 3. **Stalls:** Cycles spent waiting on the data port.
//! 4. **Traps and memory:** Exceptions, interrupts, and data-port transactions.

use std::fmt::Write as _;
use std::time::Instant;

use crate::isa::privileged::opcodes as sys_ops;
use crate::isa::rv32i::opcodes;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions retired.
    pub instructions_retired: u64,

    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of branch/jump instructions retired.
    pub inst_branch: u64,
    /// Count of ALU (register, immediate, upper-immediate) instructions retired.
    pub inst_alu: u64,
    /// Count of system (CSR, MRET, FENCE, WFI) instructions retired.
    pub inst_system: u64,

    /// Cycles the core spent waiting for the data port to become ready.
    pub stalls_mem: u64,

    /// Number of synchronous exceptions taken.
    pub traps_taken: u64,
    /// Number of interrupts taken.
    pub interrupts_taken: u64,

    /// Completed data-port reads.
    pub mem_reads: u64,
    /// Completed data-port writes.
    pub mem_writes: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_alu: 0,
            inst_system: 0,
            stalls_mem: 0,
            traps_taken: 0,
            interrupts_taken: 0,
            mem_reads: 0,
            mem_writes: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"core"`, `"instruction_mix"`, `"memory"`.
/// Pass an empty slice to `report_sections` to include all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "core", "instruction_mix", "memory"];

const RULE: &str = "==========================================================";
const THIN_RULE: &str = "----------------------------------------------------------";

impl SimStats {
    /// Counts one retired instruction under the category of its opcode.
    pub fn record_retire(&mut self, opcode: u32) {
        self.instructions_retired += 1;
        match opcode {
            opcodes::OP_LOAD => self.inst_load += 1,
            opcodes::OP_STORE => self.inst_store += 1,
            opcodes::OP_BRANCH | opcodes::OP_JAL | opcodes::OP_JALR => self.inst_branch += 1,
            opcodes::OP_MISC_MEM | sys_ops::OP_SYSTEM => self.inst_system += 1,
            _ => self.inst_alu += 1,
        }
    }

    /// Returns cycles per retired instruction, or 0.0 before the first retire.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Renders the requested statistics sections.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an empty
    /// slice to render every section.
    pub fn report_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64().max(f64::EPSILON);
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64, of: f64| (n as f64 / of) * 100.0;
        let mut out = String::new();

        // Writing into a String cannot fail.
        if want("summary") {
            let khz = (self.cycles as f64 / seconds) / 1000.0;
            let _ = writeln!(out, "{RULE}");
            let _ = writeln!(out, "RV32I MULTI-CYCLE CORE STATISTICS");
            let _ = writeln!(out, "{RULE}");
            let _ = writeln!(out, "host_seconds             {seconds:.4} s");
            let _ = writeln!(out, "sim_cycles               {}", self.cycles);
            let _ = writeln!(out, "sim_freq                 {khz:.2} kHz");
            let _ = writeln!(out, "sim_insts                {}", self.instructions_retired);
            let _ = writeln!(out, "sim_cpi                  {:.4}", self.cpi());
            let _ = writeln!(out, "{THIN_RULE}");
        }
        if want("core") {
            let _ = writeln!(out, "CORE BREAKDOWN");
            let _ = writeln!(
                out,
                "  stalls.memory          {} ({:.2}%)",
                self.stalls_mem,
                pct(self.stalls_mem, cyc)
            );
            let _ = writeln!(out, "  traps.exceptions       {}", self.traps_taken);
            let _ = writeln!(out, "  traps.interrupts       {}", self.interrupts_taken);
            let _ = writeln!(out, "{THIN_RULE}");
        }
        if want("instruction_mix") {
            let _ = writeln!(out, "INSTRUCTION MIX");
            for (name, count) in [
                ("op.alu", self.inst_alu),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.branch", self.inst_branch),
                ("op.system", self.inst_system),
            ] {
                let _ = writeln!(out, "  {name:<22} {count} ({:.2}%)", pct(count, instr));
            }
            let _ = writeln!(out, "{THIN_RULE}");
        }
        if want("memory") {
            let _ = writeln!(out, "DATA PORT");
            let _ = writeln!(out, "  mem.reads              {}", self.mem_reads);
            let _ = writeln!(out, "  mem.writes             {}", self.mem_writes);
        }
        let _ = writeln!(out, "{RULE}");
        out
    }

    /// Renders every statistics section.
    pub fn report(&self) -> String {
        self.report_sections(&[])
    }

    /// Prints only the requested statistics sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.report_sections(sections));
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
