//! Control and Status Register (CSR) definitions and operations.
//!
//! This module implements the machine-mode CSR file of the core. It provides:
//! 1. **Address Definitions:** Constants for every implemented CSR.
//! 2. **Field Masks:** Bitmasks for `mstatus`, `mie` and `mip`.
//! 3. **Register Storage:** The `CsrFile` struct holding architectural state.
//! 4. **Clocked Update:** One write port resolved by priority each cycle:
//!    trap entry, then `mret`, then the software CSR instruction.
//!
//! `mip` is never stored. It is recomputed from the interrupt lines on every read.

use crate::core::arch::trap::{InterruptLines, TrapHandler};
use crate::core::control::signals::CsrOp;
use crate::common::error::Trap;

/// Machine status register CSR address.
pub const MSTATUS: u32 = 0x300;
/// Machine ISA register CSR address.
pub const MISA: u32 = 0x301;
/// Machine interrupt enable register CSR address.
pub const MIE: u32 = 0x304;
/// Machine trap vector base address register CSR address.
pub const MTVEC: u32 = 0x305;
/// Machine scratch register CSR address.
pub const MSCRATCH: u32 = 0x340;
/// Machine exception program counter CSR address.
pub const MEPC: u32 = 0x341;
/// Machine cause register CSR address.
pub const MCAUSE: u32 = 0x342;
/// Machine trap value register CSR address.
pub const MTVAL: u32 = 0x343;
/// Machine interrupt pending register CSR address.
pub const MIP: u32 = 0x344;

/// Machine cycle counter, low word.
pub const MCYCLE: u32 = 0xB00;
/// Machine retired-instruction counter, low word.
pub const MINSTRET: u32 = 0xB02;
/// Machine cycle counter, high word.
pub const MCYCLEH: u32 = 0xB80;
/// Machine retired-instruction counter, high word.
pub const MINSTRETH: u32 = 0xB82;

/// User-level read-only shadow of `mcycle`.
pub const CYCLE: u32 = 0xC00;
/// User-level read-only shadow of `minstret`.
pub const INSTRET: u32 = 0xC02;
/// User-level read-only shadow of `mcycleh`.
pub const CYCLEH: u32 = 0xC80;
/// User-level read-only shadow of `minstreth`.
pub const INSTRETH: u32 = 0xC82;

/// Machine vendor ID CSR address.
pub const MVENDORID: u32 = 0xF11;
/// Machine architecture ID CSR address.
pub const MARCHID: u32 = 0xF12;
/// Machine implementation ID CSR address.
pub const MIMPID: u32 = 0xF13;
/// Machine hardware thread ID CSR address.
pub const MHARTID: u32 = 0xF14;

/// `mstatus.MIE`: global machine interrupt enable.
pub const MSTATUS_MIE: u32 = 1 << 3;
/// `mstatus.MPIE`: interrupt enable saved on trap entry.
pub const MSTATUS_MPIE: u32 = 1 << 7;
/// Bits of `mstatus` that software can change.
pub const MSTATUS_WRITABLE: u32 = MSTATUS_MIE | MSTATUS_MPIE;

/// `mie.MSIE`: machine software interrupt enable.
pub const MIE_MSIE: u32 = 1 << 3;
/// `mie.MTIE`: machine timer interrupt enable.
pub const MIE_MTIE: u32 = 1 << 7;
/// `mie.MEIE`: machine external interrupt enable.
pub const MIE_MEIE: u32 = 1 << 11;
/// Bits of `mie` backed by storage.
pub const MIE_WRITABLE: u32 = MIE_MSIE | MIE_MTIE | MIE_MEIE;

/// `mip.MSIP`: machine software interrupt pending.
pub const MIP_MSIP: u32 = 1 << 3;
/// `mip.MTIP`: machine timer interrupt pending.
pub const MIP_MTIP: u32 = 1 << 7;
/// `mip.MEIP`: machine external interrupt pending.
pub const MIP_MEIP: u32 = 1 << 11;

/// `mtvec` is hardwired to direct mode: the low two bits always read as zero.
pub const MTVEC_BASE_MASK: u32 = !0b11;

/// `misa` value for RV32I: MXL=1 (32-bit) and the `I` extension bit.
pub const MISA_RV32I: u32 = (1 << 30) | (1 << 8);

/// Returns `true` for addresses in the read-only CSR space (`csr[11:10] == 0b11`).
pub const fn is_read_only(addr: u32) -> bool {
    (addr >> 10) & 0b11 == 0b11
}

/// Returns the architectural name of an implemented CSR.
pub const fn name(addr: u32) -> Option<&'static str> {
    Some(match addr {
        MSTATUS => "mstatus",
        MISA => "misa",
        MIE => "mie",
        MTVEC => "mtvec",
        MSCRATCH => "mscratch",
        MEPC => "mepc",
        MCAUSE => "mcause",
        MTVAL => "mtval",
        MIP => "mip",
        MCYCLE => "mcycle",
        MINSTRET => "minstret",
        MCYCLEH => "mcycleh",
        MINSTRETH => "minstreth",
        CYCLE => "cycle",
        INSTRET => "instret",
        CYCLEH => "cycleh",
        INSTRETH => "instreth",
        MVENDORID => "mvendorid",
        MARCHID => "marchid",
        MIMPID => "mimpid",
        MHARTID => "mhartid",
        _ => return None,
    })
}

/// Computes the value a CSR instruction would write.
///
/// `RS` and `RC` with a zero operand request a pure read and produce no write image,
/// as does [`CsrOp::None`].
///
/// # Examples
///
/// ```
/// use rvmc_core::core::arch::csr::write_image;
/// use rvmc_core::core::control::signals::CsrOp;
///
/// assert_eq!(write_image(CsrOp::Rs, 0b1010, 0b0101), Some(0b1111));
/// assert_eq!(write_image(CsrOp::Rc, 0b1111, 0b0101), Some(0b1010));
/// assert_eq!(write_image(CsrOp::Rs, 0b1010, 0), None);
/// ```
pub const fn write_image(op: CsrOp, old: u32, operand: u32) -> Option<u32> {
    match op {
        CsrOp::None => None,
        CsrOp::Rw => Some(operand),
        CsrOp::Rs if operand == 0 => None,
        CsrOp::Rs => Some(old | operand),
        CsrOp::Rc if operand == 0 => None,
        CsrOp::Rc => Some(old & !operand),
    }
}

/// Software CSR access issued by a CSR instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CsrWrite {
    /// 12-bit CSR address.
    pub addr: u32,
    /// Read/Write, Read/Set or Read/Clear.
    pub op: CsrOp,
    /// Register value or zero-extended immediate.
    pub operand: u32,
}

/// Hardware trap-entry request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrapEntry {
    /// PC saved into `mepc`.
    pub epc: u32,
    /// Value written to `mcause`.
    pub cause: u32,
    /// Value written to `mtval`.
    pub tval: u32,
}

impl TrapEntry {
    /// Builds the entry request for `trap` taken at `epc`.
    pub const fn new(trap: Trap, epc: u32) -> Self {
        Self {
            epc,
            cause: trap.cause(),
            tval: trap.tval(),
        }
    }
}

/// Inputs of the CSR file's single clocked update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CsrPort {
    /// Software CSR instruction access (lowest priority).
    pub write: Option<CsrWrite>,
    /// Trap entry (highest priority).
    pub trap: Option<TrapEntry>,
    /// Trap return.
    pub mret: bool,
    /// An instruction retires at this clock edge.
    pub retire: bool,
}

/// Machine-mode Control and Status Registers.
#[derive(Clone, Debug, Default)]
pub struct CsrFile {
    /// Machine status (`MIE`, `MPIE`).
    pub mstatus: u32,
    /// Machine interrupt enable.
    pub mie: u32,
    /// Trap vector base (direct mode).
    pub mtvec: u32,
    /// Scratch register for the trap handler.
    pub mscratch: u32,
    /// Exception program counter.
    pub mepc: u32,
    /// Trap cause.
    pub mcause: u32,
    /// Trap value.
    pub mtval: u32,
    /// Cycle counter.
    pub mcycle: u64,
    /// Retired instruction counter.
    pub minstret: u64,
    lines: InterruptLines,
}

impl CsrFile {
    /// Creates a CSR file in its reset state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples the interrupt input lines. `mip` reflects them immediately.
    pub const fn set_interrupt_lines(&mut self, lines: InterruptLines) {
        self.lines = lines;
    }

    /// Returns the currently sampled interrupt lines.
    pub const fn interrupt_lines(&self) -> InterruptLines {
        self.lines
    }

    /// Returns the pending-interrupt vector computed from the input lines.
    pub const fn mip(&self) -> u32 {
        self.lines.mip()
    }

    /// Returns the interrupt the core should take before its next fetch, if any.
    pub fn pending_interrupt(&self) -> Option<Trap> {
        TrapHandler::pending_interrupt(self.mstatus, self.mie, self.mip())
    }

    /// Reads a CSR combinationally.
    ///
    /// # Arguments
    ///
    /// * `addr` - 12-bit CSR address.
    ///
    /// # Returns
    ///
    /// The CSR value, or `None` when `addr` does not name an implemented CSR.
    pub const fn read(&self, addr: u32) -> Option<u32> {
        Some(match addr {
            MSTATUS => self.mstatus,
            MISA => MISA_RV32I,
            MIE => self.mie,
            MTVEC => self.mtvec,
            MSCRATCH => self.mscratch,
            MEPC => self.mepc,
            MCAUSE => self.mcause,
            MTVAL => self.mtval,
            MIP => self.mip(),
            MCYCLE | CYCLE => self.mcycle as u32,
            MCYCLEH | CYCLEH => (self.mcycle >> 32) as u32,
            MINSTRET | INSTRET => self.minstret as u32,
            MINSTRETH | INSTRETH => (self.minstret >> 32) as u32,
            MVENDORID | MARCHID | MIMPID | MHARTID => 0,
            _ => return None,
        })
    }

    /// Applies one clock edge.
    ///
    /// Counters advance first. Then exactly one of trap entry, `mret`, or the software
    /// write takes effect, in that priority order; a lower-priority request asserted in
    /// the same cycle is discarded.
    ///
    /// # Arguments
    ///
    /// * `port` - This cycle's requests.
    ///
    /// # Returns
    ///
    /// The pre-write value of the CSR addressed by `port.write`, or `None` when there is
    /// no software access or its address is not implemented.
    pub fn clock(&mut self, port: &CsrPort) -> Option<u32> {
        let old = port.write.and_then(|w| self.read(w.addr));

        self.mcycle = self.mcycle.wrapping_add(1);
        if port.retire {
            self.minstret = self.minstret.wrapping_add(1);
        }

        if let Some(entry) = port.trap {
            self.enter_trap(entry);
        } else if port.mret {
            self.return_from_trap();
        } else if let (Some(w), Some(old)) = (port.write, old) {
            if let Some(new) = write_image(w.op, old, w.operand) {
                self.store(w.addr, new);
            }
        }

        old
    }

    /// Trap entry: save PC, cause and value, then push `MIE` into `MPIE` and clear `MIE`.
    fn enter_trap(&mut self, entry: TrapEntry) {
        self.mepc = entry.epc;
        self.mcause = entry.cause;
        self.mtval = entry.tval;
        let mie = self.mstatus & MSTATUS_MIE != 0;
        self.mstatus &= !(MSTATUS_MIE | MSTATUS_MPIE);
        if mie {
            self.mstatus |= MSTATUS_MPIE;
        }
    }

    /// Trap return: pop `MPIE` into `MIE` and set `MPIE`.
    fn return_from_trap(&mut self) {
        let mpie = self.mstatus & MSTATUS_MPIE != 0;
        self.mstatus &= !MSTATUS_MIE;
        if mpie {
            self.mstatus |= MSTATUS_MIE;
        }
        self.mstatus |= MSTATUS_MPIE;
    }

    /// Writes a CSR with its WARL masks applied. `misa`, `mip` and read-only CSRs ignore writes.
    fn store(&mut self, addr: u32, val: u32) {
        match addr {
            MSTATUS => self.mstatus = val & MSTATUS_WRITABLE,
            MIE => self.mie = val & MIE_WRITABLE,
            MTVEC => self.mtvec = val & MTVEC_BASE_MASK,
            MSCRATCH => self.mscratch = val,
            MEPC => self.mepc = val,
            MCAUSE => self.mcause = val,
            MTVAL => self.mtval = val,
            MCYCLE => self.mcycle = (self.mcycle & 0xFFFF_FFFF_0000_0000) | u64::from(val),
            MCYCLEH => self.mcycle = (self.mcycle & 0xFFFF_FFFF) | (u64::from(val) << 32),
            MINSTRET => self.minstret = (self.minstret & 0xFFFF_FFFF_0000_0000) | u64::from(val),
            MINSTRETH => self.minstret = (self.minstret & 0xFFFF_FFFF) | (u64::from(val) << 32),
            _ => {}
        }
    }
}
