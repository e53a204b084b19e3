//! CSR instruction access.
//!
//! Forms the software read-modify-write request of the CSR state and detects
//! accesses that must be escalated to an illegal-instruction trap.

use tracing::debug;

use super::Cpu;
use crate::core::arch::csr::{self, CsrWrite};
use crate::core::control::signals::CsrOp;
use crate::isa::instruction::InstructionBits;
use crate::isa::privileged::opcodes::CSR_IMM_BIT;

/// The CSR state's access, as seen before the clock edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CsrAccess {
    /// Request handed to the CSR file.
    pub write: Option<CsrWrite>,
    /// The access names a missing CSR or writes a read-only one.
    pub fault: bool,
}

impl Cpu {
    /// Builds the CSR access of the instruction in IR.
    ///
    /// The operand is the zero-extended `zimm` field for the immediate forms and
    /// Reg A otherwise. A CSRRS/CSRRC with a zero operand never writes, so it may
    /// read a read-only CSR without faulting.
    pub(crate) fn csr_access(&self) -> CsrAccess {
        let ir = self.dp.ir;
        let addr = ir.csr();
        let operand = if ir.funct3() & CSR_IMM_BIT != 0 {
            ir.zimm()
        } else {
            self.dp.reg_a
        };
        let op = CsrOp::from_funct3(ir.funct3());

        let fault = match self.csrs.read(addr) {
            None => true,
            Some(old) => csr::is_read_only(addr) && csr::write_image(op, old, operand).is_some(),
        };
        if fault {
            debug!(
                csr = format_args!("{addr:#05x}"),
                pc = format_args!("{:#010x}", self.dp.old_pc),
                "illegal CSR access"
            );
            return CsrAccess { write: None, fault };
        }

        CsrAccess {
            write: Some(CsrWrite { addr, op, operand }),
            fault,
        }
    }

    /// Reads a CSR by address, returning 0 for unimplemented addresses.
    pub fn csr_read(&self, addr: u32) -> u32 {
        self.csrs.read(addr).unwrap_or(0)
    }
}
