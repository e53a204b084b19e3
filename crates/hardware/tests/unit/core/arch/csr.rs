//! Clocked CSR file: write masks, counters, trap entry and return.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use rvmc_core::common::Trap;
use rvmc_core::core::arch::csr::{self, CsrPort, CsrWrite, TrapEntry};
use rvmc_core::core::arch::{CsrFile, InterruptLines};
use rvmc_core::core::control::CsrOp;

fn write(addr: u32, op: CsrOp, operand: u32) -> CsrPort {
    CsrPort {
        write: Some(CsrWrite { addr, op, operand }),
        ..CsrPort::default()
    }
}

#[test]
fn reset_values() {
    let csrs = CsrFile::new();
    assert_eq!(csrs.read(csr::MSTATUS), Some(0));
    assert_eq!(csrs.read(csr::MISA), Some((1 << 30) | (1 << 8)));
    assert_eq!(csrs.read(csr::MHARTID), Some(0));
    assert_eq!(csrs.read(csr::MIP), Some(0));
    assert_eq!(csrs.read(0x7C0), None);
}

#[test]
fn clock_returns_value_before_write() {
    let mut csrs = CsrFile::new();
    assert_eq!(csrs.clock(&write(csr::MSCRATCH, CsrOp::Rw, 0x1234)), Some(0));
    assert_eq!(csrs.clock(&write(csr::MSCRATCH, CsrOp::Rw, 0x5678)), Some(0x1234));
    assert_eq!(csrs.mscratch, 0x5678);
}

#[test]
fn csrrw_is_an_atomic_swap() {
    let mut csrs = CsrFile::new();
    csrs.clock(&write(csr::MEPC, CsrOp::Rw, 0xAAAA_5555));
    let old = csrs.clock(&write(csr::MEPC, CsrOp::Rw, 0x1234_5678));
    assert_eq!(old, Some(0xAAAA_5555));
    assert_eq!(csrs.mepc, 0x1234_5678);
}

#[rstest]
#[case(csr::MSTATUS, 0xFFFF_FFFF, 0x88)]
#[case(csr::MIE, 0xFFFF_FFFF, 0x888)]
#[case(csr::MTVEC, 0x8000_0103, 0x8000_0100)]
#[case(csr::MEPC, 0xAAAA_5555, 0xAAAA_5555)]
#[case(csr::MCAUSE, 0xFFFF_FFFF, 0xFFFF_FFFF)]
fn write_masks(#[case] addr: u32, #[case] operand: u32, #[case] stored: u32) {
    let mut csrs = CsrFile::new();
    csrs.clock(&write(addr, CsrOp::Rw, operand));
    assert_eq!(csrs.read(addr), Some(stored));
}

#[test]
fn set_and_clear() {
    let mut csrs = CsrFile::new();
    csrs.clock(&write(csr::MSCRATCH, CsrOp::Rw, 0xF0));
    csrs.clock(&write(csr::MSCRATCH, CsrOp::Rs, 0x0F));
    assert_eq!(csrs.mscratch, 0xFF);
    csrs.clock(&write(csr::MSCRATCH, CsrOp::Rc, 0x3C));
    assert_eq!(csrs.mscratch, 0xC3);
}

#[test]
fn read_only_write_image() {
    assert!(csr::is_read_only(csr::MHARTID));
    assert!(csr::is_read_only(csr::CYCLE));
    assert!(!csr::is_read_only(csr::MCYCLE));
    assert_eq!(csr::write_image(CsrOp::Rs, 5, 0), None);
    assert_eq!(csr::write_image(CsrOp::Rc, 5, 0), None);
    assert_eq!(csr::write_image(CsrOp::Rw, 5, 0), Some(0));
}

#[test]
fn counters_advance_every_clock() {
    let mut csrs = CsrFile::new();
    csrs.clock(&CsrPort::default());
    csrs.clock(&CsrPort {
        retire: true,
        ..CsrPort::default()
    });
    assert_eq!(csrs.mcycle, 2);
    assert_eq!(csrs.minstret, 1);
    assert_eq!(csrs.read(csr::CYCLE), Some(2));
    assert_eq!(csrs.read(csr::INSTRET), Some(1));
}

#[test]
fn counter_halves() {
    let mut csrs = CsrFile::new();
    csrs.clock(&write(csr::MCYCLEH, CsrOp::Rw, 1));
    assert_eq!(csrs.mcycle, (1 << 32) | 1);
    assert_eq!(csrs.read(csr::CYCLEH), Some(1));
    assert_eq!(csrs.read(csr::MCYCLE), Some(1));
}

#[test]
fn mcycle_write_wins_over_increment() {
    let mut csrs = CsrFile::new();
    csrs.clock(&write(csr::MCYCLE, CsrOp::Rw, 100));
    assert_eq!(csrs.mcycle, 100);
}

#[test]
fn trap_entry_saves_state_and_disables_interrupts() {
    let mut csrs = CsrFile::new();
    csrs.mstatus = csr::MSTATUS_MIE;
    csrs.clock(&CsrPort {
        trap: Some(TrapEntry::new(Trap::IllegalInstruction(0xFFFF_FFFF), 0x40)),
        ..CsrPort::default()
    });
    assert_eq!(csrs.mepc, 0x40);
    assert_eq!(csrs.mcause, 2);
    assert_eq!(csrs.mtval, 0xFFFF_FFFF);
    assert_eq!(csrs.mstatus, csr::MSTATUS_MPIE);
}

#[test]
fn trap_entry_beats_software_write() {
    let mut csrs = CsrFile::new();
    csrs.clock(&CsrPort {
        write: Some(CsrWrite {
            addr: csr::MEPC,
            op: CsrOp::Rw,
            operand: 0x1111,
        }),
        trap: Some(TrapEntry::new(Trap::EnvironmentCallFromMMode, 0x80)),
        ..CsrPort::default()
    });
    assert_eq!(csrs.mepc, 0x80);
    assert_eq!(csrs.mcause, 11);
}

#[test]
fn mret_restores_mie_and_sets_mpie() {
    let mut csrs = CsrFile::new();
    csrs.mstatus = csr::MSTATUS_MPIE;
    csrs.clock(&CsrPort {
        mret: true,
        ..CsrPort::default()
    });
    assert_eq!(csrs.mstatus, csr::MSTATUS_MIE | csr::MSTATUS_MPIE);

    csrs.mstatus = 0;
    csrs.clock(&CsrPort {
        mret: true,
        ..CsrPort::default()
    });
    assert_eq!(csrs.mstatus, csr::MSTATUS_MPIE);
}

#[test]
fn mret_beats_software_write() {
    let mut csrs = CsrFile::new();
    csrs.mstatus = csr::MSTATUS_MPIE;
    csrs.clock(&CsrPort {
        write: Some(CsrWrite {
            addr: csr::MSTATUS,
            op: CsrOp::Rw,
            operand: 0,
        }),
        mret: true,
        ..CsrPort::default()
    });
    assert_eq!(csrs.mstatus, csr::MSTATUS_MIE | csr::MSTATUS_MPIE);
}

#[test]
fn trap_entry_beats_mret() {
    let mut csrs = CsrFile::new();
    csrs.mstatus = csr::MSTATUS_MIE;
    csrs.clock(&CsrPort {
        trap: Some(TrapEntry::new(Trap::Breakpoint(0x24), 0x24)),
        mret: true,
        ..CsrPort::default()
    });
    assert_eq!(csrs.mstatus, csr::MSTATUS_MPIE);
    assert_eq!(csrs.mepc, 0x24);
    assert_eq!(csrs.mcause, 3);
}

#[test]
fn mip_follows_lines() {
    let mut csrs = CsrFile::new();
    csrs.set_interrupt_lines(InterruptLines {
        timer: true,
        ..InterruptLines::default()
    });
    assert_eq!(csrs.read(csr::MIP), Some(csr::MIP_MTIP));
    csrs.clock(&write(csr::MIP, CsrOp::Rw, 0));
    assert_eq!(csrs.read(csr::MIP), Some(csr::MIP_MTIP));
}

#[test]
fn pending_interrupt_needs_both_enables() {
    let mut csrs = CsrFile::new();
    csrs.set_interrupt_lines(InterruptLines {
        timer: true,
        software: true,
        ..InterruptLines::default()
    });
    assert_eq!(csrs.pending_interrupt(), None);
    csrs.mie = csr::MIE_MTIE;
    assert_eq!(csrs.pending_interrupt(), None);
    csrs.mstatus = csr::MSTATUS_MIE;
    assert_eq!(csrs.pending_interrupt(), Some(Trap::MachineTimerInterrupt));
    csrs.mie |= csr::MIE_MSIE;
    assert_eq!(csrs.pending_interrupt(), Some(Trap::MachineSoftwareInterrupt));
}

const WRITABLE: [u32; 7] = [
    csr::MSTATUS,
    csr::MIE,
    csr::MTVEC,
    csr::MSCRATCH,
    csr::MEPC,
    csr::MCAUSE,
    csr::MTVAL,
];

proptest! {
    #[test]
    fn zero_operand_set_clear_never_writes(
        addr in prop::sample::select(WRITABLE.to_vec()),
        initial in any::<u32>(),
        clear in any::<bool>(),
    ) {
        let mut csrs = CsrFile::new();
        csrs.clock(&write(addr, CsrOp::Rw, initial));
        let before = csrs.read(addr);
        let op = if clear { CsrOp::Rc } else { CsrOp::Rs };
        let old = csrs.clock(&write(addr, op, 0));
        prop_assert_eq!(old, before);
        prop_assert_eq!(csrs.read(addr), before);
    }
}
