//! Interrupt line encoding and priority selection.

use rstest::rstest;
use rvmc_core::common::Trap;
use rvmc_core::core::arch::csr::{MIE_WRITABLE, MIP_MEIP, MIP_MSIP, MIP_MTIP, MSTATUS_MIE};
use rvmc_core::core::arch::{InterruptLines, TrapHandler};

#[test]
fn lines_map_to_mip_bits() {
    let lines = InterruptLines {
        external: true,
        timer: true,
        software: true,
    };
    assert_eq!(lines.mip(), MIP_MEIP | MIP_MTIP | MIP_MSIP);
    assert_eq!(InterruptLines::default().mip(), 0);
}

#[test]
fn merge_is_a_per_line_or() {
    let a = InterruptLines {
        timer: true,
        ..InterruptLines::default()
    };
    let b = InterruptLines {
        software: true,
        ..InterruptLines::default()
    };
    let m = a.merge(b);
    assert!(m.timer && m.software && !m.external);
}

#[rstest]
#[case(MIP_MEIP | MIP_MSIP | MIP_MTIP, Some(Trap::MachineExternalInterrupt))]
#[case(MIP_MSIP | MIP_MTIP, Some(Trap::MachineSoftwareInterrupt))]
#[case(MIP_MTIP, Some(Trap::MachineTimerInterrupt))]
#[case(0, None)]
fn priority_is_external_software_timer(#[case] mip: u32, #[case] expected: Option<Trap>) {
    assert_eq!(
        TrapHandler::pending_interrupt(MSTATUS_MIE, MIE_WRITABLE, mip),
        expected
    );
}

#[test]
fn global_enable_masks_everything() {
    assert_eq!(TrapHandler::pending_interrupt(0, MIE_WRITABLE, MIP_MTIP), None);
}

#[test]
fn per_source_enable_masks_its_line() {
    assert_eq!(
        TrapHandler::pending_interrupt(MSTATUS_MIE, MIP_MSIP, MIP_MTIP | MIP_MSIP),
        Some(Trap::MachineSoftwareInterrupt)
    );
}
