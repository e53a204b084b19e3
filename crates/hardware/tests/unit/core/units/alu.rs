//! ALU operations and flags.

use proptest::prelude::*;
use rstest::rstest;
use rvmc_core::core::control::AluOp;
use rvmc_core::core::units::alu::Alu;

#[rstest]
#[case(AluOp::Add, 0xFFFF_FFFF, 1, 0)]
#[case(AluOp::Sub, 0, 1, 0xFFFF_FFFF)]
#[case(AluOp::Sll, 1, 33, 2)]
#[case(AluOp::Slt, 0xFFFF_FFFF, 0, 1)]
#[case(AluOp::Sltu, 0xFFFF_FFFF, 0, 0)]
#[case(AluOp::Xor, 0xF0F0, 0xFF00, 0x0FF0)]
#[case(AluOp::Srl, 0x8000_0000, 31, 1)]
#[case(AluOp::Sra, 0x8000_0000, 31, 0xFFFF_FFFF)]
#[case(AluOp::Or, 0xF0, 0x0F, 0xFF)]
#[case(AluOp::And, 0xF0, 0x3C, 0x30)]
fn operations(#[case] op: AluOp, #[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(Alu::execute(op, a, b).value, expected);
}

#[test]
fn flags_track_result() {
    let r = Alu::execute(AluOp::Sub, 5, 5);
    assert!(r.flags.zero && !r.flags.negative);
    let r = Alu::execute(AluOp::Sub, 4, 5);
    assert!(!r.flags.zero && r.flags.negative);
}

#[test]
fn srai_immediate_uses_low_five_bits() {
    // SRAI carries 0x400 in the immediate; only the shift amount matters.
    assert_eq!(Alu::execute(AluOp::Sra, 0xFFFF_FF00, 0x404).value, 0xFFFF_FFF0);
}

proptest! {
    #[test]
    fn add_sub_wrap(a in any::<u32>(), b in any::<u32>()) {
        prop_assert_eq!(Alu::execute(AluOp::Add, a, b).value, a.wrapping_add(b));
        prop_assert_eq!(Alu::execute(AluOp::Sub, a, b).value, a.wrapping_sub(b));
    }
}
