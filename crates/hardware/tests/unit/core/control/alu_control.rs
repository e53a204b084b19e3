//! ALU-control resolution for every operation class.

use rstest::rstest;
use rvmc_core::core::control::{resolve, AluOp, AluOpClass};

const ALT: u32 = 0b010_0000;

#[rstest]
#[case(AluOpClass::Address, 0b111, ALT, AluOp::Add)]
#[case(AluOpClass::RegReg, 0b000, 0, AluOp::Add)]
#[case(AluOpClass::RegReg, 0b000, ALT, AluOp::Sub)]
#[case(AluOpClass::RegReg, 0b001, 0, AluOp::Sll)]
#[case(AluOpClass::RegReg, 0b010, 0, AluOp::Slt)]
#[case(AluOpClass::RegReg, 0b011, 0, AluOp::Sltu)]
#[case(AluOpClass::RegReg, 0b100, 0, AluOp::Xor)]
#[case(AluOpClass::RegReg, 0b101, 0, AluOp::Srl)]
#[case(AluOpClass::RegReg, 0b101, ALT, AluOp::Sra)]
#[case(AluOpClass::RegReg, 0b110, 0, AluOp::Or)]
#[case(AluOpClass::RegReg, 0b111, 0, AluOp::And)]
#[case(AluOpClass::RegImm, 0b000, ALT, AluOp::Add)]
#[case(AluOpClass::RegImm, 0b101, 0, AluOp::Srl)]
#[case(AluOpClass::RegImm, 0b101, ALT, AluOp::Sra)]
#[case(AluOpClass::RegImm, 0b111, 0, AluOp::And)]
#[case(AluOpClass::Branch, 0b000, 0, AluOp::Sub)]
#[case(AluOpClass::Branch, 0b001, 0, AluOp::Sub)]
#[case(AluOpClass::Branch, 0b100, 0, AluOp::Slt)]
#[case(AluOpClass::Branch, 0b101, 0, AluOp::Slt)]
#[case(AluOpClass::Branch, 0b110, 0, AluOp::Sltu)]
#[case(AluOpClass::Branch, 0b111, 0, AluOp::Sltu)]
fn resolves(#[case] class: AluOpClass, #[case] f3: u32, #[case] f7: u32, #[case] op: AluOp) {
    assert_eq!(resolve(class, f3, f7), op);
}

#[test]
fn encodings_are_stable() {
    let table = [
        (AluOp::Add, 0),
        (AluOp::Sll, 1),
        (AluOp::Slt, 2),
        (AluOp::Sltu, 3),
        (AluOp::Xor, 4),
        (AluOp::Srl, 5),
        (AluOp::Or, 6),
        (AluOp::And, 7),
        (AluOp::Sub, 8),
        (AluOp::Sra, 13),
    ];
    for (op, bits) in table {
        assert_eq!(op.encoding(), bits, "{op:?}");
    }
}
