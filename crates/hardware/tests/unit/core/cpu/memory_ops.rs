//! Loads and stores against RAM.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::builder::InstructionBuilder as I;
use crate::common::harness::TestContext;

const DATA: u32 = 0x1000;

fn ctx_with(prog: &[u32]) -> TestContext {
    let mut ctx = TestContext::new().load_program(0, prog);
    ctx.set_reg(2, DATA);
    ctx
}

#[test]
fn store_then_load_word() {
    let mut ctx = ctx_with(&[I::new().sw(2, 1, 8).build(), I::new().lw(3, 2, 8).build()]);
    ctx.set_reg(1, 0xCAFE_F00D);
    ctx.run_instructions(2);
    assert_eq!(ctx.read_word(DATA + 8), 0xCAFE_F00D);
    assert_eq!(ctx.get_reg(3), 0xCAFE_F00D);
    let stats = &ctx.sim.cpu.stats;
    assert_eq!((stats.mem_reads, stats.mem_writes), (1, 1));
    assert_eq!((stats.inst_load, stats.inst_store), (1, 1));
}

#[test]
fn byte_store_touches_one_lane() {
    let mut ctx = ctx_with(&[I::new().sb(2, 1, 2).build()]);
    ctx.write_words(DATA, &[0x1122_3344]);
    ctx.set_reg(1, 0xFFFF_FFAB);
    ctx.step();
    assert_eq!(ctx.read_word(DATA), 0x11AB_3344);
}

#[test]
fn half_store_upper_lane() {
    let mut ctx = ctx_with(&[I::new().sh(2, 1, 2).build()]);
    ctx.write_words(DATA, &[0x1122_3344]);
    ctx.set_reg(1, 0xBEEF);
    ctx.step();
    assert_eq!(ctx.read_word(DATA), 0xBEEF_3344);
}

#[test]
fn signed_and_unsigned_byte_of_minus_ten() {
    let prog = [
        I::new().addi(1, 0, -10).build(),
        I::new().sb(2, 1, 0).build(),
        I::new().lb(3, 2, 0).build(),
        I::new().lbu(4, 2, 0).build(),
    ];
    let mut ctx = ctx_with(&prog);
    ctx.run_instructions(4);
    assert_eq!(ctx.get_reg(3) as i32, -10);
    assert_eq!(ctx.get_reg(4), 246);
}

#[rstest]
#[case::lb(I::new().lb(3, 2, 3).build(), 0xFFFF_FF80)]
#[case::lbu(I::new().lbu(3, 2, 3).build(), 0x80)]
#[case::lh(I::new().lh(3, 2, 2).build(), 0xFFFF_8001)]
#[case::lhu(I::new().lhu(3, 2, 2).build(), 0x8001)]
#[case::lw(I::new().lw(3, 2, 0).build(), 0x8001_7F7F)]
fn load_extension(#[case] inst: u32, #[case] expected: u32) {
    let mut ctx = ctx_with(&[inst]);
    ctx.write_words(DATA, &[0x8001_7F7F]);
    ctx.step();
    assert_eq!(ctx.get_reg(3), expected);
}

#[test]
fn negative_offset() {
    let mut ctx = ctx_with(&[I::new().lw(3, 2, -4).build()]);
    ctx.write_words(DATA - 4, &[0x55]);
    ctx.step();
    assert_eq!(ctx.get_reg(3), 0x55);
}

#[test]
fn unmapped_load_reads_zero() {
    let mut ctx = ctx_with(&[I::new().lw(3, 2, 0).build()]);
    ctx.set_reg(2, 0x7000_0000);
    ctx.set_reg(3, 9);
    ctx.step();
    assert_eq!(ctx.get_reg(3), 0);
}
