//! Branches and jumps.

use rstest::rstest;

use crate::common::builder::InstructionBuilder as I;
use crate::common::harness::TestContext;

#[rstest]
#[case::beq_taken(I::new().beq(1, 2, 16).build(), 5, 5, 0x110)]
#[case::beq_not_taken(I::new().beq(1, 2, 16).build(), 5, 6, 0x104)]
#[case::bne(I::new().bne(1, 2, -16).build(), 5, 6, 0xF0)]
#[case::blt(I::new().blt(1, 2, 8).build(), (-1i32) as u32, 0, 0x108)]
#[case::bge(I::new().bge(1, 2, 8).build(), (-1i32) as u32, 0, 0x104)]
#[case::bltu(I::new().bltu(1, 2, 8).build(), (-1i32) as u32, 0, 0x104)]
#[case::bgeu(I::new().bgeu(1, 2, 8).build(), (-1i32) as u32, 0, 0x108)]
fn branches(#[case] inst: u32, #[case] a: u32, #[case] b: u32, #[case] pc: u32) {
    let mut ctx = TestContext::new().load_program(0x100, &[inst]);
    ctx.set_reg(1, a);
    ctx.set_reg(2, b);
    ctx.step();
    assert_eq!(ctx.pc(), pc);
    assert_eq!(ctx.sim.cpu.stats.inst_branch, 1);
}

#[test]
fn jal_links_pc_plus_4() {
    let mut ctx = TestContext::new().load_program(0x100, &[I::new().jal(1, -0x40).build()]);
    ctx.step();
    assert_eq!(ctx.pc(), 0xC0);
    assert_eq!(ctx.get_reg(1), 0x104);
}

#[test]
fn jalr_clears_bit_zero() {
    let mut ctx = TestContext::new().load_program(0x100, &[I::new().jalr(5, 6, 3).build()]);
    ctx.set_reg(6, 0x200);
    ctx.step();
    assert_eq!(ctx.pc(), 0x202);
    assert_eq!(ctx.get_reg(5), 0x104);
}

#[test]
fn jalr_with_rd_equal_rs1_uses_old_value() {
    let mut ctx = TestContext::new().load_program(0x100, &[I::new().jalr(1, 1, 0).build()]);
    ctx.set_reg(1, 0x300);
    ctx.step();
    assert_eq!(ctx.pc(), 0x300);
    assert_eq!(ctx.get_reg(1), 0x104);
}

#[test]
fn call_and_return() {
    let prog = [
        I::new().jal(1, 12).build(),       // 0x00: call 0x0C
        I::new().addi(10, 10, 1).build(),  // 0x04
        I::new().jal(0, 0).build(),        // 0x08: spin
        I::new().addi(10, 0, 41).build(),  // 0x0C
        I::new().jalr(0, 1, 0).build(),    // 0x10: ret
    ];
    let mut ctx = TestContext::new().load_program(0, &prog);
    ctx.run_instructions(4);
    assert_eq!(ctx.get_reg(10), 42);
    assert_eq!(ctx.pc(), 0x08);
}

#[test]
fn counted_loop() {
    let prog = [
        I::new().addi(1, 0, 5).build(),   // i = 5
        I::new().addi(2, 2, 3).build(),   // loop: acc += 3
        I::new().addi(1, 1, -1).build(),  // i -= 1
        I::new().bne(1, 0, -8).build(),   // while i != 0
    ];
    let mut ctx = TestContext::new().load_program(0, &prog);
    ctx.run_instructions(1 + 5 * 3);
    assert_eq!(ctx.get_reg(2), 15);
    assert_eq!(ctx.pc(), 0x10);
}
