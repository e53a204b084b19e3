//! Per-state control signals.

use pretty_assertions::assert_eq;
use rvmc_core::common::Trap;
use rvmc_core::core::control::{decode, AluOp};
use rvmc_core::core::fsm::control::{outputs, AluASel, AluBSel, PcSource, RegSource};
use rvmc_core::core::fsm::{MicroOps, State};
use rvmc_core::isa::instruction::InstructionBits;

use crate::common::builder::InstructionBuilder as I;

fn ops(state: State, ir: u32) -> MicroOps {
    outputs(state, ir, &decode(ir.opcode()))
}

#[test]
fn fetch_loads_ir_and_increments_pc() {
    let m = ops(State::Fetch, 0);
    assert!(m.ir_write && m.pc_write);
    assert_eq!((m.alu_a, m.alu_b, m.alu_op), (AluASel::Pc, AluBSel::Four, AluOp::Add));
    assert_eq!(m.pc_source, PcSource::AluResult);
    assert!(!m.mem_valid && !m.reg_write);
}

#[test]
fn decode_latches_operands_and_branch_target() {
    let m = ops(State::Decode, I::new().beq(1, 2, 16).build());
    assert!(m.operand_write && m.alu_out_write);
    assert_eq!((m.alu_a, m.alu_b), (AluASel::OldPc, AluBSel::Imm));
    assert!(!m.pc_write && !m.reg_write);
}

#[test]
fn execute_r_uses_resolved_op() {
    let m = ops(State::ExecuteR, I::new().sub(1, 2, 3).build());
    assert_eq!((m.alu_a, m.alu_b, m.alu_op), (AluASel::RegA, AluBSel::RegB, AluOp::Sub));
    assert!(m.alu_out_write);
}

#[test]
fn execute_i_srai() {
    let m = ops(State::ExecuteI, I::new().srai(1, 2, 3).build());
    assert_eq!((m.alu_a, m.alu_b, m.alu_op), (AluASel::RegA, AluBSel::Imm, AluOp::Sra));
}

#[test]
fn upper_immediates_select_zero_or_old_pc() {
    assert_eq!(ops(State::UpperImm, I::new().lui(1, 1).build()).alu_a, AluASel::Zero);
    assert_eq!(ops(State::UpperImm, I::new().auipc(1, 1).build()).alu_a, AluASel::OldPc);
}

#[test]
fn memory_states() {
    let addr = ops(State::MemAddr, I::new().lw(1, 2, 4).build());
    assert_eq!((addr.alu_a, addr.alu_b, addr.alu_op), (AluASel::RegA, AluBSel::Imm, AluOp::Add));

    let read = ops(State::MemRead, I::new().lw(1, 2, 4).build());
    assert!(read.mem_valid && !read.mem_write && read.mdr_write);

    let write = ops(State::MemWrite, I::new().sw(1, 2, 4).build());
    assert!(write.mem_valid && write.mem_write && !write.mdr_write);
}

#[test]
fn write_back_source_follows_intent() {
    assert_eq!(ops(State::WriteBack, I::new().lw(1, 2, 0).build()).reg_source, RegSource::Mdr);
    assert_eq!(ops(State::WriteBack, I::new().add(1, 2, 3).build()).reg_source, RegSource::AluOut);
}

#[test]
fn branch_writes_pc_conditionally() {
    let m = ops(State::Branch, I::new().bltu(1, 2, 8).build());
    assert!(m.pc_write_cond && !m.pc_write);
    assert_eq!(m.pc_source, PcSource::Bru);
    assert_eq!(m.alu_op, AluOp::Sltu);
}

#[test]
fn jumps_link_and_redirect() {
    for state in [State::Jal, State::Jalr] {
        let m = ops(state, I::new().jal(1, 8).build());
        assert!(m.pc_write && m.reg_write);
        assert_eq!(m.reg_source, RegSource::Pc);
    }
}

#[test]
fn system_states() {
    let csr = ops(State::Csr, I::new().csrrw(1, 0x340, 2).build());
    assert!(csr.csr_access && csr.reg_write);
    assert_eq!(csr.reg_source, RegSource::Csr);

    let mret = ops(State::Mret, 0x3020_0073);
    assert!(mret.mret && mret.pc_write);
    assert_eq!(mret.pc_source, PcSource::ReturnAddress);

    let trap = ops(
        State::Trap {
            trap: Trap::EnvironmentCallFromMMode,
            epc: 0,
        },
        0x73,
    );
    assert!(trap.trap_enter && trap.pc_write);
    assert_eq!(trap.pc_source, PcSource::TrapVector);
}

#[test]
fn barrier_register_writers() {
    let ir = I::new().add(1, 2, 3).build();
    let states = [
        State::Fetch,
        State::Decode,
        State::ExecuteR,
        State::ExecuteI,
        State::UpperImm,
        State::MemAddr,
        State::MemRead,
        State::MemWrite,
        State::WriteBack,
        State::Branch,
        State::Jal,
        State::Jalr,
        State::Csr,
        State::Mret,
        State::Trap {
            trap: Trap::EnvironmentCallFromMMode,
            epc: 0,
        },
    ];
    let writers = |pick: fn(&MicroOps) -> bool| -> Vec<State> {
        states.iter().copied().filter(|&s| pick(&ops(s, ir))).collect()
    };

    assert_eq!(writers(|m| m.ir_write), vec![State::Fetch]);
    assert_eq!(writers(|m| m.operand_write), vec![State::Decode]);
    assert_eq!(writers(|m| m.mdr_write), vec![State::MemRead]);
    // ALUOut: target precompute in DECODE, then the execute or address result.
    assert_eq!(
        writers(|m| m.alu_out_write),
        vec![
            State::Decode,
            State::ExecuteR,
            State::ExecuteI,
            State::UpperImm,
            State::MemAddr
        ]
    );
}
