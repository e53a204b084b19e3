//! Successor selection.

use rstest::rstest;
use rvmc_core::common::Trap;
use rvmc_core::core::control::decode;
use rvmc_core::core::fsm::control::next_state;
use rvmc_core::core::fsm::{State, Transition};
use rvmc_core::isa::instruction::InstructionBits;
use rvmc_core::isa::privileged::opcodes as sys;

use crate::common::builder::InstructionBuilder as I;

fn t(ir: u32) -> Transition {
    Transition {
        ir,
        old_pc: 0x100,
        pc: 0x104,
        trap_illegal: true,
        ..Transition::default()
    }
}

fn next(state: State, t: &Transition) -> State {
    next_state(state, &decode(t.ir.opcode()), t)
}

#[rstest]
#[case(I::new().add(1, 2, 3).build(), State::ExecuteR)]
#[case(I::new().xori(1, 2, 3).build(), State::ExecuteI)]
#[case(I::new().lui(1, 2).build(), State::UpperImm)]
#[case(I::new().auipc(1, 2).build(), State::UpperImm)]
#[case(I::new().lb(1, 2, 0).build(), State::MemAddr)]
#[case(I::new().sh(1, 2, 0).build(), State::MemAddr)]
#[case(I::new().bge(1, 2, 8).build(), State::Branch)]
#[case(I::new().jal(1, 8).build(), State::Jal)]
#[case(I::new().jalr(1, 2, 0).build(), State::Jalr)]
#[case(I::new().csrrs(1, 0x300, 0).build(), State::Csr)]
#[case(sys::MRET, State::Mret)]
#[case(sys::WFI, State::Fetch)]
#[case(I::new().fence().build(), State::Fetch)]
fn decode_dispatch(#[case] ir: u32, #[case] expected: State) {
    assert_eq!(next(State::Decode, &t(ir)), expected);
}

#[rstest]
#[case(sys::ECALL, Trap::EnvironmentCallFromMMode)]
#[case(sys::EBREAK, Trap::Breakpoint(0x100))]
#[case(0xFFFF_FFFF, Trap::IllegalInstruction(0xFFFF_FFFF))]
fn decode_raises_exceptions_at_old_pc(#[case] ir: u32, #[case] trap: Trap) {
    assert_eq!(next(State::Decode, &t(ir)), State::Trap { trap, epc: 0x100 });
}

#[test]
fn illegal_without_trapping_skips_the_instruction() {
    let t = Transition {
        trap_illegal: false,
        ..t(0xFFFF_FFFF)
    };
    assert_eq!(next(State::Decode, &t), State::Fetch);
}

#[test]
fn fetch_takes_interrupt_at_current_pc() {
    let t = Transition {
        interrupt: Some(Trap::MachineTimerInterrupt),
        ..t(0x13)
    };
    assert_eq!(
        next(State::Fetch, &t),
        State::Trap {
            trap: Trap::MachineTimerInterrupt,
            epc: 0x104
        }
    );
    assert_eq!(next(State::Fetch, &self::t(0x13)), State::Decode);
}

#[test]
fn memory_waits_for_ready() {
    let load = t(I::new().lw(1, 2, 0).build());
    let store = t(I::new().sw(1, 2, 0).build());
    assert_eq!(next(State::MemAddr, &load), State::MemRead);
    assert_eq!(next(State::MemAddr, &store), State::MemWrite);

    assert_eq!(next(State::MemRead, &load), State::MemRead);
    assert_eq!(next(State::MemWrite, &store), State::MemWrite);

    let ready = |t: Transition| Transition {
        mem_ready: true,
        ..t
    };
    assert_eq!(next(State::MemRead, &ready(load)), State::WriteBack);
    assert_eq!(next(State::MemWrite, &ready(store)), State::Fetch);
}

#[test]
fn csr_fault_traps_as_illegal() {
    let ir = I::new().csrrw(0, 0xF14, 1).build();
    let t = Transition {
        csr_fault: true,
        ..t(ir)
    };
    assert_eq!(
        next(State::Csr, &t),
        State::Trap {
            trap: Trap::IllegalInstruction(ir),
            epc: 0x100
        }
    );
}

#[rstest]
#[case(State::ExecuteR, State::WriteBack)]
#[case(State::ExecuteI, State::WriteBack)]
#[case(State::UpperImm, State::WriteBack)]
#[case(State::WriteBack, State::Fetch)]
#[case(State::Branch, State::Fetch)]
#[case(State::Jal, State::Fetch)]
#[case(State::Jalr, State::Fetch)]
#[case(State::Mret, State::Fetch)]
#[case(State::Trap { trap: Trap::MachineSoftwareInterrupt, epc: 0 }, State::Fetch)]
fn single_successors(#[case] from: State, #[case] to: State) {
    assert_eq!(next(from, &t(0x13)), to);
}

#[test]
fn state_names() {
    assert_eq!(State::MemRead.to_string(), "MEM_READ");
    assert_eq!(
        State::Trap {
            trap: Trap::EnvironmentCallFromMMode,
            epc: 0x10
        }
        .to_string(),
        "TRAP(EnvironmentCallFromMMode @ 0x00000010)"
    );
}
