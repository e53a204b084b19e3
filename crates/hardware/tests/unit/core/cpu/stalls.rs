//! Data-port handshake driven through a mock bus.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use mockall::predicate::always;
use rvmc_core::config::Config;
use rvmc_core::core::control::MemWidth;
use rvmc_core::core::fsm::State;
use rvmc_core::soc::{Bus, DataResponse};
use rvmc_core::Cpu;

use crate::common::builder::InstructionBuilder as I;
use crate::common::mocks::MockDataBus;

fn cpu() -> Cpu {
    Cpu::new(&Config::default())
}

/// Withholds `ready` for the first `waits` calls, then answers with `data`.
fn slow_port(bus: &mut MockDataBus, waits: u32, data: u32) -> Arc<AtomicU32> {
    let calls = Arc::new(AtomicU32::new(0));
    let seen = Arc::clone(&calls);
    bus.expect_data().returning(move |_| {
        if seen.fetch_add(1, Ordering::Relaxed) < waits {
            DataResponse::WAIT
        } else {
            DataResponse::ready(data)
        }
    });
    calls
}

#[test]
fn load_waits_in_mem_read() {
    let mut bus = MockDataBus::with_program(vec![I::new().lw(1, 0, 0x40).build()]);
    let calls = slow_port(&mut bus, 2, 0xABCD);
    let mut cpu = cpu();

    assert_eq!(cpu.step_instruction(&mut bus, 100), Some(7));
    assert_eq!(calls.load(Ordering::Relaxed), 3);
    assert_eq!(cpu.regs.read(1), 0xABCD);
    assert_eq!(cpu.stats.stalls_mem, 2);
    assert_eq!(cpu.stats.mem_reads, 1);
}

#[test]
fn load_request_fields() {
    let mut bus = MockDataBus::with_program(vec![I::new().lh(1, 2, 2).build()]);
    bus.expect_data()
        .withf(|req| {
            req.addr == 0x102 && !req.write && req.width == MemWidth::Half && req.signed
        })
        .times(1)
        .returning(|_| DataResponse::ready(0x8000_0000));
    let mut cpu = cpu();
    cpu.regs.write(2, 0x100);

    assert_eq!(cpu.step_instruction(&mut bus, 100), Some(5));
    assert_eq!(cpu.regs.read(1), 0xFFFF_8000);
}

#[test]
fn store_holds_request_until_ready() {
    let mut bus = MockDataBus::with_program(vec![I::new().sb(2, 1, 1).build()]);
    bus.expect_data()
        .withf(|req| req.write && req.addr == 0x41 && req.data == 0xAB00 && req.byte_enable == 0b0010)
        .times(4)
        .returning({
            let mut n = 0;
            move |_| {
                n += 1;
                if n < 4 {
                    DataResponse::WAIT
                } else {
                    DataResponse::ready(0)
                }
            }
        });
    let mut cpu = cpu();
    cpu.regs.write(1, 0x12AB);
    cpu.regs.write(2, 0x40);

    for _ in 0..6 {
        bus.tick();
        assert!(!cpu.tick(&mut bus));
        assert_ne!(cpu.state, State::Fetch);
    }
    bus.tick();
    assert!(cpu.tick(&mut bus));
    assert_eq!(cpu.stats.stalls_mem, 3);
    assert_eq!(cpu.stats.mem_writes, 1);
}

#[test]
fn alu_instruction_never_touches_data_port() {
    let mut bus = MockDataBus::with_program(vec![I::new().addi(1, 0, 1).build()]);
    bus.expect_data().with(always()).never();
    let mut cpu = cpu();
    assert_eq!(cpu.step_instruction(&mut bus, 100), Some(4));
}

#[test]
fn fetch_uses_pc() {
    let mut bus = MockDataBus::new();
    bus.expect_fetch()
        .withf(|&addr| addr == 0x80)
        .times(1)
        .returning(|_| 0x0000_0013);
    bus.expect_interrupts().returning(Default::default);
    bus.expect_tick().return_const(());
    let mut cpu = cpu();
    cpu.set_reset_pc(0x80);
    assert_eq!(cpu.step_instruction(&mut bus, 10), Some(4));
    assert_eq!(cpu.pc(), 0x84);
}
