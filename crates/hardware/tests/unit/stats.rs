use rvmc_core::isa::privileged::opcodes::OP_SYSTEM;
use rvmc_core::isa::rv32i::opcodes::*;
use rvmc_core::stats::SimStats;

#[test]
fn retire_categories() {
    let mut stats = SimStats::default();
    for op in [OP_LOAD, OP_STORE, OP_BRANCH, OP_JAL, OP_JALR, OP_SYSTEM, OP_MISC_MEM, OP_REG, OP_LUI] {
        stats.record_retire(op);
    }
    assert_eq!(stats.instructions_retired, 9);
    assert_eq!(stats.inst_load, 1);
    assert_eq!(stats.inst_store, 1);
    assert_eq!(stats.inst_branch, 3);
    assert_eq!(stats.inst_system, 2);
    assert_eq!(stats.inst_alu, 2);
}

#[test]
fn cpi_before_and_after_retire() {
    let mut stats = SimStats::default();
    assert!(stats.cpi().abs() < f64::EPSILON);
    stats.cycles = 9;
    stats.record_retire(OP_IMM);
    stats.record_retire(OP_IMM);
    assert!((stats.cpi() - 4.5).abs() < f64::EPSILON);
}

#[test]
fn report_sections() {
    let stats = SimStats::default();
    let full = stats.report();
    assert!(full.contains("RV32I MULTI-CYCLE CORE STATISTICS"));

    let only_memory = stats.report_sections(&["memory".to_string()]);
    assert!(only_memory.len() < full.len());
}
