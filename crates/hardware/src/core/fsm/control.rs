//! Per-state control signals and next-state logic.
//!
//! [`outputs`] is the Moore output table of the FSM: given the state and the
//! instruction register it drives every enable and selector of the datapath for
//! one cycle. [`next_state`] picks the successor from the same inputs plus the
//! cycle's status signals (memory ready, CSR fault, pending interrupt).
//!
//! The PC write enable seen by the datapath is
//! `pc_write || (pc_write_cond && branch_taken)`.

use crate::common::error::Trap;
use crate::core::control::alu_control::resolve;
use crate::core::control::signals::{AluOp, AluOpClass, ControlIntent, OpASrc, OpBSrc, WbSrc};
use crate::core::fsm::State;
use crate::isa::decode;
use crate::isa::instruction::InstructionBits;
use crate::isa::privileged::opcodes as sys_ops;
use crate::isa::rv32i::opcodes;

/// First ALU operand multiplexer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluASel {
    /// Program counter register.
    #[default]
    Pc,
    /// Address of the current instruction.
    OldPc,
    /// Reg A barrier.
    RegA,
    /// Constant zero.
    Zero,
}

/// Second ALU operand multiplexer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluBSel {
    /// Constant 4.
    #[default]
    Four,
    /// Immediate of the instruction in IR.
    Imm,
    /// Reg B barrier.
    RegB,
}

/// Next-PC multiplexer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PcSource {
    /// ALU result of this cycle (`PC + 4` during FETCH).
    #[default]
    AluResult,
    /// Branch resolution unit (taken branch, JAL, JALR).
    Bru,
    /// Trap vector from `mtvec`.
    TrapVector,
    /// Return address from `mepc`.
    ReturnAddress,
}

/// Register-file write data multiplexer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RegSource {
    /// ALUOut barrier.
    #[default]
    AluOut,
    /// Memory data register.
    Mdr,
    /// PC register (`OldPC + 4`, the link address).
    Pc,
    /// Pre-write CSR value read this cycle.
    Csr,
}

/// Control signals driven by one FSM state for one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MicroOps {
    /// Unconditional PC write.
    pub pc_write: bool,
    /// PC write gated by the branch decision.
    pub pc_write_cond: bool,
    /// Next-PC source.
    pub pc_source: PcSource,
    /// Latch IR and OldPC from the instruction port.
    pub ir_write: bool,
    /// Latch Reg A and Reg B from the register file.
    pub operand_write: bool,
    /// Latch the ALU result into ALUOut.
    pub alu_out_write: bool,
    /// Latch formatted load data into the MDR (when the memory is ready).
    pub mdr_write: bool,
    /// Write `rd`.
    pub reg_write: bool,
    /// Register write data.
    pub reg_source: RegSource,
    /// First ALU operand.
    pub alu_a: AluASel,
    /// Second ALU operand.
    pub alu_b: AluBSel,
    /// ALU operation.
    pub alu_op: AluOp,
    /// Assert `valid` on the data port.
    pub mem_valid: bool,
    /// The data port request is a write.
    pub mem_write: bool,
    /// Perform the CSR instruction's read-modify-write.
    pub csr_access: bool,
    /// Perform hardware trap entry.
    pub trap_enter: bool,
    /// Perform trap return.
    pub mret: bool,
}

impl MicroOps {
    /// All enables deasserted.
    pub const IDLE: Self = Self {
        pc_write: false,
        pc_write_cond: false,
        pc_source: PcSource::AluResult,
        ir_write: false,
        operand_write: false,
        alu_out_write: false,
        mdr_write: false,
        reg_write: false,
        reg_source: RegSource::AluOut,
        alu_a: AluASel::Pc,
        alu_b: AluBSel::Four,
        alu_op: AluOp::Add,
        mem_valid: false,
        mem_write: false,
        csr_access: false,
        trap_enter: false,
        mret: false,
    };
}

/// Maps the decoder's operand sources onto the datapath multiplexers.
const fn intent_operands(intent: &ControlIntent) -> (AluASel, AluBSel) {
    let a = match intent.alu_src_a {
        OpASrc::Reg => AluASel::RegA,
        OpASrc::Pc => AluASel::OldPc,
        OpASrc::Zero => AluASel::Zero,
    };
    let b = match intent.alu_src_b {
        OpBSrc::Reg => AluBSel::RegB,
        OpBSrc::Imm => AluBSel::Imm,
    };
    (a, b)
}

/// Returns the control signals of `state` for the instruction in `ir`.
///
/// # Arguments
///
/// * `state` - Current FSM state.
/// * `ir` - Instruction register.
/// * `intent` - Decoder output for `ir`.
pub fn outputs(state: State, ir: u32, intent: &ControlIntent) -> MicroOps {
    let idle = MicroOps::IDLE;
    match state {
        State::Fetch => MicroOps {
            ir_write: true,
            pc_write: true,
            pc_source: PcSource::AluResult,
            alu_a: AluASel::Pc,
            alu_b: AluBSel::Four,
            alu_op: AluOp::Add,
            ..idle
        },
        State::Decode => MicroOps {
            operand_write: true,
            alu_out_write: true,
            alu_a: AluASel::OldPc,
            alu_b: AluBSel::Imm,
            alu_op: AluOp::Add,
            ..idle
        },
        State::ExecuteR | State::ExecuteI | State::UpperImm | State::MemAddr => {
            let (alu_a, alu_b) = intent_operands(intent);
            MicroOps {
                alu_out_write: true,
                alu_a,
                alu_b,
                alu_op: resolve(intent.alu_class, ir.funct3(), ir.funct7()),
                ..idle
            }
        }
        State::MemRead => MicroOps {
            mem_valid: true,
            mdr_write: true,
            ..idle
        },
        State::MemWrite => MicroOps {
            mem_valid: true,
            mem_write: true,
            ..idle
        },
        State::WriteBack => MicroOps {
            reg_write: true,
            reg_source: match intent.wb_src {
                WbSrc::Mem => RegSource::Mdr,
                WbSrc::PcPlus4 => RegSource::Pc,
                WbSrc::Alu => RegSource::AluOut,
            },
            ..idle
        },
        State::Branch => MicroOps {
            pc_write_cond: true,
            pc_source: PcSource::Bru,
            alu_a: AluASel::RegA,
            alu_b: AluBSel::RegB,
            alu_op: resolve(AluOpClass::Branch, ir.funct3(), ir.funct7()),
            ..idle
        },
        State::Jal => MicroOps {
            pc_write: true,
            pc_source: PcSource::Bru,
            reg_write: true,
            reg_source: RegSource::Pc,
            ..idle
        },
        State::Jalr => MicroOps {
            pc_write: true,
            pc_source: PcSource::Bru,
            reg_write: true,
            reg_source: RegSource::Pc,
            alu_a: AluASel::RegA,
            alu_b: AluBSel::Imm,
            alu_op: AluOp::Add,
            ..idle
        },
        State::Csr => MicroOps {
            csr_access: true,
            reg_write: true,
            reg_source: RegSource::Csr,
            ..idle
        },
        State::Mret => MicroOps {
            mret: true,
            pc_write: true,
            pc_source: PcSource::ReturnAddress,
            ..idle
        },
        State::Trap { .. } => MicroOps {
            trap_enter: true,
            pc_write: true,
            pc_source: PcSource::TrapVector,
            ..idle
        },
    }
}

/// Status signals sampled during the cycle that influence the next state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Transition {
    /// Instruction register.
    pub ir: u32,
    /// Address of the instruction in IR.
    pub old_pc: u32,
    /// Program counter register.
    pub pc: u32,
    /// Interrupt selected for this FETCH, if any.
    pub interrupt: Option<Trap>,
    /// The data port asserted `ready`.
    pub mem_ready: bool,
    /// The CSR instruction names a missing CSR or writes a read-only one.
    pub csr_fault: bool,
    /// Escalate undefined encodings to illegal-instruction traps.
    pub trap_illegal: bool,
}

/// Computes the state entered at the next clock edge.
///
/// # Arguments
///
/// * `state` - Current FSM state.
/// * `intent` - Decoder output for the instruction in IR.
/// * `t` - This cycle's status signals.
pub fn next_state(state: State, intent: &ControlIntent, t: &Transition) -> State {
    match state {
        State::Fetch => match t.interrupt {
            Some(trap) => State::Trap { trap, epc: t.pc },
            None => State::Decode,
        },
        State::Decode => dispatch(t),
        State::ExecuteR | State::ExecuteI | State::UpperImm => State::WriteBack,
        State::MemAddr => {
            if intent.mem_write {
                State::MemWrite
            } else {
                State::MemRead
            }
        }
        State::MemRead if t.mem_ready => State::WriteBack,
        State::MemWrite if !t.mem_ready => State::MemWrite,
        State::MemRead => State::MemRead,
        State::Csr if t.csr_fault => State::Trap {
            trap: Trap::IllegalInstruction(t.ir),
            epc: t.old_pc,
        },
        State::MemWrite
        | State::WriteBack
        | State::Branch
        | State::Jal
        | State::Jalr
        | State::Csr
        | State::Mret
        | State::Trap { .. } => State::Fetch,
    }
}

/// DECODE dispatch on the opcode of IR.
fn dispatch(t: &Transition) -> State {
    let ir = t.ir;
    if !decode::is_legal(ir) {
        return if t.trap_illegal {
            State::Trap {
                trap: Trap::IllegalInstruction(ir),
                epc: t.old_pc,
            }
        } else {
            State::Fetch
        };
    }
    match ir.opcode() {
        opcodes::OP_REG => State::ExecuteR,
        opcodes::OP_IMM => State::ExecuteI,
        opcodes::OP_LUI | opcodes::OP_AUIPC => State::UpperImm,
        opcodes::OP_LOAD | opcodes::OP_STORE => State::MemAddr,
        opcodes::OP_BRANCH => State::Branch,
        opcodes::OP_JAL => State::Jal,
        opcodes::OP_JALR => State::Jalr,
        sys_ops::OP_SYSTEM => match ir {
            sys_ops::ECALL => State::Trap {
                trap: Trap::EnvironmentCallFromMMode,
                epc: t.old_pc,
            },
            sys_ops::EBREAK => State::Trap {
                trap: Trap::Breakpoint(t.old_pc),
                epc: t.old_pc,
            },
            sys_ops::MRET => State::Mret,
            sys_ops::WFI => State::Fetch,
            _ => State::Csr,
        },
        _ => State::Fetch,
    }
}
