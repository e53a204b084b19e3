//! Main execution cycle.
//!
//! [`Cpu::tick`] evaluates one clock period of the core and then applies the
//! clock edge. It performs the following:
//! 1. **Control:** Samples interrupts, decodes IR and looks up the state's control signals.
//! 2. **Datapath:** Drives the ALU, the instruction port, the data port and the CSR access.
//! 3. **Clock Edge:** Updates the CSR file, register file, PC, barrier registers and FSM
//!    state, all from values computed before the edge.
//! 4. **Observability:** Emits trace events and updates the statistics.

use tracing::{debug, trace};

use super::Cpu;
use crate::common::constants::INSTRUCTION_SIZE;
use crate::core::arch::csr::CsrPort;
use crate::core::control::decode;
use crate::core::fsm::control::{self, AluASel, AluBSel, PcSource, RegSource};
use crate::core::fsm::{MicroOps, State, Transition};
use crate::core::units::alu::{Alu, AluResult};
use crate::core::units::bru;
use crate::isa::decode as imm;
use crate::isa::disasm::disassemble;
use crate::isa::instruction::InstructionBits;
use crate::isa::rv32i::opcodes;
use crate::soc::Bus;

impl Cpu {
    /// Advances the core by one clock cycle.
    ///
    /// # Arguments
    ///
    /// * `bus` - Instruction port, data port and interrupt lines for this cycle.
    ///
    /// # Returns
    ///
    /// `true` if an instruction retired at this clock edge.
    pub fn tick<B: Bus + ?Sized>(&mut self, bus: &mut B) -> bool {
        let state = self.state;
        let dp = self.dp;

        let interrupt = self.sample_interrupts(bus);
        let intent = decode(dp.ir.opcode());
        let ops = if interrupt.is_some() {
            MicroOps::IDLE
        } else {
            control::outputs(state, dp.ir, &intent)
        };

        let alu = self.execute_alu(&ops);
        let fetched = ops.ir_write.then(|| bus.fetch(dp.pc));
        let req = self.data_request(&ops);
        let mem = self.access_data(bus, req.as_ref());
        let csr = if ops.csr_access {
            self.csr_access()
        } else {
            Default::default()
        };
        let taken = bru::branch_taken(intent.branch, dp.ir.funct3(), alu.flags);

        let next = control::next_state(
            state,
            &intent,
            &Transition {
                ir: dp.ir,
                old_pc: dp.old_pc,
                pc: dp.pc,
                interrupt,
                mem_ready: mem.ready,
                csr_fault: csr.fault,
                trap_illegal: self.trap_illegal,
            },
        );
        let retire = next == State::Fetch && !matches!(state, State::Trap { .. });

        // Operands and vectors are sampled before the edge.
        let rs1 = self.regs.read(dp.ir.rs1());
        let rs2 = self.regs.read(dp.ir.rs2());
        let mtvec = self.csrs.mtvec;
        let mepc = self.csrs.mepc;

        let trap = self.trap_entry();
        if ops.mret {
            debug!(mepc = format_args!("{mepc:#010x}"), "mret");
        }
        let csr_old = self.csrs.clock(&CsrPort {
            write: csr.write,
            trap,
            mret: ops.mret,
            retire,
        });

        if ops.reg_write && !csr.fault {
            let value = match ops.reg_source {
                RegSource::AluOut => dp.alu_out,
                RegSource::Mdr => dp.mdr,
                RegSource::Pc => dp.pc,
                RegSource::Csr => csr_old.unwrap_or(0),
            };
            self.regs.write(dp.ir.rd(), value);
        }

        if ops.pc_write || (ops.pc_write_cond && taken) {
            self.dp.pc = match ops.pc_source {
                PcSource::AluResult => alu.value,
                PcSource::Bru => {
                    let select =
                        bru::pc_select(intent.jump, dp.ir.opcode() == opcodes::OP_JALR, taken);
                    bru::next_pc(select, dp.pc, dp.alu_out, alu.value)
                }
                PcSource::TrapVector => mtvec,
                PcSource::ReturnAddress => mepc,
            };
        }

        if let Some(inst) = fetched {
            self.dp.ir = inst;
            self.dp.old_pc = dp.pc;
        }
        if ops.operand_write {
            self.dp.reg_a = rs1;
            self.dp.reg_b = rs2;
        }
        if ops.alu_out_write {
            self.dp.alu_out = alu.value;
        }
        if let Some(req) = req.filter(|_| ops.mdr_write && mem.ready) {
            self.dp.mdr = Self::load_value(&req, mem.data);
        }

        self.stats.cycles += 1;
        if retire {
            self.stats.record_retire(dp.ir.opcode());
        }
        if self.trace {
            trace!(
                state = %state,
                next = %next,
                pc = format_args!("{:#010x}", self.dp.pc),
                "cycle"
            );
            if retire {
                trace!(
                    pc = format_args!("{:#010x}", dp.old_pc),
                    inst = format_args!("{:#010x}", dp.ir),
                    asm = %disassemble(dp.ir),
                    "retire"
                );
            }
        }

        self.state = next;
        retire
    }

    /// Runs cycles until the next instruction retires or `max_cycles` elapse.
    ///
    /// # Returns
    ///
    /// The number of cycles taken, or `None` if nothing retired within the budget.
    pub fn step_instruction<B: Bus + ?Sized>(
        &mut self,
        bus: &mut B,
        max_cycles: u64,
    ) -> Option<u64> {
        for cycle in 1..=max_cycles {
            bus.tick();
            if self.tick(bus) {
                return Some(cycle);
            }
        }
        None
    }

    /// Drives the ALU operand multiplexers and evaluates the operation.
    fn execute_alu(&self, ops: &MicroOps) -> AluResult {
        let dp = &self.dp;
        let a = match ops.alu_a {
            AluASel::Pc => dp.pc,
            AluASel::OldPc => dp.old_pc,
            AluASel::RegA => dp.reg_a,
            AluASel::Zero => 0,
        };
        let b = match ops.alu_b {
            AluBSel::Four => INSTRUCTION_SIZE,
            AluBSel::Imm => imm::immediate(dp.ir),
            AluBSel::RegB => dp.reg_b,
        };
        Alu::execute(ops.alu_op, a, b)
    }
}
