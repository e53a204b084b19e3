//! Data port requests and load completion.
//!
//! MEM_READ and MEM_WRITE present the effective address held in ALUOut. Stores
//! shift Reg B into its byte lanes; loads pick their lanes out of the returned
//! word and extend them into the MDR.

use super::Cpu;
use crate::core::control::signals::MemWidth;
use crate::core::fsm::MicroOps;
use crate::core::units::lsu::Lsu;
use crate::isa::instruction::InstructionBits;
use crate::soc::{Bus, DataRequest, DataResponse};

/// funct3 bit selecting a zero-extending load.
const LOAD_UNSIGNED_BIT: u32 = 0b100;

impl Cpu {
    /// Builds the data port request for this cycle, or `None` when `valid` is low.
    pub(crate) fn data_request(&self, ops: &MicroOps) -> Option<DataRequest> {
        if !ops.mem_valid {
            return None;
        }
        let f3 = self.dp.ir.funct3();
        let width = MemWidth::from_funct3(f3);
        let addr = self.dp.alu_out;
        let lane = Lsu::store(width, addr, self.dp.reg_b);
        Some(DataRequest {
            addr,
            data: if ops.mem_write { lane.data } else { 0 },
            byte_enable: if ops.mem_write { lane.byte_enable } else { 0 },
            write: ops.mem_write,
            width,
            signed: f3 & LOAD_UNSIGNED_BIT == 0,
        })
    }

    /// Presents the request on the bus and updates the memory statistics.
    pub(crate) fn access_data<B: Bus + ?Sized>(
        &mut self,
        bus: &mut B,
        req: Option<&DataRequest>,
    ) -> DataResponse {
        let Some(req) = req else {
            return DataResponse::default();
        };
        let resp = bus.data(req);
        match (resp.ready, req.write) {
            (false, _) => self.stats.stalls_mem += 1,
            (true, true) => self.stats.mem_writes += 1,
            (true, false) => self.stats.mem_reads += 1,
        }
        resp
    }

    /// Formats the returned word for the MDR.
    pub(crate) const fn load_value(req: &DataRequest, word: u32) -> u32 {
        Lsu::load(req.width, req.signed, req.addr, word)
    }
}
