//! Control signal definitions.
//!
//! This module defines the plain-data control bundles exchanged between the decoder,
//! the ALU-control resolver and the FSM. It includes:
//! 1. **ALU Signals:** The ten ALU operations and the decoder's two-bit operation class.
//! 2. **Operand Selection:** Sources for the ALU's first and second operand.
//! 3. **Write-Back:** Source of the value written to `rd`.
//! 4. **Memory and CSR Signals:** Access width and CSR operation selectors.
//! 5. **Control Intent:** The complete decoder output for one opcode.

/// Arithmetic Logic Unit operations.
///
/// Discriminants are the 4-bit hardware encodings driven on the ALU-control bus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AluOp {
    /// Addition.
    #[default]
    Add = 0b0000,
    /// Shift Left Logical.
    Sll = 0b0001,
    /// Set Less Than (Signed).
    Slt = 0b0010,
    /// Set Less Than Unsigned.
    Sltu = 0b0011,
    /// Bitwise XOR.
    Xor = 0b0100,
    /// Shift Right Logical.
    Srl = 0b0101,
    /// Bitwise OR.
    Or = 0b0110,
    /// Bitwise AND.
    And = 0b0111,
    /// Subtraction.
    Sub = 0b1000,
    /// Shift Right Arithmetic.
    Sra = 0b1101,
}

impl AluOp {
    /// Returns the 4-bit ALU-control encoding.
    pub const fn encoding(self) -> u8 {
        self as u8
    }
}

/// Two-bit ALU-operation class produced by the decoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AluOpClass {
    /// `00`: add, used for addresses, upper immediates and jumps.
    #[default]
    Address,
    /// `01`: compare for a conditional branch.
    Branch,
    /// `10`: register-register arithmetic, selected by funct3 and funct7.
    RegReg,
    /// `11`: register-immediate arithmetic, selected by funct3.
    RegImm,
}

impl AluOpClass {
    /// Returns the class as its two-bit encoding.
    pub const fn bits(self) -> u8 {
        match self {
            Self::Address => 0b00,
            Self::Branch => 0b01,
            Self::RegReg => 0b10,
            Self::RegImm => 0b11,
        }
    }

    /// Builds a class from the low two bits of `bits`.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Self::Address,
            0b01 => Self::Branch,
            0b10 => Self::RegReg,
            _ => Self::RegImm,
        }
    }
}

/// Source selection for the first ALU operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OpASrc {
    /// Register `rs1` (through the Reg A barrier).
    #[default]
    Reg,
    /// Address of the current instruction (OldPC).
    Pc,
    /// Constant zero (LUI).
    Zero,
}

/// Source selection for the second ALU operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OpBSrc {
    /// Register `rs2` (through the Reg B barrier).
    #[default]
    Reg,
    /// Sign-extended immediate.
    Imm,
}

/// Source of the value written back to `rd`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WbSrc {
    /// ALU result held in ALUOut.
    #[default]
    Alu,
    /// Load data held in the MDR.
    Mem,
    /// Return address (PC + 4).
    PcPlus4,
}

/// CSR operation selected by funct3 of a Zicsr instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CsrOp {
    /// No CSR access.
    #[default]
    None,
    /// Read/Write (CSRRW, CSRRWI).
    Rw,
    /// Read/Set (CSRRS, CSRRSI).
    Rs,
    /// Read/Clear (CSRRC, CSRRCI).
    Rc,
}

impl CsrOp {
    /// Maps a SYSTEM funct3 to its CSR operation. The immediate bit is ignored.
    pub const fn from_funct3(funct3: u32) -> Self {
        match funct3 & 0b011 {
            0b01 => Self::Rw,
            0b10 => Self::Rs,
            0b11 => Self::Rc,
            _ => Self::None,
        }
    }
}

/// Memory access width for loads and stores.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MemWidth {
    /// 8-bit access.
    Byte,
    /// 16-bit access.
    Half,
    /// 32-bit access.
    #[default]
    Word,
}

impl MemWidth {
    /// Maps a load/store funct3 to its width. Unknown widths fall back to a word.
    pub const fn from_funct3(funct3: u32) -> Self {
        match funct3 & 0b011 {
            0b00 => Self::Byte,
            0b01 => Self::Half,
            _ => Self::Word,
        }
    }

    /// Returns the access size in bytes.
    pub const fn bytes(self) -> u32 {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
        }
    }
}

/// Decoder output for one opcode.
///
/// The default value is the NOP intent: no register write, no memory write,
/// no branch or jump.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ControlIntent {
    /// Write `rd` at write-back.
    pub reg_write: bool,
    /// First ALU operand source.
    pub alu_src_a: OpASrc,
    /// Second ALU operand source.
    pub alu_src_b: OpBSrc,
    /// Issue a memory write.
    pub mem_write: bool,
    /// Write-back source.
    pub wb_src: WbSrc,
    /// Conditional branch.
    pub branch: bool,
    /// Unconditional jump (JAL, JALR).
    pub jump: bool,
    /// ALU-operation class.
    pub alu_class: AluOpClass,
}

impl ControlIntent {
    /// The all-zero intent used for FENCE, SYSTEM and unknown opcodes.
    pub const NOP: Self = Self {
        reg_write: false,
        alu_src_a: OpASrc::Reg,
        alu_src_b: OpBSrc::Reg,
        mem_write: false,
        wb_src: WbSrc::Alu,
        branch: false,
        jump: false,
        alu_class: AluOpClass::Address,
    };

    /// Returns `true` for loads (write-back from memory).
    pub const fn is_load(&self) -> bool {
        matches!(self.wb_src, WbSrc::Mem)
    }
}
