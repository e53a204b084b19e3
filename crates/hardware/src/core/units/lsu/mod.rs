//! Load/Store Unit (LSU).
//!
//! Formats data between the 32-bit memory word and the register file:
//! 1. **Stores:** Positions the byte or half-word in its lane and builds the
//!    byte-enable mask, so a sub-word store touches only its own bytes.
//! 2. **Loads:** Extracts the lane selected by the low address bits and sign- or
//!    zero-extends it.
//! 3. **Byte Enables:** Merges an enabled write into the old word, for memories.
//!
//! Half-word lanes are selected by address bit 1 and word accesses ignore the low
//! two address bits.

use crate::core::control::signals::MemWidth;

/// Byte-enable mask covering a whole word.
pub const FULL_WORD_MASK: u8 = 0b1111;

/// Formatted store presented on the data port.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreLane {
    /// Write data shifted into its byte lanes.
    pub data: u32,
    /// One bit per byte of the word (bit 0 is byte 0).
    pub byte_enable: u8,
}

/// Load/Store Unit (LSU).
#[derive(Debug)]
pub struct Lsu;

impl Lsu {
    /// Formats a store.
    ///
    /// # Arguments
    ///
    /// * `width` - Store width.
    /// * `addr` - Effective byte address.
    /// * `value` - `rs2` value; only the low `width` bytes are stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvmc_core::core::control::signals::MemWidth;
    /// use rvmc_core::core::units::lsu::Lsu;
    ///
    /// let lane = Lsu::store(MemWidth::Byte, 0x101, 0x1122_3344);
    /// assert_eq!(lane.data, 0x0000_4400);
    /// assert_eq!(lane.byte_enable, 0b0010);
    /// ```
    pub const fn store(width: MemWidth, addr: u32, value: u32) -> StoreLane {
        match width {
            MemWidth::Byte => {
                let offset = addr & 0b11;
                StoreLane {
                    data: (value & 0xFF) << (offset * 8),
                    byte_enable: 1 << offset,
                }
            }
            MemWidth::Half => {
                let offset = addr & 0b10;
                StoreLane {
                    data: (value & 0xFFFF) << (offset * 8),
                    byte_enable: 0b11 << offset,
                }
            }
            MemWidth::Word => StoreLane {
                data: value,
                byte_enable: FULL_WORD_MASK,
            },
        }
    }

    /// Extracts and extends load data.
    ///
    /// # Arguments
    ///
    /// * `width` - Load width.
    /// * `signed` - Sign-extend (LB, LH) rather than zero-extend (LBU, LHU).
    /// * `addr` - Effective byte address.
    /// * `word` - Aligned memory word containing the data.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvmc_core::core::control::signals::MemWidth;
    /// use rvmc_core::core::units::lsu::Lsu;
    ///
    /// assert_eq!(Lsu::load(MemWidth::Byte, true, 1, 0x89AB_CDEF), 0xFFFF_FFCD);
    /// assert_eq!(Lsu::load(MemWidth::Half, false, 2, 0x89AB_CDEF), 0x0000_89AB);
    /// ```
    pub const fn load(width: MemWidth, signed: bool, addr: u32, word: u32) -> u32 {
        match width {
            MemWidth::Byte => {
                let byte = (word >> ((addr & 0b11) * 8)) & 0xFF;
                if signed { byte as u8 as i8 as i32 as u32 } else { byte }
            }
            MemWidth::Half => {
                let half = (word >> ((addr & 0b10) * 8)) & 0xFFFF;
                if signed { half as u16 as i16 as i32 as u32 } else { half }
            }
            MemWidth::Word => word,
        }
    }

    /// Merges the enabled bytes of `data` into `old`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvmc_core::core::units::lsu::Lsu;
    ///
    /// assert_eq!(Lsu::merge(0xAAAA_AAAA, 0x3344_0000, 0b1100), 0x3344_AAAA);
    /// ```
    pub const fn merge(old: u32, data: u32, byte_enable: u8) -> u32 {
        let mut mask = 0u32;
        let mut i = 0;
        while i < 4 {
            if byte_enable & (1 << i) != 0 {
                mask |= 0xFF << (i * 8);
            }
            i += 1;
        }
        (old & !mask) | (data & mask)
    }
}
