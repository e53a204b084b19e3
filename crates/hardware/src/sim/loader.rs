//! Program image loading.
//!
//! This module turns a file on disk into memory segments for the system. It supports:
//! 1. **Verilog hex:** `objcopy -O verilog` output: `@ADDR` records followed by hex bytes.
//! 2. **ELF32:** PT_LOAD segments of a RISC-V executable; the entry point becomes the reset PC.
//! 3. **Raw binary:** The file contents placed at the RAM base.
//!
//! The format is chosen from the ELF magic first, then the file extension.

use std::fs;
use std::path::Path;

use object::read::elf::ElfFile32;
use object::{Architecture, Endianness, Object, ObjectSegment};

use crate::common::SimError;

/// First four bytes of every ELF file.
const ELF_MAGIC: &[u8; 4] = b"\x7fELF";

/// A contiguous run of bytes to place in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Segment {
    /// Load address of the first byte.
    pub addr: u32,
    /// Segment contents.
    pub data: Vec<u8>,
}

/// A loaded program: its segments and, for ELF files, the entry point.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    /// Segments in file order.
    pub segments: Vec<Segment>,
    /// Entry point, if the format records one.
    pub entry: Option<u32>,
}

impl Image {
    /// Returns every aligned little-endian word in the image as `(address, word)`.
    ///
    /// Trailing bytes that do not fill a word are zero-padded.
    pub fn words(&self) -> Vec<(u32, u32)> {
        self.segments
            .iter()
            .flat_map(|seg| {
                seg.data.chunks(4).zip(0u32..).map(move |(chunk, i)| {
                    let mut bytes = [0u8; 4];
                    bytes[..chunk.len()].copy_from_slice(chunk);
                    (seg.addr.wrapping_add(i * 4), u32::from_le_bytes(bytes))
                })
            })
            .collect()
    }

    /// Total number of bytes across all segments.
    pub fn len(&self) -> usize {
        self.segments.iter().map(|s| s.data.len()).sum()
    }

    /// Returns `true` if the image holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// On-disk image formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    /// `objcopy -O verilog` text.
    VerilogHex,
    /// ELF32 executable.
    Elf,
    /// Flat binary.
    Binary,
}

impl ImageFormat {
    /// Picks the format from the ELF magic, then the extension (`.hex`, `.vh`, `.mem`).
    pub fn detect(path: &Path, bytes: &[u8]) -> Self {
        if bytes.starts_with(ELF_MAGIC) {
            return Self::Elf;
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some("hex" | "vh" | "mem") => Self::VerilogHex,
            _ => Self::Binary,
        }
    }
}

/// Reads and parses the image at `path`.
///
/// # Arguments
///
/// * `path` - Image file.
/// * `ram_base` - Load address for raw binaries.
///
/// # Errors
///
/// Returns [`SimError::Io`] if the file cannot be read, [`SimError::HexParse`] for a
/// malformed hex image, or [`SimError::Elf`] for an unusable ELF file.
pub fn load_image(path: impl AsRef<Path>, ram_base: u32) -> Result<Image, SimError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| SimError::Io {
        path: path.display().to_string(),
        source,
    })?;
    match ImageFormat::detect(path, &bytes) {
        ImageFormat::Elf => parse_elf(&bytes),
        ImageFormat::VerilogHex => {
            let text = String::from_utf8_lossy(&bytes);
            parse_verilog_hex(&text)
        }
        ImageFormat::Binary => Ok(raw_binary(bytes, ram_base)),
    }
}

/// Wraps a flat binary as a single segment at `base`.
pub fn raw_binary(data: Vec<u8>, base: u32) -> Image {
    Image {
        segments: vec![Segment { addr: base, data }],
        entry: None,
    }
}

/// Parses `objcopy -O verilog` output.
///
/// Each `@` record starts a new segment at the given hexadecimal byte address.
/// Bytes before the first record load at address 0. `//` comments are ignored.
///
/// # Errors
///
/// Returns [`SimError::HexParse`] with the one-based line number on a bad token.
pub fn parse_verilog_hex(text: &str) -> Result<Image, SimError> {
    let mut segments: Vec<Segment> = Vec::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.split("//").next().unwrap_or_default();
        for token in line.split_whitespace() {
            if let Some(addr) = token.strip_prefix('@') {
                let addr = u32::from_str_radix(addr, 16).map_err(|e| SimError::HexParse {
                    line: line_no,
                    message: format!("bad address `{token}`: {e}"),
                })?;
                segments.push(Segment {
                    addr,
                    data: Vec::new(),
                });
                continue;
            }
            let byte = u8::from_str_radix(token, 16).map_err(|e| SimError::HexParse {
                line: line_no,
                message: format!("bad byte `{token}`: {e}"),
            })?;
            match segments.last_mut() {
                Some(seg) => seg.data.push(byte),
                None => segments.push(Segment {
                    addr: 0,
                    data: vec![byte],
                }),
            }
        }
    }

    segments.retain(|s| !s.data.is_empty());
    Ok(Image {
        segments,
        entry: None,
    })
}

/// Extracts the PT_LOAD segments and entry point of a 32-bit RISC-V ELF executable.
///
/// # Errors
///
/// Returns [`SimError::Elf`] if the file is not a parseable ELF32 RISC-V image.
pub fn parse_elf(bytes: &[u8]) -> Result<Image, SimError> {
    let elf = ElfFile32::<Endianness>::parse(bytes).map_err(|e| SimError::Elf(e.to_string()))?;
    if elf.architecture() != Architecture::Riscv32 {
        return Err(SimError::Elf(format!(
            "expected a riscv32 executable, found {:?}",
            elf.architecture()
        )));
    }

    let mut segments = Vec::new();
    for seg in elf.segments() {
        let data = seg.data().map_err(|e| SimError::Elf(e.to_string()))?;
        if data.is_empty() {
            continue;
        }
        let addr = u32::try_from(seg.address()).map_err(|_| {
            SimError::Elf(format!("segment address {:#x} exceeds 32 bits", seg.address()))
        })?;
        segments.push(Segment {
            addr,
            data: data.to_vec(),
        });
    }

    let entry = u32::try_from(elf.entry())
        .map_err(|_| SimError::Elf(format!("entry {:#x} exceeds 32 bits", elf.entry())))?;
    Ok(Image {
        segments,
        entry: Some(entry),
    })
}
