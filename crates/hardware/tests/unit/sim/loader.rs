//! Image formats and format detection.

use std::io::Write;
use std::path::Path;

use pretty_assertions::assert_eq;
use rvmc_core::common::SimError;
use rvmc_core::sim::loader::{parse_elf, parse_verilog_hex, raw_binary};
use rvmc_core::sim::{load_image, ImageFormat, Segment};
use tempfile::NamedTempFile;

#[test]
fn verilog_hex_segments() {
    let text = "\
// boot
@00000000
13 05 A0 00 73 00 10 00
@00000100 // data
EF BE AD DE
";
    let image = parse_verilog_hex(text).unwrap();
    assert_eq!(
        image.segments,
        vec![
            Segment {
                addr: 0,
                data: vec![0x13, 0x05, 0xA0, 0x00, 0x73, 0x00, 0x10, 0x00],
            },
            Segment {
                addr: 0x100,
                data: vec![0xEF, 0xBE, 0xAD, 0xDE],
            },
        ]
    );
    assert_eq!(image.entry, None);
    assert_eq!(
        image.words(),
        vec![(0, 0x00A0_0513), (4, 0x0010_0073), (0x100, 0xDEAD_BEEF)]
    );
    assert_eq!(image.len(), 12);
}

#[test]
fn bytes_before_first_record_load_at_zero() {
    let image = parse_verilog_hex("01 02\n@10\n@20 03").unwrap();
    assert_eq!(image.segments.len(), 2);
    assert_eq!(image.segments[0].addr, 0);
    assert_eq!(image.segments[1], Segment { addr: 0x20, data: vec![3] });
}

#[test]
fn bad_hex_reports_line() {
    let err = parse_verilog_hex("@0\n00 11\nzz").unwrap_err();
    assert!(matches!(err, SimError::HexParse { line: 3, .. }), "{err}");
}

#[test]
fn partial_word_is_zero_padded() {
    let image = raw_binary(vec![0xAA, 0xBB, 0xCC], 0x40);
    assert_eq!(image.words(), vec![(0x40, 0x00CC_BBAA)]);
}

#[test]
fn format_detection() {
    let elf = b"\x7fELF\x01\x01";
    assert_eq!(ImageFormat::detect(Path::new("a.bin"), elf), ImageFormat::Elf);
    assert_eq!(ImageFormat::detect(Path::new("a.hex"), b"@0"), ImageFormat::VerilogHex);
    assert_eq!(ImageFormat::detect(Path::new("a.mem"), b"00"), ImageFormat::VerilogHex);
    assert_eq!(ImageFormat::detect(Path::new("a.bin"), b"\x13\x00"), ImageFormat::Binary);
}

#[test]
fn truncated_elf_is_rejected() {
    assert!(matches!(parse_elf(b"\x7fELF\x01"), Err(SimError::Elf(_))));
}

#[test]
fn load_hex_file() {
    let mut file = tempfile::Builder::new().suffix(".hex").tempfile().unwrap();
    writeln!(file, "@00000080\n13 00 00 00").unwrap();
    let image = load_image(file.path(), 0).unwrap();
    assert_eq!(image.words(), vec![(0x80, 0x13)]);
}

#[test]
fn load_raw_binary_at_ram_base() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&0x0000_0013u32.to_le_bytes()).unwrap();
    let image = load_image(file.path(), 0x8000_0000).unwrap();
    assert_eq!(image.segments[0].addr, 0x8000_0000);
    assert_eq!(image.words(), vec![(0x8000_0000, 0x13)]);
}

#[test]
fn missing_file() {
    let err = load_image("/nonexistent/prog.hex", 0).unwrap_err();
    assert!(matches!(err, SimError::Io { .. }));
}
