//! PE header inspector.
//!
//! Reads the COFF compile timestamp at a fixed offset and sanity-checks it
//! against a plausible calendar range; forged build dates (timestomping)
//! are a common anti-forensics trick. Also scans the header region for the
//! section-name residue left by well-known packers.
//!
//! Field offsets are read by hand with bounds checks rather than through a
//! full PE parser: the analysis buffer may be a truncated head+tail window
//! that no whole-file parser would accept, but the header always lives in
//! the head segment.

use chrono::{DateTime, Datelike};

use crate::buffer::AnalysisBuffer;
use crate::heuristics::{contains, HeuristicOutcome};
use crate::report::Finding;

const TIMESTOMP_WEIGHT: u32 = 3;
const PACKER_WEIGHT: u32 = 4;

/// Plausible compile-year range; anything outside reads as forged.
const MIN_SANE_YEAR: i32 = 1990;
const MAX_SANE_YEAR: i32 = 2030;

/// Offset of `e_lfanew` in the DOS header.
const E_LFANEW_OFFSET: usize = 0x3C;
/// Window scanned for packer section names.
const PACKER_SCAN_WINDOW: usize = 4096;

const PACKER_NAMES: &[&[u8]] = &[b"UPX", b"Themida", b"VMProtect", b"ASPack"];

pub(crate) fn scan(buffer: &AnalysisBuffer) -> HeuristicOutcome {
    let data = buffer.head();
    if !data.starts_with(b"MZ") {
        return HeuristicOutcome::Ran(Vec::new());
    }

    let mut findings = Vec::new();

    if let Some(timestamp) = read_compile_timestamp(data) {
        match compile_year(timestamp) {
            Some(year) if (MIN_SANE_YEAR..=MAX_SANE_YEAR).contains(&year) => {
                findings.push(Finding::intel(format!("Compiled: {year}")));
            }
            Some(year) => {
                findings.push(Finding::threat(
                    TIMESTOMP_WEIGHT,
                    format!("Suspicious compilation year {year} (possible timestomping)"),
                ));
            }
            None => {}
        }
    }

    let window = &data[..data.len().min(PACKER_SCAN_WINDOW)];
    for packer in PACKER_NAMES {
        if contains(window, packer) {
            findings.push(Finding::threat(
                PACKER_WEIGHT,
                format!(
                    "Packer/protector signature in header: {}",
                    String::from_utf8_lossy(packer)
                ),
            ));
        }
    }

    HeuristicOutcome::Ran(findings)
}

/// Read the COFF `TimeDateStamp`, bounds-checking every access so a
/// truncated or malformed header degrades to "no timestamp" instead of a
/// panic.
fn read_compile_timestamp(data: &[u8]) -> Option<u32> {
    let e_lfanew = read_u32_le(data, E_LFANEW_OFFSET)? as usize;
    // "PE\0\0" magic, then machine (2), section count (2), timestamp (4).
    let magic = data.get(e_lfanew..e_lfanew + 4)?;
    if magic != b"PE\0\0" {
        return None;
    }
    read_u32_le(data, e_lfanew + 8)
}

fn compile_year(timestamp: u32) -> Option<i32> {
    DateTime::from_timestamp(i64::from(timestamp), 0).map(|dt| dt.year())
}

fn read_u32_le(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset + 4)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanConfig;
    use std::io::Write;

    /// Minimal MZ/PE image with the given compile timestamp.
    fn craft_pe(timestamp: u32) -> Vec<u8> {
        let mut data = vec![0u8; 0x200];
        data[0] = b'M';
        data[1] = b'Z';
        data[E_LFANEW_OFFSET..E_LFANEW_OFFSET + 4].copy_from_slice(&0x80u32.to_le_bytes());
        data[0x80..0x84].copy_from_slice(b"PE\0\0");
        data[0x88..0x8C].copy_from_slice(&timestamp.to_le_bytes());
        data
    }

    fn findings_of(content: &[u8]) -> Vec<Finding> {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(content).unwrap();
        let (buffer, _) = AnalysisBuffer::load(tmp.path(), &ScanConfig::default());
        match scan(&buffer) {
            HeuristicOutcome::Ran(f) => f,
            HeuristicOutcome::Failed(stage) => panic!("pe scan failed: {stage}"),
        }
    }

    #[test]
    fn test_1975_timestamp_is_timestomping() {
        // 157766400 = 1975-01-01T00:00:00Z
        let findings = findings_of(&craft_pe(157_766_400));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].delta, TIMESTOMP_WEIGHT);
        assert!(findings[0].message.contains("1975"));
    }

    #[test]
    fn test_2022_timestamp_is_informational() {
        // 1650000000 = 2022-04-15
        let findings = findings_of(&craft_pe(1_650_000_000));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].delta, 0);
        assert_eq!(findings[0].message, "Compiled: 2022");
    }

    #[test]
    fn test_packer_names_scored_each() {
        let mut data = craft_pe(1_650_000_000);
        data[0x100..0x104].copy_from_slice(b"UPX0");
        data[0x110..0x118].copy_from_slice(b"VMProtec");
        data[0x118] = b't';
        let findings = findings_of(&data);

        let packer_score: u32 = findings
            .iter()
            .filter(|f| f.message.contains("Packer"))
            .map(|f| f.delta)
            .sum();
        assert_eq!(packer_score, 2 * PACKER_WEIGHT);
    }

    #[test]
    fn test_header_outside_buffer_is_ignored() {
        let mut data = vec![0u8; 0x80];
        data[0] = b'M';
        data[1] = b'Z';
        // e_lfanew points far past the end of the buffer.
        data[E_LFANEW_OFFSET..E_LFANEW_OFFSET + 4]
            .copy_from_slice(&0xFFFF_0000u32.to_le_bytes());
        let findings = findings_of(&data);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_non_pe_ignored() {
        let findings = findings_of(b"\x7fELF rest of an elf file");
        assert!(findings.is_empty());
    }
}
