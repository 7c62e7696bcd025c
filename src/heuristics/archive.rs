//! Archive inspector.
//!
//! Walks the central directory of a ZIP archive without extracting any
//! member content, flagging decompression bombs (extreme compression
//! ratios) and members with executable or script extensions.

use std::fs::File;
use std::path::Path;

use zip::ZipArchive;

use crate::buffer::AnalysisBuffer;
use crate::heuristics::HeuristicOutcome;
use crate::report::Finding;
use crate::scanner::AnalysisTarget;

const BOMB_WEIGHT: u32 = 5;
const EXECUTABLE_MEMBER_WEIGHT: u32 = 3;
/// Compressed-to-uncompressed ratio above which a member reads as a bomb.
const BOMB_RATIO: f64 = 100.0;

const EXECUTABLE_EXTENSIONS: &[&str] =
    &["exe", "vbs", "bat", "sh", "dex", "so", "dll", "ps1"];

pub(crate) fn scan(buffer: &AnalysisBuffer, target: &AnalysisTarget) -> HeuristicOutcome {
    if !buffer.bytes().starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
        return HeuristicOutcome::Ran(Vec::new());
    }

    let archive = File::open(&target.current_path)
        .map_err(|_| ())
        .and_then(|f| ZipArchive::new(f).map_err(|_| ()));
    let mut archive = match archive {
        Ok(a) => a,
        Err(()) => {
            return HeuristicOutcome::Ran(vec![Finding::intel(
                "Archive could not be read (corrupt or password-protected)",
            )])
        }
    };

    let mut findings = Vec::new();

    for i in 0..archive.len() {
        // by_index_raw lists the entry without decompressing it.
        let entry = match archive.by_index_raw(i) {
            Ok(e) => e,
            Err(_) => continue,
        };
        let name = entry.name().to_string();
        let compressed = entry.compressed_size();
        let uncompressed = entry.size();

        if compressed > 0 {
            let ratio = uncompressed as f64 / compressed as f64;
            if ratio > BOMB_RATIO {
                findings.push(Finding::threat(
                    BOMB_WEIGHT,
                    format!(
                        "Possible decompression bomb: {name} expands {}:1 ({uncompressed} from {compressed} bytes)",
                        ratio.round() as u64
                    ),
                ));
            }
        }

        if has_executable_extension(&name) {
            findings.push(Finding::threat(
                EXECUTABLE_MEMBER_WEIGHT,
                format!("Executable inside archive: {name}"),
            ));
        }
    }

    HeuristicOutcome::Ran(findings)
}

fn has_executable_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| EXECUTABLE_EXTENSIONS.contains(&ext.as_str()))
}
