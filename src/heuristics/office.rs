//! Office macro detector.
//!
//! Modern Office documents are ZIP containers; a macro-enabled document
//! carries a `vbaProject.bin` member (or loose `.bas` sources). Legacy OLE
//! documents keep VBA in streams that start with the `Attribute VB_` text
//! marker, which shows up in a raw buffer scan.

use std::fs::File;

use zip::ZipArchive;

use crate::buffer::AnalysisBuffer;
use crate::heuristics::{contains, HeuristicOutcome};
use crate::report::Finding;
use crate::scanner::AnalysisTarget;

const MACRO_WEIGHT: u32 = 8;
const ZIP_LOCAL_HEADER: &[u8] = &[0x50, 0x4B, 0x03, 0x04];
const LEGACY_VBA_MARKER: &[u8] = b"Attribute VB_";

pub(crate) fn scan(buffer: &AnalysisBuffer, target: &AnalysisTarget) -> HeuristicOutcome {
    if buffer.bytes().starts_with(ZIP_LOCAL_HEADER) {
        return scan_zip_container(target);
    }

    // Legacy (OLE) path: look for the VBA attribute marker in the raw bytes.
    if contains(buffer.bytes(), LEGACY_VBA_MARKER) {
        return HeuristicOutcome::Ran(vec![Finding::threat(
            MACRO_WEIGHT,
            "Legacy VBA macro marker found in document",
        )]);
    }

    HeuristicOutcome::Ran(Vec::new())
}

fn scan_zip_container(target: &AnalysisTarget) -> HeuristicOutcome {
    let archive = File::open(&target.current_path).map_err(|_| ()).and_then(|f| {
        ZipArchive::new(f).map_err(|_| ())
    });
    let archive = match archive {
        Ok(a) => a,
        // Corrupt or unreadable container: swallowed, visible in the type.
        Err(()) => return HeuristicOutcome::Failed("office-macros"),
    };

    for name in archive.file_names() {
        if name.contains("vbaProject.bin") || name.to_lowercase().ends_with(".bas") {
            return HeuristicOutcome::Ran(vec![Finding::threat(
                MACRO_WEIGHT,
                format!("Document contains VBA macros ({name})"),
            )]);
        }
    }

    HeuristicOutcome::Ran(Vec::new())
}
