//! Trailing-data (steganography/overlay) detector.
//!
//! Image formats with a defined end-of-data marker should not carry
//! anything meaningful after it; appended bytes are a common way to smuggle
//! payloads inside an innocuous-looking picture. The search runs over the
//! last portion of the analysis buffer, which the bounded reader preserves
//! as a tail segment even for files larger than the RAM ceiling.

use crate::buffer::AnalysisBuffer;
use crate::heuristics::{rfind, HeuristicOutcome};
use crate::report::Finding;

const TRAILING_WEIGHT: u32 = 5;
/// Bytes of slack tolerated after the end marker (padding, null runs).
const TRAILER_SLACK: usize = 100;
/// Window searched at the end of the buffer.
const SEARCH_WINDOW: usize = 1024 * 1024;

pub(crate) fn scan(buffer: &AnalysisBuffer) -> HeuristicOutcome {
    let data = buffer.bytes();

    // (end marker, bytes belonging to the marker structure, format name)
    let (marker, marker_len, format): (&[u8], usize, &str) =
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            (&[0xFF, 0xD9], 2, "JPEG")
        } else if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            // IEND chunk type plus its 4-byte CRC.
            (b"IEND", 8, "PNG")
        } else {
            return HeuristicOutcome::Ran(Vec::new());
        };

    let window_start = data.len().saturating_sub(SEARCH_WINDOW);
    let window = &data[window_start..];

    let Some(pos) = rfind(window, marker) else {
        // No trailer in the window; truncated or malformed image.
        return HeuristicOutcome::Ran(Vec::new());
    };

    let trailing = window.len().saturating_sub(pos + marker_len);
    if trailing > TRAILER_SLACK {
        return HeuristicOutcome::Ran(vec![Finding::threat(
            TRAILING_WEIGHT,
            format!("Hidden data appended after {format} end marker ({trailing} bytes)"),
        )]);
    }

    HeuristicOutcome::Ran(Vec::new())
}
