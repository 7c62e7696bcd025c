//! Bounded file reading.
//!
//! Loads a size-capped analysis window from a file. Small files are read
//! whole; files above the RAM ceiling are represented by a head segment plus
//! a fixed-size tail segment. The tail must be preserved because the
//! trailing-data detector depends on end-of-file content being present even
//! for very large files.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use tracing::debug;

use crate::config::ScanConfig;
use crate::report::Finding;

/// The bounded in-memory byte window shared by every heuristic.
///
/// Invariant: `len() <= ceiling` regardless of file size. Immutable after
/// construction.
#[derive(Debug)]
pub struct AnalysisBuffer {
    data: Vec<u8>,
    head_len: usize,
    partial: bool,
    ceiling: usize,
}

impl AnalysisBuffer {
    /// Read a bounded window from `path`.
    ///
    /// Never fails: read errors become warning findings and the buffer keeps
    /// whatever was read before the failure (possibly nothing). The hard
    /// size cap is enforced by the scanner before this is called.
    pub fn load(path: &Path, config: &ScanConfig) -> (Self, Vec<Finding>) {
        let ceiling = config.ram_ceiling;
        let mut warnings = Vec::new();

        let mut file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                warnings.push(Finding::intel(format!(
                    "Could not open file for analysis: {e}"
                )));
                return (Self::empty(ceiling), warnings);
            }
        };

        let size = file.metadata().map(|m| m.len()).unwrap_or(0);

        if size <= ceiling as u64 {
            let mut data = Vec::with_capacity(size as usize);
            // take() keeps the ceiling invariant even if the file grew
            // between stat and read.
            if let Err(e) = file.by_ref().take(ceiling as u64).read_to_end(&mut data) {
                warnings.push(Finding::intel(format!("Read error during analysis: {e}")));
            }
            let head_len = data.len();
            return (Self { data, head_len, partial: false, ceiling }, warnings);
        }

        // Oversized file: head up to (ceiling - tail_reserve), then seek to
        // the end and append the tail reservation. The clamp keeps the
        // ceiling invariant even for a config that bypassed validate().
        let tail_reserve = config.tail_reserve.min(ceiling);
        let head_target = ceiling - tail_reserve;
        let mut data = Vec::with_capacity(ceiling);

        if let Err(e) = file.by_ref().take(head_target as u64).read_to_end(&mut data) {
            warnings.push(Finding::intel(format!("Read error during analysis: {e}")));
        }
        let head_len = data.len();

        match file.seek(SeekFrom::End(-(tail_reserve as i64))) {
            Ok(_) => {
                if let Err(e) = file.by_ref().take(tail_reserve as u64).read_to_end(&mut data) {
                    warnings.push(Finding::intel(format!(
                        "Read error while loading file tail: {e}"
                    )));
                }
            }
            Err(e) => {
                // Unseekable or shrunk file: analyze the head only.
                debug!("tail seek failed for {}: {e}", path.display());
            }
        }

        warnings.push(Finding::intel(format!(
            "Large file ({size} bytes): analyzed first {head_len} bytes and last {} bytes only",
            data.len() - head_len
        )));

        (Self { data, head_len, partial: true, ceiling }, warnings)
    }

    fn empty(ceiling: usize) -> Self {
        Self { data: Vec::new(), head_len: 0, partial: false, ceiling }
    }

    /// The full window: head segment followed by the tail segment.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// The head segment, starting at file offset zero.
    pub fn head(&self) -> &[u8] {
        &self.data[..self.head_len]
    }

    /// The tail segment. Empty when the whole file fit in the buffer or the
    /// tail seek failed.
    pub fn tail(&self) -> &[u8] {
        &self.data[self.head_len..]
    }

    /// True when the buffer holds only the head and tail of the file.
    pub fn partial(&self) -> bool {
        self.partial
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }
}
