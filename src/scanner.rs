//! Scan orchestration.
//!
//! One file is analyzed start to finish: bounded read, streaming hash,
//! signature classification, every heuristic in order, optional reputation
//! lookup, aggregation, quarantine. All stages are sequential and blocking;
//! nothing but the quarantine controller touches the disk for writing.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::buffer::AnalysisBuffer;
use crate::config::ScanConfig;
use crate::error::{Result, SiftError};
use crate::hashing::{sha256_file, HASH_UNAVAILABLE};
use crate::heuristics;
use crate::quarantine;
use crate::report::{Finding, ScanReport};
use crate::reputation::{ReputationClient, REPUTATION_WEIGHT};
use crate::signature;

/// One file under inspection. Owned exclusively by a single analysis run.
#[derive(Debug)]
pub struct AnalysisTarget {
    /// Path as supplied by the caller; never changes.
    pub path: PathBuf,
    /// Current on-disk path; updated by the quarantine controller.
    pub current_path: PathBuf,
    pub size_bytes: u64,
}

impl AnalysisTarget {
    pub fn new(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SiftError::path_not_found(path));
        }
        let meta = fs::metadata(path)?;
        if !meta.is_file() {
            return Err(SiftError::not_a_file(path));
        }
        Ok(Self {
            path: path.to_path_buf(),
            current_path: path.to_path_buf(),
            size_bytes: meta.len(),
        })
    }
}

/// Analyze one file and produce a frozen report.
///
/// The only errors are pre-analysis rejections: a missing path, a
/// non-regular file, or a file above the hard size cap (a batch skip).
/// Every file that passes those checks yields a complete report, however
/// degraded the individual stages were.
pub fn scan_file(path: &Path, config: &ScanConfig) -> Result<ScanReport> {
    let mut target = AnalysisTarget::new(path)?;
    if target.size_bytes > config.hard_cap {
        return Err(SiftError::file_too_large(target.size_bytes, config.hard_cap));
    }

    info!("scanning {} ({} bytes)", path.display(), target.size_bytes);

    let (buffer, mut findings) = AnalysisBuffer::load(path, config);
    let sha256 = sha256_file(path, config.hash_chunk_size);
    if sha256 == HASH_UNAVAILABLE {
        warn!("content digest unavailable for {}", path.display());
    }

    let (file_type, type_description) = signature::classify(buffer.bytes());
    debug!("declared type: {file_type} ({type_description})");

    findings.extend(heuristics::run_all(&buffer, &target));

    if let Some(finding) = reputation_finding(config, &sha256) {
        findings.push(finding);
    }

    // Aggregate only after every reading stage has finished; the quarantine
    // rename comes last because it mutates the path on disk.
    let score: u32 = findings.iter().map(|f| f.delta).sum();
    let (state, quarantine_finding) = quarantine::apply(&mut target, score, config);
    findings.extend(quarantine_finding);

    Ok(ScanReport::assemble(
        target.path.display().to_string(),
        target.current_path.display().to_string(),
        target.size_bytes,
        sha256,
        file_type,
        type_description,
        buffer.partial(),
        findings,
        state,
        config,
    ))
}

/// Run the optional reputation lookup. Absence of a key, a sentinel digest,
/// or any network failure all mean "no finding".
fn reputation_finding(config: &ScanConfig, sha256: &str) -> Option<Finding> {
    let key = config.reputation_api_key.as_deref()?;
    if sha256 == HASH_UNAVAILABLE {
        return None;
    }

    let client = match ReputationClient::new(key, config.reputation_timeout) {
        Ok(c) => c,
        Err(e) => {
            debug!("reputation client unavailable: {e:#}");
            return None;
        }
    };

    match client.lookup(sha256) {
        Ok(Some(count)) if count > 0 => Some(Finding::threat(
            REPUTATION_WEIGHT,
            format!("Flagged by {count} reputation engines"),
        )),
        Ok(Some(_)) => Some(Finding::intel("Reputation: no engines flag this digest")),
        Ok(None) => Some(Finding::intel("Reputation: digest not in database")),
        Err(e) => {
            debug!("reputation lookup failed: {e:#}");
            None
        }
    }
}
