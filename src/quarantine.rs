//! Quarantine controller.
//!
//! A two-state machine per analysis target: `Clear -> Quarantined`. The
//! transition is one-directional and fires at most once per run, after every
//! other heuristic has finished reading the file. This is the only component
//! allowed to mutate anything on disk.

use std::fs;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ScanConfig;
use crate::report::Finding;
use crate::scanner::AnalysisTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuarantineState {
    Clear,
    Quarantined,
}

/// Rename the file with the marker suffix if the final score crosses the
/// quarantine threshold.
///
/// On success the target's current path is updated and a confirmation
/// finding is emitted; on rename failure a warning finding is emitted
/// instead. Neither outcome alters the score or verdict.
pub(crate) fn apply(
    target: &mut AnalysisTarget,
    score: u32,
    config: &ScanConfig,
) -> (QuarantineState, Option<Finding>) {
    if !config.quarantine_enabled || score < config.quarantine_threshold {
        return (QuarantineState::Clear, None);
    }

    let mut new_path = target.current_path.as_os_str().to_os_string();
    new_path.push(&config.quarantine_suffix);
    let new_path = std::path::PathBuf::from(new_path);

    match fs::rename(&target.current_path, &new_path) {
        Ok(()) => {
            info!("quarantined {} -> {}", target.current_path.display(), new_path.display());
            target.current_path = new_path.clone();
            (
                QuarantineState::Quarantined,
                Some(Finding::intel(format!("File quarantined as {}", new_path.display()))),
            )
        }
        Err(e) => (
            QuarantineState::Clear,
            Some(Finding::intel(format!("Quarantine rename failed: {e}"))),
        ),
    }
}
