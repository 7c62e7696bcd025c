//! Format heuristics.
//!
//! Each heuristic is an independent function over the shared immutable
//! analysis buffer (and, where needed, the file itself). Heuristics are
//! fault-isolated: a parse failure inside one never aborts its siblings,
//! and the failure is visible in the returned [`HeuristicOutcome`] rather
//! than hidden in control flow.

pub mod archive;
pub mod office;
pub mod pdf;
pub mod pe;
pub mod stego;

use tracing::debug;

use crate::buffer::AnalysisBuffer;
use crate::entropy::{shannon_entropy, HIGH_ENTROPY_THRESHOLD};
use crate::report::Finding;
use crate::scanner::AnalysisTarget;

/// Result of one heuristic: either the findings it produced (possibly
/// none), or an explicit "failed, no contribution" marker.
#[derive(Debug)]
pub enum HeuristicOutcome {
    Ran(Vec<Finding>),
    Failed(&'static str),
}

impl HeuristicOutcome {
    fn into_findings(self) -> Vec<Finding> {
        match self {
            HeuristicOutcome::Ran(findings) => findings,
            HeuristicOutcome::Failed(stage) => {
                debug!("heuristic {stage} failed, contributing nothing");
                Vec::new()
            }
        }
    }
}

/// The fixed ordered list of heuristic stages. Order only affects display
/// grouping; each stage reads the same immutable buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    Pdf,
    OfficeMacros,
    PeHeader,
    Archive,
    TrailingData,
    HighEntropy,
    Patterns,
    Metadata,
}

impl Heuristic {
    pub const ALL: &'static [Heuristic] = &[
        Heuristic::Pdf,
        Heuristic::OfficeMacros,
        Heuristic::PeHeader,
        Heuristic::Archive,
        Heuristic::TrailingData,
        Heuristic::HighEntropy,
        Heuristic::Patterns,
        Heuristic::Metadata,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::Pdf => "pdf",
            Heuristic::OfficeMacros => "office-macros",
            Heuristic::PeHeader => "pe-header",
            Heuristic::Archive => "archive",
            Heuristic::TrailingData => "trailing-data",
            Heuristic::HighEntropy => "entropy",
            Heuristic::Patterns => "patterns",
            Heuristic::Metadata => "metadata",
        }
    }

    pub fn run(&self, buffer: &AnalysisBuffer, target: &AnalysisTarget) -> HeuristicOutcome {
        match self {
            Heuristic::Pdf => pdf::scan(buffer),
            Heuristic::OfficeMacros => office::scan(buffer, target),
            Heuristic::PeHeader => pe::scan(buffer),
            Heuristic::Archive => archive::scan(buffer, target),
            Heuristic::TrailingData => stego::scan(buffer),
            Heuristic::HighEntropy => entropy_scan(buffer),
            Heuristic::Patterns => crate::strings::scan(buffer),
            Heuristic::Metadata => crate::metadata::extract(target),
        }
    }
}

/// Run every heuristic sequentially and merge the emitted findings.
pub fn run_all(buffer: &AnalysisBuffer, target: &AnalysisTarget) -> Vec<Finding> {
    let mut findings = Vec::new();
    for heuristic in Heuristic::ALL {
        debug!("running heuristic {}", heuristic.name());
        findings.extend(heuristic.run(buffer, target).into_findings());
    }
    findings
}

/// Very high entropy over a non-trivial buffer reads as encrypted or packed
/// content. Informational only: compressed containers legitimately score
/// high here.
fn entropy_scan(buffer: &AnalysisBuffer) -> HeuristicOutcome {
    if buffer.len() < 1024 {
        return HeuristicOutcome::Ran(Vec::new());
    }
    let entropy = shannon_entropy(buffer.bytes());
    if entropy > HIGH_ENTROPY_THRESHOLD {
        return HeuristicOutcome::Ran(vec![Finding::intel(format!(
            "High entropy content ({entropy:.2} bits/byte): possibly encrypted or packed"
        ))]);
    }
    HeuristicOutcome::Ran(Vec::new())
}

/// Locate the last occurrence of `needle` in `haystack`.
pub(crate) fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).rev().find(|&i| &haystack[i..i + needle.len()] == needle)
}

/// Whether `haystack` contains `needle` anywhere.
pub(crate) fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() || haystack.len() < needle.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfind_finds_last_occurrence() {
        assert_eq!(rfind(b"abcabc", b"abc"), Some(3));
        assert_eq!(rfind(b"abcabc", b"xyz"), None);
        assert_eq!(rfind(b"ab", b"abc"), None);
    }

    #[test]
    fn test_contains() {
        assert!(contains(b"hello world", b"o w"));
        assert!(!contains(b"hello", b"world"));
        assert!(!contains(b"", b"a"));
    }
}
