//! PDF active-content scanner.
//!
//! PDFs can carry JavaScript, auto-run actions and external launches. The
//! buffer is decoded permissively and searched for the control keywords
//! that enable those behaviors; each keyword found is an independent
//! scored finding.

use crate::buffer::AnalysisBuffer;
use crate::heuristics::HeuristicOutcome;
use crate::report::Finding;

const PDF_KEYWORDS: &[(&str, u32, &str)] = &[
    ("/JavaScript", 6, "embedded JavaScript"),
    ("/JS", 6, "embedded JavaScript (short form)"),
    ("/OpenAction", 4, "automatic action on open"),
    ("/Launch", 5, "launches an external program"),
    ("/URI", 2, "external URI reference"),
    ("/SubmitForm", 3, "submits form data externally"),
];

pub(crate) fn scan(buffer: &AnalysisBuffer) -> HeuristicOutcome {
    if !buffer.bytes().starts_with(b"%PDF") {
        return HeuristicOutcome::Ran(Vec::new());
    }

    let text = String::from_utf8_lossy(buffer.bytes());
    let mut findings = Vec::new();

    for (keyword, weight, meaning) in PDF_KEYWORDS {
        if text.contains(keyword) {
            findings.push(Finding::threat(
                *weight,
                format!("PDF contains {keyword} ({meaning})"),
            ));
        }
    }

    HeuristicOutcome::Ran(findings)
}
