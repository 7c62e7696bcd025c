use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ScanConfig;
use crate::quarantine::QuarantineState;

/// Category of a finding, used for display grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingCategory {
    /// Scored observation that raises the risk of the file.
    Threat,
    /// Embedded content that a casual viewer would not see (metadata, tags).
    HiddenData,
    /// Informational indicator with no score impact.
    Intel,
}

/// One unit of heuristic output: a non-negative score delta plus a
/// human-readable message. Findings are append-only; emission order only
/// matters for display grouping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub delta: u32,
    pub message: String,
    pub category: FindingCategory,
}

impl Finding {
    pub fn threat<S: Into<String>>(delta: u32, message: S) -> Self {
        Self { delta, message: message.into(), category: FindingCategory::Threat }
    }

    pub fn hidden_data<S: Into<String>>(message: S) -> Self {
        Self { delta: 0, message: message.into(), category: FindingCategory::HiddenData }
    }

    pub fn intel<S: Into<String>>(message: S) -> Self {
        Self { delta: 0, message: message.into(), category: FindingCategory::Intel }
    }
}

/// Three-tier classification of the aggregate risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Clean,
    Suspicious,
    Dangerous,
}

impl Verdict {
    /// Classify a final score against the configured thresholds.
    pub fn from_score(score: u32, config: &ScanConfig) -> Self {
        if score >= config.dangerous_threshold {
            Verdict::Dangerous
        } else if score >= config.suspicious_threshold {
            Verdict::Suspicious
        } else {
            Verdict::Clean
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Clean => "clean",
            Verdict::Suspicious => "suspicious",
            Verdict::Dangerous => "dangerous",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Frozen result of one file scan. Built once by the scanner and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Path as supplied by the caller.
    pub path: String,
    /// Path after any quarantine rename (identical to `path` otherwise).
    pub final_path: String,
    pub size_bytes: u64,
    /// SHA-256 of the whole file, or the literal string "unavailable".
    pub sha256: String,
    /// Declared type from the signature table (e.g. "pdf", "pe").
    pub file_type: String,
    pub type_description: String,
    /// True when the analysis buffer held only the head and tail of the file.
    pub partial_read: bool,
    pub risk_score: u32,
    pub verdict: Verdict,
    pub quarantined: bool,
    pub scanned_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub threats: Vec<Finding>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub hidden_data: Vec<Finding>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub intel: Vec<Finding>,
}

impl ScanReport {
    /// Assemble a report from the merged finding stream. The score is the
    /// sum of all deltas; it is computed here exactly once.
    pub(crate) fn assemble(
        path: String,
        final_path: String,
        size_bytes: u64,
        sha256: String,
        file_type: String,
        type_description: String,
        partial_read: bool,
        findings: Vec<Finding>,
        quarantine: QuarantineState,
        config: &ScanConfig,
    ) -> Self {
        let risk_score: u32 = findings.iter().map(|f| f.delta).sum();
        let verdict = Verdict::from_score(risk_score, config);

        let mut threats = Vec::new();
        let mut hidden_data = Vec::new();
        let mut intel = Vec::new();
        for finding in findings {
            match finding.category {
                FindingCategory::Threat => threats.push(finding),
                FindingCategory::HiddenData => hidden_data.push(finding),
                FindingCategory::Intel => intel.push(finding),
            }
        }

        Self {
            path,
            final_path,
            size_bytes,
            sha256,
            file_type,
            type_description,
            partial_read,
            risk_score,
            verdict,
            quarantined: quarantine == QuarantineState::Quarantined,
            scanned_at: Utc::now(),
            threats,
            hidden_data,
            intel,
        }
    }
}

/// Run-level counters for a batch of files. Owned by the caller and updated
/// from each finished report, never through shared global state.
#[derive(Debug, Default, Clone, Serialize)]
pub struct BatchSummary {
    pub clean: usize,
    pub risky: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn absorb(&mut self, report: &ScanReport) {
        if report.verdict == Verdict::Clean {
            self.clean += 1;
        } else {
            self.risky += 1;
        }
    }

    /// A file deliberately left unscanned (over the hard cap).
    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    /// A file the scanner could not process at all.
    pub fn record_error(&mut self) {
        self.failed += 1;
    }

    pub fn total(&self) -> usize {
        self.clean + self.risky + self.skipped + self.failed
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} scanned: {} clean, {} risky, {} skipped, {} failed",
            self.total(),
            self.clean,
            self.risky,
            self.skipped,
            self.failed
        )
    }
}
