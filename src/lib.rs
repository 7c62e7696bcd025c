//! SIFT - Bounded-memory heuristic file-threat analyzer.
//!
//! Inspects an arbitrary file (up to a hard cap of 50 GB) and produces
//! a risk classification without ever loading the whole file into memory:
//! a size-capped head+tail buffer feeds a fixed set of independent
//! heuristics (PDF active content, Office macros, PE header forensics,
//! archive bombs, trailing data, string patterns, embedded metadata), whose
//! findings are summed into a verdict and, past a threshold, a quarantine
//! rename.
//!
//! This is static, best-effort classification only: no unpacking, no
//! execution, no guarantee of catching everything.
//!
//! # Example
//!
//! ```no_run
//! use sift::{scan_file, BatchSummary, ScanConfig};
//!
//! let config = ScanConfig::report_only();
//! let mut summary = BatchSummary::default();
//!
//! let report = scan_file("suspicious.bin".as_ref(), &config).unwrap();
//! summary.absorb(&report);
//!
//! println!("{}: {} (score {})", report.path, report.verdict, report.risk_score);
//! for finding in &report.threats {
//!     println!("  [+{}] {}", finding.delta, finding.message);
//! }
//! ```

mod buffer;
mod entropy;
mod hashing;
mod metadata;
mod quarantine;
mod reputation;
mod signature;
mod strings;

pub mod config;
pub mod error;
pub mod heuristics;
pub mod report;
pub mod scanner;

// Re-export commonly used types at crate root.
pub use buffer::AnalysisBuffer;
pub use config::ScanConfig;
pub use error::{Result, SiftError};
pub use hashing::{sha256_file, HASH_UNAVAILABLE};
pub use quarantine::QuarantineState;
pub use report::{BatchSummary, Finding, FindingCategory, ScanReport, Verdict};
pub use scanner::{scan_file, AnalysisTarget};
