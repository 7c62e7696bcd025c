//! Quarantine threshold behavior over real files.

use std::io::Write;

use sift::{scan_file, ScanConfig, Verdict};

fn write_temp(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(content).unwrap();
    path
}

#[test]
fn test_score_at_threshold_quarantines() {
    let dir = tempfile::tempdir().unwrap();
    // /Launch (5) + /URI (2) scores exactly the quarantine threshold of 7.
    let path = write_temp(&dir, "dropper.pdf", b"%PDF-1.4 /Launch (calc) /URI (x)\n");

    let report = scan_file(&path, &ScanConfig::default()).unwrap();
    assert_eq!(report.risk_score, 7);
    assert_eq!(report.verdict, Verdict::Dangerous);
    assert!(report.quarantined);
    assert!(report.final_path.ends_with(".dangerous"));
    assert!(!path.exists());
    assert!(dir.path().join("dropper.pdf.dangerous").exists());
    assert!(report
        .intel
        .iter()
        .any(|f| f.message.contains("quarantined")));
}

#[test]
fn test_score_below_threshold_is_not_renamed() {
    let dir = tempfile::tempdir().unwrap();
    // /OpenAction (4) + /URI (2) scores 6, one below the threshold.
    let path = write_temp(&dir, "form.pdf", b"%PDF-1.4 /OpenAction 2 0 R /URI (x)\n");

    let report = scan_file(&path, &ScanConfig::default()).unwrap();
    assert_eq!(report.risk_score, 6);
    assert_eq!(report.verdict, Verdict::Suspicious);
    assert!(!report.quarantined);
    assert_eq!(report.path, report.final_path);
    assert!(path.exists());
}

#[test]
fn test_quarantine_fires_at_most_once_per_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "evil.pdf", b"%PDF-1.4 /Launch /JavaScript /OpenAction\n");

    let report = scan_file(&path, &ScanConfig::default()).unwrap();
    assert!(report.quarantined);

    // Exactly one rename happened: the marker suffix appears once.
    let suffix_count = report.final_path.matches(".dangerous").count();
    assert_eq!(suffix_count, 1);

    let confirmations = report
        .intel
        .iter()
        .filter(|f| f.message.contains("quarantined"))
        .count();
    assert_eq!(confirmations, 1);
}

#[test]
fn test_report_only_config_never_renames() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "evil.pdf", b"%PDF-1.4 /Launch /JavaScript /OpenAction\n");

    let report = scan_file(&path, &ScanConfig::report_only()).unwrap();
    assert_eq!(report.verdict, Verdict::Dangerous);
    assert!(!report.quarantined);
    assert!(path.exists());
}
