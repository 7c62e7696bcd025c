use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use humansize::{format_size, DECIMAL};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use sift::{scan_file, BatchSummary, Finding, ScanConfig, ScanReport, SiftError, Verdict};

/// Heuristic file-threat analyzer: scans files with bounded memory and
/// quarantines anything scoring past the danger threshold.
#[derive(Debug, Parser)]
#[command(name = "sift", version, about)]
struct Cli {
    /// Files or directories to scan
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Emit reports as a JSON array instead of the text summary
    #[arg(long)]
    json: bool,

    /// Never rename files, report only
    #[arg(long)]
    no_quarantine: bool,

    /// Flag and quarantine at lower thresholds
    #[arg(long)]
    high_security: bool,

    /// API key for the optional reputation lookup
    #[arg(long, env = "SIFT_REPUTATION_KEY")]
    reputation_key: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = if cli.high_security {
        ScanConfig::high_security()
    } else {
        ScanConfig::default()
    };
    if cli.no_quarantine {
        config.quarantine_enabled = false;
    }
    config.reputation_api_key = cli.reputation_key.clone();
    config.validate()?;

    let files = expand_paths(&cli.paths);
    let mut summary = BatchSummary::default();
    let mut reports: Vec<ScanReport> = Vec::new();

    for file in &files {
        match scan_file(file, &config) {
            Ok(report) => {
                summary.absorb(&report);
                if cli.json {
                    reports.push(report);
                } else {
                    render_report(&report);
                }
            }
            Err(e @ SiftError::FileTooLarge { .. }) => {
                summary.record_skip();
                eprintln!("{} {}: {e}", "skip".yellow(), file.display());
            }
            Err(e) => {
                summary.record_error();
                eprintln!("{} {}: {e}", "error".red(), file.display());
            }
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        println!("\n{summary}");
    }

    Ok(())
}

/// Expand directories into their contained files; plain files pass through.
fn expand_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
                if entry.file_type().is_file() {
                    files.push(entry.into_path());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    files
}

fn render_report(report: &ScanReport) {
    let verdict = match report.verdict {
        Verdict::Clean => report.verdict.to_string().green(),
        Verdict::Suspicious => report.verdict.to_string().yellow(),
        Verdict::Dangerous => report.verdict.to_string().red().bold(),
    };

    println!(
        "\n{} [{}] score {} ({}, {})",
        report.path.bold(),
        verdict,
        report.risk_score,
        report.type_description,
        format_size(report.size_bytes, DECIMAL),
    );
    println!("  sha256: {}", report.sha256);
    if report.partial_read {
        println!("  {}", "partial read: head and tail only".yellow());
    }
    if report.quarantined {
        println!("  {} {}", "quarantined:".red(), report.final_path);
    }

    render_findings("threats", &report.threats);
    render_findings("hidden data", &report.hidden_data);
    render_findings("intel", &report.intel);
}

fn render_findings(label: &str, findings: &[Finding]) {
    if findings.is_empty() {
        return;
    }
    println!("  {label}:");
    for finding in findings {
        if finding.delta > 0 {
            println!("    [+{}] {}", finding.delta, finding.message);
        } else {
            println!("    {}", finding.message);
        }
    }
}
