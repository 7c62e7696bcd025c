//! Optional reputation lookup.
//!
//! Given a content digest, asks an external reputation service how many
//! engines flag it. The whole stage is optional: no API key means it never
//! runs, and any network error or timeout simply contributes no finding.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde_json::Value;

const API_BASE: &str = "https://www.virustotal.com/api/v3";

/// Score contribution when any engine flags the digest.
pub const REPUTATION_WEIGHT: u32 = 8;

pub struct ReputationClient {
    api_key: String,
    client: reqwest::blocking::Client,
}

impl ReputationClient {
    /// Build a client with a hard request timeout so a network stall cannot
    /// block the scan of one file for more than a few seconds.
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build reputation HTTP client")?;
        Ok(Self { api_key: api_key.to_string(), client })
    }

    /// Look up a SHA-256 digest.
    ///
    /// Returns `Ok(Some(count))` with the malicious-engine count,
    /// `Ok(None)` when the digest is unknown to the service, and `Err` for
    /// any transport or protocol failure.
    pub fn lookup(&self, sha256: &str) -> Result<Option<u32>> {
        let url = format!("{API_BASE}/files/{sha256}");
        let resp = self
            .client
            .get(&url)
            .header("x-apikey", &self.api_key)
            .send()
            .context("reputation request failed")?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            bail!("reputation service returned HTTP {status}");
        }

        let body: Value = resp.json().context("invalid reputation response body")?;
        let malicious = body
            .pointer("/data/attributes/last_analysis_stats/malicious")
            .and_then(Value::as_u64)
            .context("reputation response missing analysis stats")?;

        Ok(Some(malicious as u32))
    }
}
