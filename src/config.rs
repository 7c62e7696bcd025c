use crate::error::{Result, SiftError};
use std::time::Duration;

/// Default RAM ceiling for the analysis buffer (200 MB).
pub const DEFAULT_RAM_CEILING: usize = 200 * 1024 * 1024;
/// Tail reservation kept from the end of oversized files (10 MB).
pub const DEFAULT_TAIL_RESERVE: usize = 10 * 1024 * 1024;
/// Absolute hard cap: files above this are skipped entirely (50 GB).
pub const DEFAULT_HARD_CAP: u64 = 50 * 1024 * 1024 * 1024;
/// Chunk size for the streaming hasher (8 MB).
pub const DEFAULT_HASH_CHUNK: usize = 8 * 1024 * 1024;
/// Scores at or above this are "suspicious".
pub const DEFAULT_SUSPICIOUS_THRESHOLD: u32 = 4;
/// Scores at or above this are "dangerous".
pub const DEFAULT_DANGEROUS_THRESHOLD: u32 = 7;
/// Scores at or above this trigger a quarantine rename.
pub const DEFAULT_QUARANTINE_THRESHOLD: u32 = 7;
/// Suffix appended to quarantined files.
pub const DEFAULT_QUARANTINE_SUFFIX: &str = ".dangerous";
/// Timeout for the optional reputation lookup.
pub const DEFAULT_REPUTATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for a scan run.
///
/// The scoring thresholds are hand-tuned constants carried over from field
/// use; they are configuration, not derived values.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Maximum bytes held in the analysis buffer.
    pub ram_ceiling: usize,
    /// Bytes reserved for the tail segment of oversized files.
    pub tail_reserve: usize,
    /// Files larger than this are skipped before any read.
    pub hard_cap: u64,
    /// Read size for the streaming hasher.
    pub hash_chunk_size: usize,
    /// Lower verdict threshold.
    pub suspicious_threshold: u32,
    /// Upper verdict threshold.
    pub dangerous_threshold: u32,
    /// Score at which the quarantine rename fires.
    pub quarantine_threshold: u32,
    /// Marker suffix appended on quarantine.
    pub quarantine_suffix: String,
    /// Whether the quarantine controller may rename files at all.
    pub quarantine_enabled: bool,
    /// API key for the optional reputation lookup; `None` disables the stage.
    pub reputation_api_key: Option<String>,
    /// Network timeout for the reputation lookup.
    pub reputation_timeout: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ram_ceiling: DEFAULT_RAM_CEILING,
            tail_reserve: DEFAULT_TAIL_RESERVE,
            hard_cap: DEFAULT_HARD_CAP,
            hash_chunk_size: DEFAULT_HASH_CHUNK,
            suspicious_threshold: DEFAULT_SUSPICIOUS_THRESHOLD,
            dangerous_threshold: DEFAULT_DANGEROUS_THRESHOLD,
            quarantine_threshold: DEFAULT_QUARANTINE_THRESHOLD,
            quarantine_suffix: DEFAULT_QUARANTINE_SUFFIX.to_string(),
            quarantine_enabled: true,
            reputation_api_key: None,
            reputation_timeout: DEFAULT_REPUTATION_TIMEOUT,
        }
    }
}

impl ScanConfig {
    /// Preset that flags and quarantines earlier.
    pub fn high_security() -> Self {
        Self {
            suspicious_threshold: 3,
            dangerous_threshold: 5,
            quarantine_threshold: 5,
            ..Self::default()
        }
    }

    /// Preset for triage-only runs: nothing on disk is ever renamed.
    pub fn report_only() -> Self {
        Self { quarantine_enabled: false, ..Self::default() }
    }

    /// Validate internal consistency before a scan.
    pub fn validate(&self) -> Result<()> {
        if self.ram_ceiling == 0 {
            return Err(SiftError::configuration("ram_ceiling must be greater than 0"));
        }
        if self.tail_reserve >= self.ram_ceiling {
            return Err(SiftError::configuration(format!(
                "tail_reserve ({}) must be smaller than ram_ceiling ({})",
                self.tail_reserve, self.ram_ceiling
            )));
        }
        if self.hard_cap < self.ram_ceiling as u64 {
            return Err(SiftError::configuration(
                "hard_cap must be at least as large as ram_ceiling",
            ));
        }
        if self.hash_chunk_size == 0 {
            return Err(SiftError::configuration("hash_chunk_size must be greater than 0"));
        }
        if self.suspicious_threshold > self.dangerous_threshold {
            return Err(SiftError::configuration(format!(
                "suspicious_threshold ({}) must not exceed dangerous_threshold ({})",
                self.suspicious_threshold, self.dangerous_threshold
            )));
        }
        if self.quarantine_suffix.is_empty() {
            return Err(SiftError::configuration("quarantine_suffix must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ScanConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ScanConfig::high_security().validate().is_ok());
        assert!(ScanConfig::report_only().validate().is_ok());
        assert!(!ScanConfig::report_only().quarantine_enabled);
    }

    #[test]
    fn test_tail_reserve_must_fit_under_ceiling() {
        let config = ScanConfig {
            ram_ceiling: 1024,
            tail_reserve: 2048,
            hard_cap: 4096,
            ..ScanConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let config = ScanConfig {
            suspicious_threshold: 9,
            dangerous_threshold: 7,
            ..ScanConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
