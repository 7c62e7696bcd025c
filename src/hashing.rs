//! Streaming content hashing.
//!
//! The digest always covers the entire file, read in fixed-size chunks, so
//! memory use stays O(chunk size) even when the analysis buffer only holds a
//! partial window.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::warn;

/// Sentinel digest used when the file could not be hashed.
pub const HASH_UNAVAILABLE: &str = "unavailable";

/// SHA-256 of the whole file, reading `chunk_size` bytes at a time.
///
/// Any I/O failure yields the sentinel [`HASH_UNAVAILABLE`] instead of
/// failing the scan.
pub fn sha256_file(path: &Path, chunk_size: usize) -> String {
    match try_sha256(path, chunk_size) {
        Ok(digest) => digest,
        Err(e) => {
            warn!("hash unavailable for {}: {e}", path.display());
            HASH_UNAVAILABLE.to_string()
        }
    }
}

fn try_sha256(path: &Path, chunk_size: usize) -> std::io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut chunk = vec![0u8; chunk_size];

    loop {
        let n = file.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        hasher.update(&chunk[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// SHA-256 of an in-memory slice.
pub fn sha256_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
