use std::path::PathBuf;
use thiserror::Error;

/// Sift's error types. Only a handful of conditions are allowed to stop a
/// scan before it produces a report; everything else degrades into warning
/// findings inside the report itself.
#[derive(Debug, Error)]
pub enum SiftError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File too large: {size} bytes exceeds hard cap of {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    #[error("Not a regular file: {path}")]
    NotAFile { path: PathBuf },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

pub type Result<T> = std::result::Result<T, SiftError>;

impl SiftError {
    pub fn file_too_large(size: u64, limit: u64) -> Self {
        Self::FileTooLarge { size, limit }
    }

    pub fn path_not_found<P: Into<PathBuf>>(path: P) -> Self {
        Self::PathNotFound { path: path.into() }
    }

    pub fn not_a_file<P: Into<PathBuf>>(path: P) -> Self {
        Self::NotAFile { path: path.into() }
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Whether this error means "skip the file" rather than "the caller did
    /// something wrong". Hard-cap skips are expected during batch scans.
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::FileTooLarge { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_too_large_is_skip() {
        let err = SiftError::file_too_large(100, 50);
        assert!(err.is_skip());
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn test_configuration_is_not_skip() {
        let err = SiftError::configuration("bad threshold");
        assert!(!err.is_skip());
    }
}
