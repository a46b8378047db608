//! Errors raised by the file-facing driver. The report pipeline itself never
//! fails; only reading inputs and configuration can.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum DigestError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Glob {
        pattern: String,
        message: String,
    },
    NotFound {
        pattern: String,
    },
    Config {
        path: PathBuf,
        message: String,
    },
}

impl DigestError {
    /// Stable short code used in JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            DigestError::Io { .. } => "E_IO",
            DigestError::Glob { .. } => "E_GLOB",
            DigestError::NotFound { .. } => "E_NOT_FOUND",
            DigestError::Config { .. } => "E_CONFIG",
        }
    }
}

impl fmt::Display for DigestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestError::Io { path, source } => {
                write!(f, "cannot read {}: {}", path.to_string_lossy(), source)
            }
            DigestError::Glob { pattern, message } => {
                write!(f, "invalid pattern '{}': {}", pattern, message)
            }
            DigestError::NotFound { pattern } => {
                write!(f, "no log file matches '{}'", pattern)
            }
            DigestError::Config { path, message } => {
                write!(f, "invalid config {}: {}", path.to_string_lossy(), message)
            }
        }
    }
}

impl std::error::Error for DigestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DigestError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
