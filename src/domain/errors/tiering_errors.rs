use super::{StorageError, ValidationError};

/// Errors that abort a classification or savings run
#[derive(Debug, Clone)]
pub enum TieringError {
    /// Request rejected before any provider call was made
    InvalidRequest { reason: ValidationError },

    /// A listing page could not be fetched; no partial result is returned
    ScanFailed {
        bucket: String,
        prefix: String,
        source: StorageError,
    },
}

impl std::fmt::Display for TieringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TieringError::InvalidRequest { reason } => {
                write!(f, "Invalid request: {}", reason)
            }
            TieringError::ScanFailed {
                bucket,
                prefix,
                source,
            } => {
                write!(
                    f,
                    "Scan of '{}' (prefix '{}') failed: {}",
                    bucket, prefix, source
                )
            }
        }
    }
}

impl std::error::Error for TieringError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TieringError::InvalidRequest { reason } => Some(reason),
            TieringError::ScanFailed { source, .. } => Some(source),
        }
    }
}

impl From<ValidationError> for TieringError {
    fn from(reason: ValidationError) -> Self {
        TieringError::InvalidRequest { reason }
    }
}

/// Result type for tiering operations
pub type TieringResult<T> = Result<T, TieringError>;
