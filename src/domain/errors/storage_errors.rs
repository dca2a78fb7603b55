use crate::domain::value_objects::ObjectKey;

/// Errors reported by an object-storage provider
#[derive(Debug, Clone)]
pub enum StorageError {
    /// Bucket does not exist
    BucketNotFound { bucket: String },

    /// Object not found
    ObjectNotFound { bucket: String, key: ObjectKey },

    /// Access denied
    AccessDenied {
        bucket: String,
        key: Option<ObjectKey>,
        operation: String,
    },

    /// Operation not supported by the backend
    UnsupportedOperation { operation: String, reason: String },

    /// Provider answered with something we could not interpret
    InvalidResponse { message: String },

    /// Infrastructure error with external source
    InfrastructureError {
        message: String,
        source: Option<String>, // Store error as string to allow Clone
    },
}

impl StorageError {
    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            StorageError::BucketNotFound { .. } => "bucket_not_found",
            StorageError::ObjectNotFound { .. } => "object_not_found",
            StorageError::AccessDenied { .. } => "access_denied",
            StorageError::UnsupportedOperation { .. } => "unsupported_operation",
            StorageError::InvalidResponse { .. } => "invalid_response",
            StorageError::InfrastructureError { .. } => "infrastructure",
        }
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::BucketNotFound { bucket } => {
                write!(f, "Bucket not found: {}", bucket)
            }
            StorageError::ObjectNotFound { bucket, key } => {
                write!(f, "Object not found: {}/{}", bucket, key)
            }
            StorageError::AccessDenied {
                bucket,
                key,
                operation,
            } => match key {
                Some(key) => write!(
                    f,
                    "Access denied for operation '{}' on object: {}/{}",
                    operation, bucket, key
                ),
                None => write!(
                    f,
                    "Access denied for operation '{}' on bucket: {}",
                    operation, bucket
                ),
            },
            StorageError::UnsupportedOperation { operation, reason } => {
                write!(f, "Unsupported operation '{}': {}", operation, reason)
            }
            StorageError::InvalidResponse { message } => {
                write!(f, "Invalid provider response: {}", message)
            }
            StorageError::InfrastructureError { message, .. } => {
                write!(f, "Infrastructure error: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
