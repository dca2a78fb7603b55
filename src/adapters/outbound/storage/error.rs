use aws_sdk_s3::{
    config::http::HttpResponse,
    error::{BuildError, DisplayErrorContext, ProvideErrorMetadata, SdkError},
};
use thiserror::Error as ThisError;

use crate::domain::{
    errors::{StorageError, TieringError},
    value_objects::ObjectKey,
};

#[derive(ThisError, Debug)]
pub enum StoreError {
    /// The request never produced a service response (connect, timeout, signing)
    #[error("S3 request failed: {message}")]
    Dispatch { message: String },

    #[error("S3 error: {status} - {code}: {message}")]
    Service {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Invalid S3 request: {0}")]
    Build(#[from] BuildError),
}

impl<E> From<SdkError<E, HttpResponse>> for StoreError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    fn from(err: SdkError<E, HttpResponse>) -> Self {
        match err {
            SdkError::ServiceError(context) => StoreError::Service {
                status: context.raw().status().as_u16(),
                code: context.err().code().unwrap_or("Unknown").to_string(),
                message: context.err().message().unwrap_or_default().to_string(),
            },
            other => StoreError::Dispatch {
                message: DisplayErrorContext(&other).to_string(),
            },
        }
    }
}

impl StoreError {
    /// Map to a domain error for an operation on `bucket` and, when the
    /// call targeted one object, `key`.
    pub fn into_storage_error(
        self,
        bucket: &str,
        key: Option<&ObjectKey>,
        operation: &str,
    ) -> StorageError {
        match self {
            StoreError::Service { status: 404, code, .. } => match (code.as_str(), key) {
                ("NoSuchKey", Some(key)) => StorageError::ObjectNotFound {
                    bucket: bucket.to_string(),
                    key: key.clone(),
                },
                _ => StorageError::BucketNotFound {
                    bucket: bucket.to_string(),
                },
            },
            StoreError::Service { status: 403, .. } => StorageError::AccessDenied {
                bucket: bucket.to_string(),
                key: key.cloned(),
                operation: operation.to_string(),
            },
            StoreError::Service {
                status: 501,
                code,
                message,
            } => StorageError::UnsupportedOperation {
                operation: operation.to_string(),
                reason: format!("{}: {}", code, message),
            },
            other => other.into(),
        }
    }
}

/// Convert infrastructure StoreError to domain StorageError
impl From<StoreError> for StorageError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Dispatch { message } => StorageError::InfrastructureError {
                message: format!("Provider request failed: {}", message),
                source: Some(message),
            },
            StoreError::Service {
                status,
                code,
                message,
            } => StorageError::InfrastructureError {
                message: format!("HTTP error {} ({}): {}", status, code, message),
                source: Some(format!("{}: {}", status, message)),
            },
            StoreError::Build(build_err) => StorageError::InfrastructureError {
                message: format!("Invalid provider request: {}", build_err),
                source: Some(build_err.to_string()),
            },
        }
    }
}

/// Convert TieringError to HTTP status codes for API responses
impl From<&TieringError> for http::StatusCode {
    fn from(err: &TieringError) -> Self {
        match err {
            TieringError::InvalidRequest { .. } => http::StatusCode::BAD_REQUEST,
            TieringError::ScanFailed { .. } => http::StatusCode::BAD_GATEWAY,
        }
    }
}
