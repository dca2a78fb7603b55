//! S3 storage adapter built on the AWS SDK
//!
//! Listing uses ListObjectsV2; tags are read and replaced with
//! GetObjectTagging / PutObjectTagging.

pub mod s3_adapter;

pub use s3_adapter::S3ObjectStorage;

/// Largest `max-keys` S3 honours for ListObjectsV2
pub const MAX_KEYS_LIMIT: i32 = 1000;

/// Configuration for the S3 storage backend
#[derive(Debug, Clone)]
pub struct S3Config {
    /// Endpoint override (LocalStack, MinIO); addressing becomes path-style
    pub endpoint: Option<String>,
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    /// Sent as `max-keys`
    pub page_size: i32,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            region: "ap-southeast-2".to_string(),
            access_key: None,
            secret_key: None,
            page_size: MAX_KEYS_LIMIT,
        }
    }
}

impl S3Config {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Static credentials; without them the default AWS provider chain is used
    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Clamped to `1..=1000`
    pub fn with_page_size(mut self, page_size: i32) -> Self {
        self.page_size = page_size.clamp(1, MAX_KEYS_LIMIT);
        self
    }
}
