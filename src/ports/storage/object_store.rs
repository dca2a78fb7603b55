use async_trait::async_trait;

use crate::domain::{
    errors::StorageResult,
    models::{ObjectPage, TagSet},
    value_objects::{BucketName, ContinuationToken, ObjectKey},
};

/// Port for the object-storage provider.
/// Abstracts the actual backend (S3-compatible HTTP API, in-memory, local filesystem).
#[async_trait]
pub trait ObjectStorage: Send + Sync + 'static {
    /// Fetch one page of objects whose key starts with `prefix`.
    ///
    /// `token` is `None` for the first page and otherwise the `next_token`
    /// of the previous page, passed back unchanged.
    async fn list_page(
        &self,
        bucket: &BucketName,
        prefix: &str,
        token: Option<&ContinuationToken>,
    ) -> StorageResult<ObjectPage>;

    /// Replace the object's tag set
    async fn put_tags(&self, bucket: &BucketName, key: &ObjectKey, tags: &TagSet)
    -> StorageResult<()>;

    /// Read the object's tag set
    async fn get_tags(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<TagSet>;
}
