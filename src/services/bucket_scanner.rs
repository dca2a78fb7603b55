use async_stream::try_stream;
use futures::stream::BoxStream;
use std::sync::Arc;
use tracing::debug;

use crate::{
    domain::{
        errors::StorageResult,
        models::ObjectDescriptor,
        value_objects::{BucketName, ContinuationToken},
    },
    ports::storage::ObjectStorage,
};

/// Walks every object under a bucket prefix, one provider page at a time.
#[derive(Clone)]
pub struct BucketScanner {
    storage: Arc<dyn ObjectStorage>,
}

impl BucketScanner {
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self { storage }
    }

    /// Lazily list all objects whose key starts with `prefix`.
    ///
    /// Pages are fetched on demand as the stream is polled. A page-fetch
    /// error is yielded once and ends the stream. Each call starts again
    /// from the first page; order is whatever the provider returns.
    pub fn scan(
        &self,
        bucket: &BucketName,
        prefix: &str,
    ) -> BoxStream<'static, StorageResult<ObjectDescriptor>> {
        let storage = self.storage.clone();
        let bucket = bucket.clone();
        let prefix = prefix.to_string();

        Box::pin(try_stream! {
            let mut token: Option<ContinuationToken> = None;
            let mut page_number: u64 = 0;

            loop {
                page_number += 1;
                let page = storage.list_page(&bucket, &prefix, token.as_ref()).await?;

                debug!(
                    bucket = %bucket,
                    prefix = %prefix,
                    page = page_number,
                    objects = page.objects.len(),
                    has_more = page.next_token.is_some(),
                    "fetched listing page"
                );

                for object in page.objects {
                    yield object;
                }

                match page.next_token {
                    Some(next) => token = Some(next),
                    None => break,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::storage::{InMemoryObjectStorage, SeedObject};
    use crate::domain::errors::StorageError;
    use futures::TryStreamExt;
    use std::collections::HashSet;

    async fn seeded_storage(page_size: usize, keys: &[&str]) -> Arc<InMemoryObjectStorage> {
        let storage = Arc::new(InMemoryObjectStorage::new().with_page_size(page_size));
        let bucket = BucketName::new("scan-bucket".to_string()).unwrap();
        storage.create_bucket(&bucket).await;
        for key in keys {
            storage
                .insert_object(&bucket, SeedObject::builder().key(*key).size_bytes(10).build())
                .await
                .unwrap();
        }
        storage
    }

    #[tokio::test]
    async fn test_scan_follows_continuation_tokens() {
        let storage = seeded_storage(2, &["a", "b", "c", "d", "e"]).await;
        let scanner = BucketScanner::new(storage.clone());
        let bucket = BucketName::new("scan-bucket".to_string()).unwrap();

        let objects: Vec<ObjectDescriptor> = scanner.scan(&bucket, "").try_collect().await.unwrap();

        let keys: HashSet<&str> = objects.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(objects.len(), 5);
        assert_eq!(keys.len(), 5);
        assert_eq!(keys, HashSet::from(["a", "b", "c", "d", "e"]));
        assert_eq!(storage.list_calls().await, 3);
    }

    #[tokio::test]
    async fn test_scan_restarts_from_first_page() {
        let storage = seeded_storage(2, &["a", "b", "c"]).await;
        let scanner = BucketScanner::new(storage.clone());
        let bucket = BucketName::new("scan-bucket".to_string()).unwrap();

        let first: Vec<_> = scanner.scan(&bucket, "").try_collect().await.unwrap();
        let second: Vec<_> = scanner.scan(&bucket, "").try_collect().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(storage.list_calls().await, 4);
    }

    #[tokio::test]
    async fn test_scan_continues_past_empty_pages() {
        let storage = seeded_storage(2, &["a", "b", "c", "d", "e"]).await;
        storage.empty_page_on_call(1).await;
        storage.empty_page_on_call(3).await;
        let scanner = BucketScanner::new(storage.clone());
        let bucket = BucketName::new("scan-bucket".to_string()).unwrap();

        let objects: Vec<ObjectDescriptor> = scanner.scan(&bucket, "").try_collect().await.unwrap();

        let keys: Vec<&str> = objects.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(storage.list_calls().await, 5);
    }

    #[tokio::test]
    async fn test_scan_is_lazy() {
        let storage = seeded_storage(1, &["a", "b", "c"]).await;
        let scanner = BucketScanner::new(storage.clone());
        let bucket = BucketName::new("scan-bucket".to_string()).unwrap();

        let stream = scanner.scan(&bucket, "");
        assert_eq!(storage.list_calls().await, 0);
        drop(stream);
        assert_eq!(storage.list_calls().await, 0);
    }

    #[tokio::test]
    async fn test_scan_surfaces_page_failure() {
        let storage = seeded_storage(2, &["a", "b", "c", "d", "e"]).await;
        storage.fail_list_on_call(2).await;
        let scanner = BucketScanner::new(storage.clone());
        let bucket = BucketName::new("scan-bucket".to_string()).unwrap();

        let result: StorageResult<Vec<_>> = scanner.scan(&bucket, "").try_collect().await;
        assert!(matches!(
            result,
            Err(StorageError::InfrastructureError { .. })
        ));
    }

    #[tokio::test]
    async fn test_scan_of_empty_prefix_match() {
        let storage = seeded_storage(2, &["logs/a", "logs/b"]).await;
        let scanner = BucketScanner::new(storage);
        let bucket = BucketName::new("scan-bucket".to_string()).unwrap();

        let objects: Vec<_> = scanner.scan(&bucket, "data/").try_collect().await.unwrap();
        assert!(objects.is_empty());
    }
}
