use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::Bound;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::{ObjectDescriptor, ObjectPage, StorageClass, TagSet},
        value_objects::{BucketName, ContinuationToken, ObjectKey},
    },
    ports::storage::ObjectStorage,
};

/// Page size used when none is configured, matching S3's `max-keys` default
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Object to place into an [`InMemoryObjectStorage`] bucket
#[derive(Debug, Clone, bon::Builder)]
pub struct SeedObject {
    #[builder(into)]
    pub key: String,
    #[builder(default)]
    pub size_bytes: u64,
    #[builder(default = Utc::now())]
    pub last_modified: DateTime<Utc>,
    pub storage_class: Option<StorageClass>,
    #[builder(default)]
    pub tags: TagSet,
}

/// In-memory object storage for tests and development.
///
/// Keys are listed in lexicographic order, `page_size` at a time. Faults can
/// be injected per key for tag calls and per call number for listing. A
/// listing call can also be scripted to return an empty page that still
/// carries a continuation token.
#[derive(Clone)]
pub struct InMemoryObjectStorage {
    data: Arc<RwLock<StorageData>>,
    page_size: usize,
}

#[derive(Default)]
struct StorageData {
    // bucket name -> key -> object
    buckets: HashMap<String, BTreeMap<String, StoredObject>>,
    faults: Faults,
    list_calls: usize,
}

#[derive(Default)]
struct Faults {
    put_tags: HashSet<String>,
    get_tags: HashSet<String>,
    list_on_call: HashSet<usize>,
    empty_page_on_call: HashSet<usize>,
}

struct StoredObject {
    size_bytes: u64,
    last_modified: DateTime<Utc>,
    storage_class: Option<StorageClass>,
    tags: TagSet,
}

impl InMemoryObjectStorage {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(StorageData::default())),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the maximum number of objects per listing page (at least 1)
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub async fn create_bucket(&self, bucket: &BucketName) {
        let mut data = self.data.write().await;
        data.buckets.entry(bucket.as_str().to_string()).or_default();
    }

    /// Add or overwrite an object, creating the bucket if needed
    pub async fn insert_object(&self, bucket: &BucketName, seed: SeedObject) -> StorageResult<()> {
        let key = ObjectKey::new(seed.key).map_err(|e| StorageError::InvalidResponse {
            message: format!("Invalid object key: {}", e),
        })?;

        let mut data = self.data.write().await;
        data.buckets
            .entry(bucket.as_str().to_string())
            .or_default()
            .insert(
                key.as_str().to_string(),
                StoredObject {
                    size_bytes: seed.size_bytes,
                    last_modified: seed.last_modified,
                    storage_class: seed.storage_class,
                    tags: seed.tags,
                },
            );
        Ok(())
    }

    /// Current tags of an object, `None` if it does not exist
    pub async fn tags_of(&self, bucket: &BucketName, key: &str) -> Option<TagSet> {
        let data = self.data.read().await;
        data.buckets
            .get(bucket.as_str())
            .and_then(|objects| objects.get(key))
            .map(|object| object.tags.clone())
    }

    /// Number of `list_page` calls served so far
    pub async fn list_calls(&self) -> usize {
        self.data.read().await.list_calls
    }

    /// Make every tag write to `key` fail
    pub async fn fail_put_tags_for(&self, key: &str) {
        self.data.write().await.faults.put_tags.insert(key.to_string());
    }

    /// Make every tag read of `key` fail
    pub async fn fail_get_tags_for(&self, key: &str) {
        self.data.write().await.faults.get_tags.insert(key.to_string());
    }

    /// Make the n-th `list_page` call (1-based, counted across all scans) fail
    pub async fn fail_list_on_call(&self, call: usize) {
        self.data.write().await.faults.list_on_call.insert(call);
    }

    /// Make the n-th `list_page` call (1-based) return no objects but a token
    /// that resumes where the call would have started
    pub async fn empty_page_on_call(&self, call: usize) {
        self.data.write().await.faults.empty_page_on_call.insert(call);
    }

    fn injected(operation: &str, target: &str) -> StorageError {
        StorageError::InfrastructureError {
            message: format!("Injected {} failure for {}", operation, target),
            source: None,
        }
    }
}

impl Default for InMemoryObjectStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn list_page(
        &self,
        bucket: &BucketName,
        prefix: &str,
        token: Option<&ContinuationToken>,
    ) -> StorageResult<ObjectPage> {
        let mut data = self.data.write().await;
        data.list_calls += 1;
        if data.faults.list_on_call.contains(&data.list_calls) {
            return Err(Self::injected("list", bucket.as_str()));
        }

        let objects = data
            .buckets
            .get(bucket.as_str())
            .ok_or_else(|| StorageError::BucketNotFound {
                bucket: bucket.to_string(),
            })?;

        // The token is the first key of the next page
        let start = match token {
            Some(token) => token.as_str().to_string(),
            None => prefix.to_string(),
        };

        let mut matching = objects
            .range((Bound::Included(start), Bound::Unbounded))
            .filter(|(key, _)| key.starts_with(prefix))
            .peekable();

        if data.faults.empty_page_on_call.contains(&data.list_calls) {
            let next_token = matching
                .peek()
                .and_then(|(key, _)| ContinuationToken::from_provider(Some(key.to_string())));
            return Ok(ObjectPage {
                objects: Vec::new(),
                next_token,
            });
        }

        let mut page = Vec::with_capacity(self.page_size.min(objects.len()));
        for (key, object) in matching.by_ref().take(self.page_size) {
            page.push(ObjectDescriptor {
                key: ObjectKey::new(key.clone()).map_err(|e| StorageError::InvalidResponse {
                    message: format!("Invalid stored key: {}", e),
                })?,
                size_bytes: object.size_bytes,
                last_modified: object.last_modified,
                storage_class: object.storage_class.clone(),
            });
        }

        let next_token = matching
            .next()
            .and_then(|(key, _)| ContinuationToken::from_provider(Some(key.to_string())));

        Ok(ObjectPage {
            objects: page,
            next_token,
        })
    }

    async fn put_tags(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        tags: &TagSet,
    ) -> StorageResult<()> {
        let mut data = self.data.write().await;
        if data.faults.put_tags.contains(key.as_str()) {
            return Err(Self::injected("put-tags", key.as_str()));
        }

        let object = data
            .buckets
            .get_mut(bucket.as_str())
            .ok_or_else(|| StorageError::BucketNotFound {
                bucket: bucket.to_string(),
            })?
            .get_mut(key.as_str())
            .ok_or_else(|| StorageError::ObjectNotFound {
                bucket: bucket.to_string(),
                key: key.clone(),
            })?;

        object.tags = tags.clone();
        Ok(())
    }

    async fn get_tags(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<TagSet> {
        let data = self.data.read().await;
        if data.faults.get_tags.contains(key.as_str()) {
            return Err(Self::injected("get-tags", key.as_str()));
        }

        data.buckets
            .get(bucket.as_str())
            .ok_or_else(|| StorageError::BucketNotFound {
                bucket: bucket.to_string(),
            })?
            .get(key.as_str())
            .map(|object| object.tags.clone())
            .ok_or_else(|| StorageError::ObjectNotFound {
                bucket: bucket.to_string(),
                key: key.clone(),
            })
    }
}
