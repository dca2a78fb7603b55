use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{
    Client,
    config::Credentials,
    operation::list_objects_v2::ListObjectsV2Output,
    types::{Object, Tag, Tagging},
};
use chrono::DateTime;
use tracing::debug;

use super::S3Config;
use crate::{
    adapters::outbound::storage::error::StoreError,
    domain::{
        errors::{StorageError, StorageResult},
        models::{ObjectDescriptor, ObjectPage, StorageClass, TagSet},
        value_objects::{BucketName, ContinuationToken, ObjectKey},
    },
    ports::storage::ObjectStorage,
};

/// Object storage backed by S3 or an S3-compatible endpoint.
///
/// With an endpoint override the client switches to path-style addressing
/// (`{endpoint}/{bucket}/{key}`) as LocalStack and MinIO expect.
#[derive(Clone)]
pub struct S3ObjectStorage {
    client: Client,
    page_size: i32,
}

impl S3ObjectStorage {
    pub async fn connect(config: &S3Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        if let (Some(access_key), Some(secret_key)) = (&config.access_key, &config.secret_key) {
            let credentials =
                Credentials::new(access_key, secret_key, None, None, "object-tiering");
            loader = loader.credentials_provider(credentials);
        }

        let sdk_config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.endpoint.is_some())
            .build();

        Self::from_client(Client::from_conf(s3_config), config.page_size)
    }

    pub fn from_client(client: Client, page_size: i32) -> Self {
        Self { client, page_size }
    }
}

/// Convert one ListObjectsV2 response into a page
fn page_from(output: ListObjectsV2Output) -> StorageResult<ObjectPage> {
    let objects = output
        .contents
        .unwrap_or_default()
        .into_iter()
        .map(descriptor_from)
        .collect::<StorageResult<Vec<_>>>()?;

    let next_token = if output.is_truncated.unwrap_or(false) {
        let token = ContinuationToken::from_provider(output.next_continuation_token);
        if token.is_none() {
            return Err(StorageError::InvalidResponse {
                message: "Truncated listing without a continuation token".to_string(),
            });
        }
        token
    } else {
        None
    };

    Ok(ObjectPage {
        objects,
        next_token,
    })
}

fn descriptor_from(object: Object) -> StorageResult<ObjectDescriptor> {
    let key = ObjectKey::new(object.key.unwrap_or_default()).map_err(|e| {
        StorageError::InvalidResponse {
            message: format!("Invalid key in listing: {}", e),
        }
    })?;

    let last_modified = object
        .last_modified
        .and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos()))
        .ok_or_else(|| StorageError::InvalidResponse {
            message: format!("Listing entry {} has no last-modified time", key),
        })?;

    Ok(ObjectDescriptor {
        key,
        size_bytes: object
            .size
            .and_then(|size| u64::try_from(size).ok())
            .unwrap_or(0),
        last_modified,
        storage_class: object
            .storage_class
            .as_ref()
            .map(|class| StorageClass::parse(class.as_str())),
    })
}

/// Build the PutObjectTagging body, tags ordered by key
fn tagging_from(tags: &TagSet) -> Result<Tagging, StoreError> {
    let mut entries: Vec<_> = tags.iter().collect();
    entries.sort();

    let tag_set = entries
        .into_iter()
        .map(|(key, value)| Tag::builder().key(key).value(value).build())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Tagging::builder().set_tag_set(Some(tag_set)).build()?)
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    async fn list_page(
        &self,
        bucket: &BucketName,
        prefix: &str,
        token: Option<&ContinuationToken>,
    ) -> StorageResult<ObjectPage> {
        let mut request = self
            .client
            .list_objects_v2()
            .bucket(bucket.as_str())
            .prefix(prefix)
            .max_keys(self.page_size);

        if let Some(token) = token {
            request = request.continuation_token(token.as_str());
        }

        let output = request.send().await.map_err(|e| {
            StoreError::from(e).into_storage_error(bucket.as_str(), None, "list")
        })?;

        let page = page_from(output)?;
        debug!(
            bucket = %bucket,
            objects = page.objects.len(),
            truncated = page.next_token.is_some(),
            "ListObjectsV2 page"
        );
        Ok(page)
    }

    async fn put_tags(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        tags: &TagSet,
    ) -> StorageResult<()> {
        let tagging = tagging_from(tags)?;

        self.client
            .put_object_tagging()
            .bucket(bucket.as_str())
            .key(key.as_str())
            .tagging(tagging)
            .send()
            .await
            .map_err(|e| {
                StoreError::from(e).into_storage_error(bucket.as_str(), Some(key), "put-tags")
            })?;
        Ok(())
    }

    async fn get_tags(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<TagSet> {
        let output = self
            .client
            .get_object_tagging()
            .bucket(bucket.as_str())
            .key(key.as_str())
            .send()
            .await
            .map_err(|e| {
                StoreError::from(e).into_storage_error(bucket.as_str(), Some(key), "get-tags")
            })?;

        Ok(output
            .tag_set()
            .iter()
            .map(|tag| (tag.key().to_string(), tag.value().to_string()))
            .collect())
    }
}
