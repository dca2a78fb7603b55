use chrono::{DateTime, Utc};
use std::collections::HashMap;

use super::storage_class::StorageClass;
use super::tier::{TIER_TAG_KEY, Tier};
use crate::domain::value_objects::{ContinuationToken, ObjectKey};

/// Object tags, tag key to tag value
pub type TagSet = HashMap<String, String>;

/// Snapshot of one object as returned by a listing call
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDescriptor {
    pub key: ObjectKey,
    pub size_bytes: u64,
    pub last_modified: DateTime<Utc>,
    /// Absent when the provider omits it, which S3 does for STANDARD
    pub storage_class: Option<StorageClass>,
}

impl ObjectDescriptor {
    /// Storage class used for pricing, STANDARD when the provider sent none
    pub fn effective_storage_class(&self) -> StorageClass {
        self.storage_class.clone().unwrap_or(StorageClass::Standard)
    }
}

/// One page of a bucket listing
#[derive(Debug, Clone, Default)]
pub struct ObjectPage {
    pub objects: Vec<ObjectDescriptor>,
    /// Token for the following page; `None` on the last page
    pub next_token: Option<ContinuationToken>,
}

/// Tag set written to an object when it is classified
pub fn tier_tag_set(tier: Tier) -> TagSet {
    HashMap::from([(TIER_TAG_KEY.to_string(), tier.as_str().to_string())])
}

/// Tier recorded in a tag set, if any
pub fn tier_from_tags(tags: &TagSet) -> Option<Tier> {
    tags.get(TIER_TAG_KEY).and_then(|v| Tier::from_tag_value(v))
}
