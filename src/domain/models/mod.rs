pub mod object;
pub mod pricing;
pub mod report;
pub mod storage_class;
pub mod tier;

pub use object::{ObjectDescriptor, ObjectPage, TagSet, tier_from_tags, tier_tag_set};
pub use pricing::{BYTES_PER_GB, MIN_BILLABLE_GB, PriceTable, billable_gb, round_to_cents};
pub use report::{ClassifyStats, SavingsReport, TaggingOutcome};
pub use storage_class::StorageClass;
pub use tier::{TIER_TAG_KEY, Tier, TierPolicy, age_in_days};
