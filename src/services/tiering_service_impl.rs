use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    domain::{
        errors::{StorageError, TieringError, TieringResult},
        models::{
            ClassifyStats, ObjectDescriptor, PriceTable, SavingsReport, TaggingOutcome, Tier,
            TierPolicy, billable_gb, round_to_cents, tier_from_tags, tier_tag_set,
        },
        value_objects::{BucketName, ObjectKey},
    },
    ports::{services::TieringService, storage::ObjectStorage},
    services::BucketScanner,
};

/// Implementation of the TieringService
#[derive(Clone)]
pub struct TieringServiceImpl {
    storage: Arc<dyn ObjectStorage>,
    scanner: BucketScanner,
    prices: Arc<PriceTable>,
    default_policy: TierPolicy,
}

impl TieringServiceImpl {
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        prices: Arc<PriceTable>,
        default_policy: TierPolicy,
    ) -> Self {
        Self {
            scanner: BucketScanner::new(storage.clone()),
            storage,
            prices,
            default_policy,
        }
    }

    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    /// Classify one object and write its tier tag. Never fails: a rejected
    /// write comes back as `Skipped`.
    async fn tag_object(
        &self,
        bucket: &BucketName,
        object: &ObjectDescriptor,
        policy: &TierPolicy,
        now: DateTime<Utc>,
    ) -> TaggingOutcome {
        let tier = policy.classify_at(object.last_modified, now);

        match self
            .storage
            .put_tags(bucket, &object.key, &tier_tag_set(tier))
            .await
        {
            Ok(()) => TaggingOutcome::Tagged {
                key: object.key.clone(),
                tier,
            },
            Err(reason) => TaggingOutcome::Skipped {
                key: object.key.clone(),
                reason,
            },
        }
    }

    /// Tier recorded on the object, `Hot` when it has none or the tags
    /// cannot be read.
    async fn assigned_tier(&self, bucket: &BucketName, key: &ObjectKey) -> Tier {
        match self.storage.get_tags(bucket, key).await {
            Ok(tags) => tier_from_tags(&tags).unwrap_or(Tier::Hot),
            Err(e) => {
                debug!(key = %key, error = %e, "tag read failed, assuming hot");
                Tier::Hot
            }
        }
    }

    fn scan_failed(bucket: &BucketName, prefix: &str, source: StorageError) -> TieringError {
        TieringError::ScanFailed {
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
            source,
        }
    }
}

#[async_trait]
impl TieringService for TieringServiceImpl {
    #[tracing::instrument(skip_all, fields(bucket = %bucket, prefix = %prefix))]
    async fn classify(
        &self,
        bucket: &BucketName,
        prefix: &str,
        policy: Option<TierPolicy>,
    ) -> TieringResult<ClassifyStats> {
        let policy = policy.unwrap_or(self.default_policy);
        let now = Utc::now();
        let mut stats = ClassifyStats::default();
        let mut objects = self.scanner.scan(bucket, prefix);

        while let Some(object) = objects.next().await {
            let object = object.map_err(|e| Self::scan_failed(bucket, prefix, e))?;
            let outcome = self.tag_object(bucket, &object, &policy, now).await;

            match &outcome {
                TaggingOutcome::Tagged { key, tier } => {
                    debug!(key = %key, tier = %tier, "tagged object");
                }
                TaggingOutcome::Skipped { key, reason } => {
                    warn!(key = %key, error = %reason, "failed to tag object, skipping");
                }
            }
            stats.record(&outcome);
        }

        info!(
            tagged = stats.tagged,
            skipped = stats.skipped,
            warm_after_days = policy.warm_after_days(),
            archive_after_days = policy.archive_after_days(),
            "classification finished"
        );

        Ok(stats)
    }

    #[tracing::instrument(skip_all, fields(bucket = %bucket, prefix = %prefix))]
    async fn estimate_savings(
        &self,
        bucket: &BucketName,
        prefix: &str,
    ) -> TieringResult<SavingsReport> {
        let mut current = 0.0_f64;
        let mut projected = 0.0_f64;
        let mut object_count: u64 = 0;
        let mut bytes_analyzed: u64 = 0;
        let mut objects = self.scanner.scan(bucket, prefix);

        while let Some(object) = objects.next().await {
            let object = object.map_err(|e| Self::scan_failed(bucket, prefix, e))?;

            object_count += 1;
            bytes_analyzed = bytes_analyzed.saturating_add(object.size_bytes);

            let size_gb = billable_gb(object.size_bytes);
            current += size_gb * self.prices.price_for_class(&object.effective_storage_class());

            let tier = self.assigned_tier(bucket, &object.key).await;
            projected += size_gb * self.prices.price_for_class(&tier.projected_storage_class());
        }

        let report = SavingsReport {
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
            current_monthly_cost: round_to_cents(current),
            projected_monthly_cost: round_to_cents(projected),
            object_count,
            bytes_analyzed,
        };

        info!(
            objects = report.object_count,
            bytes = report.bytes_analyzed,
            current = report.current_monthly_cost,
            projected = report.projected_monthly_cost,
            "savings estimate finished"
        );

        Ok(report)
    }

    fn default_policy(&self) -> TierPolicy {
        self.default_policy
    }
}
