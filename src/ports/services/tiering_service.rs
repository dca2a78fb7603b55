use async_trait::async_trait;

use crate::domain::{
    errors::TieringResult,
    models::{ClassifyStats, SavingsReport, TierPolicy},
    value_objects::BucketName,
};

/// Service port for tier classification and savings estimation
#[async_trait]
pub trait TieringService: Send + Sync + 'static {
    /// Tag every object under `prefix` with its age tier.
    ///
    /// `policy` falls back to the service default when `None`. Objects whose
    /// tag write fails are counted as skipped; a listing failure aborts.
    async fn classify(
        &self,
        bucket: &BucketName,
        prefix: &str,
        policy: Option<TierPolicy>,
    ) -> TieringResult<ClassifyStats>;

    /// Compare current storage cost with the cost implied by assigned tiers
    async fn estimate_savings(
        &self,
        bucket: &BucketName,
        prefix: &str,
    ) -> TieringResult<SavingsReport>;

    /// Policy applied when a classify request carries none
    fn default_policy(&self) -> TierPolicy;
}
