use chrono::{DateTime, Utc};

use super::storage_class::StorageClass;
use crate::domain::errors::ValidationError;

/// Tag key under which the assigned tier is stored on each object
pub const TIER_TAG_KEY: &str = "tier";

/// Access tier assigned to an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Hot,
    Warm,
    Archive,
}

impl Tier {
    /// Lowercase name, as written to the `tier` tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Hot => "hot",
            Tier::Warm => "warm",
            Tier::Archive => "archive",
        }
    }

    /// Parse a `tier` tag value. Matching is exact; anything else is unknown.
    pub fn from_tag_value(value: &str) -> Option<Self> {
        match value {
            "hot" => Some(Tier::Hot),
            "warm" => Some(Tier::Warm),
            "archive" => Some(Tier::Archive),
            _ => None,
        }
    }

    /// Storage class an object in this tier would be priced at
    pub fn projected_storage_class(&self) -> StorageClass {
        match self {
            Tier::Hot => StorageClass::Standard,
            Tier::Warm => StorageClass::StandardIa,
            Tier::Archive => StorageClass::GlacierIr,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Age thresholds, in whole days, at which objects move to colder tiers.
///
/// `archive_after_days` is never below `warm_after_days`; inverted policies
/// are rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierPolicy {
    warm_after_days: u32,
    archive_after_days: u32,
}

impl TierPolicy {
    pub fn new(warm_after_days: u32, archive_after_days: u32) -> Result<Self, ValidationError> {
        if warm_after_days > archive_after_days {
            return Err(ValidationError::InvertedTierPolicy {
                warm_after_days,
                archive_after_days,
            });
        }

        Ok(Self {
            warm_after_days,
            archive_after_days,
        })
    }

    pub fn warm_after_days(&self) -> u32 {
        self.warm_after_days
    }

    pub fn archive_after_days(&self) -> u32 {
        self.archive_after_days
    }

    /// Map an object age onto a tier
    pub fn classify(&self, age_days: u64) -> Tier {
        if age_days >= u64::from(self.archive_after_days) {
            Tier::Archive
        } else if age_days >= u64::from(self.warm_after_days) {
            Tier::Warm
        } else {
            Tier::Hot
        }
    }

    /// Classify an object by its last-modified timestamp as seen at `now`
    pub fn classify_at(&self, last_modified: DateTime<Utc>, now: DateTime<Utc>) -> Tier {
        self.classify(age_in_days(last_modified, now))
    }
}

impl Default for TierPolicy {
    fn default() -> Self {
        Self {
            warm_after_days: 30,
            archive_after_days: 90,
        }
    }
}

/// Whole days elapsed between `last_modified` and `now`.
///
/// Partial days are truncated. A timestamp in the future yields 0.
pub fn age_in_days(last_modified: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let days = now.signed_duration_since(last_modified).num_days();
    u64::try_from(days).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_classify_boundaries() {
        let policy = TierPolicy::new(30, 90).unwrap();

        for age in 0..30 {
            assert_eq!(policy.classify(age), Tier::Hot, "age {}", age);
        }
        for age in 30..90 {
            assert_eq!(policy.classify(age), Tier::Warm, "age {}", age);
        }
        for age in [90, 91, 365, u64::MAX] {
            assert_eq!(policy.classify(age), Tier::Archive, "age {}", age);
        }
    }

    #[test]
    fn test_equal_thresholds_skip_warm() {
        let policy = TierPolicy::new(7, 7).unwrap();
        assert_eq!(policy.classify(6), Tier::Hot);
        assert_eq!(policy.classify(7), Tier::Archive);
    }

    #[test]
    fn test_zero_thresholds_archive_everything() {
        let policy = TierPolicy::new(0, 0).unwrap();
        assert_eq!(policy.classify(0), Tier::Archive);
    }

    #[test]
    fn test_inverted_policy_rejected() {
        assert_eq!(
            TierPolicy::new(90, 30),
            Err(ValidationError::InvertedTierPolicy {
                warm_after_days: 90,
                archive_after_days: 30,
            })
        );
    }

    #[test]
    fn test_age_truncates_to_whole_days() {
        let now = Utc::now();
        assert_eq!(age_in_days(now, now), 0);
        assert_eq!(age_in_days(now - Duration::hours(23), now), 0);
        assert_eq!(age_in_days(now - Duration::hours(49), now), 2);
        assert_eq!(age_in_days(now - Duration::days(100), now), 100);
    }

    #[test]
    fn test_future_timestamp_is_hot() {
        let now = Utc::now();
        let skewed = now + Duration::days(3);
        assert_eq!(age_in_days(skewed, now), 0);
        assert_eq!(TierPolicy::new(1, 2).unwrap().classify_at(skewed, now), Tier::Hot);
    }

    #[test]
    fn test_tag_values() {
        for tier in [Tier::Hot, Tier::Warm, Tier::Archive] {
            assert_eq!(Tier::from_tag_value(tier.as_str()), Some(tier));
        }
        assert_eq!(Tier::from_tag_value("ARCHIVE"), None);
        assert_eq!(Tier::from_tag_value("cold"), None);
    }

    #[test]
    fn test_projected_classes() {
        assert_eq!(Tier::Hot.projected_storage_class(), StorageClass::Standard);
        assert_eq!(Tier::Warm.projected_storage_class(), StorageClass::StandardIa);
        assert_eq!(Tier::Archive.projected_storage_class(), StorageClass::GlacierIr);
    }
}
