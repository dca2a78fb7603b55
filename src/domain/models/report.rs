use super::pricing::round_to_cents;
use super::tier::Tier;
use crate::domain::errors::StorageError;
use crate::domain::value_objects::ObjectKey;

/// Result of tagging a single object
#[derive(Debug, Clone)]
pub enum TaggingOutcome {
    Tagged { key: ObjectKey, tier: Tier },
    Skipped { key: ObjectKey, reason: StorageError },
}

/// Counts from one classification run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyStats {
    pub tagged: u64,
    pub skipped: u64,
}

impl ClassifyStats {
    pub fn record(&mut self, outcome: &TaggingOutcome) {
        match outcome {
            TaggingOutcome::Tagged { .. } => self.tagged += 1,
            TaggingOutcome::Skipped { .. } => self.skipped += 1,
        }
    }

    /// Number of objects the run visited
    pub fn total(&self) -> u64 {
        self.tagged + self.skipped
    }
}

/// Monthly cost comparison for a bucket prefix. Costs are in AUD, rounded
/// to cents.
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsReport {
    pub bucket: String,
    pub prefix: String,
    pub current_monthly_cost: f64,
    pub projected_monthly_cost: f64,
    pub object_count: u64,
    pub bytes_analyzed: u64,
}

impl SavingsReport {
    /// Current minus projected cost; negative when tiering would cost more
    pub fn estimated_monthly_savings(&self) -> f64 {
        round_to_cents(self.current_monthly_cost - self.projected_monthly_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_fold_outcomes() {
        let key = ObjectKey::new("k".to_string()).unwrap();
        let outcomes = [
            TaggingOutcome::Tagged {
                key: key.clone(),
                tier: Tier::Hot,
            },
            TaggingOutcome::Skipped {
                key: key.clone(),
                reason: StorageError::InfrastructureError {
                    message: "timeout".to_string(),
                    source: None,
                },
            },
            TaggingOutcome::Tagged {
                key,
                tier: Tier::Archive,
            },
        ];

        let mut stats = ClassifyStats::default();
        for outcome in &outcomes {
            stats.record(outcome);
        }

        assert_eq!(stats, ClassifyStats { tagged: 2, skipped: 1 });
        assert_eq!(stats.total(), 3);
    }

    #[test]
    fn test_estimated_savings() {
        let report = SavingsReport {
            bucket: "b".to_string(),
            prefix: String::new(),
            current_monthly_cost: 0.3,
            projected_monthly_cost: 0.1,
            object_count: 1,
            bytes_analyzed: 0,
        };
        assert_eq!(report.estimated_monthly_savings(), 0.2);
    }
}
