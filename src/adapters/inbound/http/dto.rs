use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::{
    errors::{TieringError, ValidationError},
    models::{ClassifyStats, SavingsReport, TierPolicy},
};

/// DTO for a classification request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequestDto {
    pub bucket: String,
    #[serde(default)]
    pub prefix: String,
    /// Overrides the configured warm threshold for this run
    pub warm_after_days: Option<u32>,
    pub archive_after_days: Option<u32>,
}

impl ClassifyRequestDto {
    /// Policy for this request, `None` when no threshold was overridden.
    /// A single override is combined with the other default threshold.
    pub fn policy(&self, defaults: TierPolicy) -> Result<Option<TierPolicy>, ValidationError> {
        if self.warm_after_days.is_none() && self.archive_after_days.is_none() {
            return Ok(None);
        }

        TierPolicy::new(
            self.warm_after_days.unwrap_or(defaults.warm_after_days()),
            self.archive_after_days
                .unwrap_or(defaults.archive_after_days()),
        )
        .map(Some)
    }
}

/// DTO for a classification result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResponseDto {
    pub status: String,
    pub tagged: u64,
    pub skipped: u64,
}

impl From<ClassifyStats> for ClassifyResponseDto {
    fn from(stats: ClassifyStats) -> Self {
        Self {
            status: "ok".to_string(),
            tagged: stats.tagged,
            skipped: stats.skipped,
        }
    }
}

/// Query parameters of the savings report
#[derive(Debug, Clone, Deserialize)]
pub struct SavingsQuery {
    pub bucket: String,
    #[serde(default)]
    pub prefix: String,
}

/// DTO for a savings report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsReportDto {
    pub bucket: String,
    pub prefix: String,
    pub current_monthly_aud: f64,
    pub projected_monthly_aud: f64,
    pub object_count: u64,
    pub bytes_analyzed: u64,
}

impl From<SavingsReport> for SavingsReportDto {
    fn from(report: SavingsReport) -> Self {
        Self {
            bucket: report.bucket,
            prefix: report.prefix,
            current_monthly_aud: report.current_monthly_cost,
            projected_monthly_aud: report.projected_monthly_cost,
            object_count: report.object_count,
            bytes_analyzed: report.bytes_analyzed,
        }
    }
}

/// DTO for error responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
    pub message: String,
    pub details: Option<HashMap<String, serde_json::Value>>,
    pub timestamp: DateTime<Utc>,
}

/// DTO for the liveness probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponseDto {
    pub status: String,
    pub version: String,
}

impl ErrorResponseDto {
    pub fn from_tiering_error(error: &TieringError) -> Self {
        let mut details = HashMap::new();

        let kind = match error {
            TieringError::InvalidRequest { .. } => "ValidationError",
            TieringError::ScanFailed {
                bucket,
                prefix,
                source,
            } => {
                details.insert(
                    "bucket".to_string(),
                    serde_json::Value::String(bucket.clone()),
                );
                details.insert(
                    "prefix".to_string(),
                    serde_json::Value::String(prefix.clone()),
                );
                details.insert(
                    "cause".to_string(),
                    serde_json::Value::String(source.kind().to_string()),
                );
                "ScanFailed"
            }
        };

        ErrorResponseDto {
            error: kind.to_string(),
            message: error.to_string(),
            details: if details.is_empty() {
                None
            } else {
                Some(details)
            },
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_request_defaults() {
        let dto: ClassifyRequestDto = serde_json::from_str(r#"{"bucket":"media"}"#).unwrap();
        assert_eq!(dto.prefix, "");
        assert_eq!(dto.policy(TierPolicy::default()).unwrap(), None);
    }

    #[test]
    fn test_partial_policy_override() {
        let dto: ClassifyRequestDto =
            serde_json::from_str(r#"{"bucket":"media","warmAfterDays":7}"#).unwrap();
        let policy = dto.policy(TierPolicy::default()).unwrap().unwrap();
        assert_eq!(policy.warm_after_days(), 7);
        assert_eq!(policy.archive_after_days(), 90);
    }

    #[test]
    fn test_inverted_override_rejected() {
        let dto: ClassifyRequestDto =
            serde_json::from_str(r#"{"bucket":"media","warmAfterDays":120}"#).unwrap();
        assert!(matches!(
            dto.policy(TierPolicy::default()),
            Err(ValidationError::InvertedTierPolicy { .. })
        ));
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let dto = SavingsReportDto::from(SavingsReport {
            bucket: "media".to_string(),
            prefix: String::new(),
            current_monthly_cost: 0.1,
            projected_monthly_cost: 0.1,
            object_count: 3,
            bytes_analyzed: 3 << 30,
        });
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["currentMonthlyAud"], 0.1);
        assert_eq!(json["projectedMonthlyAud"], 0.1);
        assert_eq!(json["objectCount"], 3);
        assert_eq!(json["bytesAnalyzed"], 3u64 << 30);
    }
}
