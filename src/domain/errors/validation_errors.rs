/// Validation errors for domain value objects
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    // ObjectKey validation errors
    EmptyObjectKey,
    ObjectKeyTooLong {
        actual: usize,
        max: usize,
    },
    InvalidObjectKeyCharacter(char),

    // BucketName validation errors
    BucketNameTooShort {
        actual: usize,
        min: usize,
    },
    BucketNameTooLong {
        actual: usize,
        max: usize,
    },
    BucketNameInvalidStart,
    BucketNameInvalidEnd,
    BucketNameInvalidCharacter(char),
    BucketNameLooksLikeIpAddress,

    // ContinuationToken validation errors
    EmptyContinuationToken,

    // Tiering policy validation errors
    InvertedTierPolicy {
        warm_after_days: u32,
        archive_after_days: u32,
    },

    // Price table validation errors
    InvalidPrice {
        storage_class: String,
        value: f64,
    },
    MalformedPriceEntry(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ObjectKey errors
            ValidationError::EmptyObjectKey => write!(f, "Object key cannot be empty"),
            ValidationError::ObjectKeyTooLong { actual, max } => {
                write!(f, "Object key too long: {} bytes (max: {})", actual, max)
            }
            ValidationError::InvalidObjectKeyCharacter(c) => {
                write!(f, "Invalid character in object key: {:?}", c)
            }

            // BucketName errors
            ValidationError::BucketNameTooShort { actual, min } => {
                write!(
                    f,
                    "Bucket name too short: {} characters (min: {})",
                    actual, min
                )
            }
            ValidationError::BucketNameTooLong { actual, max } => {
                write!(
                    f,
                    "Bucket name too long: {} characters (max: {})",
                    actual, max
                )
            }
            ValidationError::BucketNameInvalidStart => {
                write!(f, "Bucket name must start with a letter or number")
            }
            ValidationError::BucketNameInvalidEnd => {
                write!(f, "Bucket name must end with a letter or number")
            }
            ValidationError::BucketNameInvalidCharacter(c) => {
                write!(
                    f,
                    "Invalid character in bucket name: '{}'. Only letters, numbers, periods, hyphens and underscores allowed",
                    c
                )
            }
            ValidationError::BucketNameLooksLikeIpAddress => {
                write!(f, "Bucket name cannot be formatted as an IP address")
            }

            ValidationError::EmptyContinuationToken => {
                write!(f, "Continuation token cannot be empty")
            }

            ValidationError::InvertedTierPolicy {
                warm_after_days,
                archive_after_days,
            } => {
                write!(
                    f,
                    "archiveAfterDays ({}) must not be less than warmAfterDays ({})",
                    archive_after_days, warm_after_days
                )
            }

            ValidationError::InvalidPrice {
                storage_class,
                value,
            } => {
                write!(
                    f,
                    "Invalid price for storage class '{}': {} (expected a finite, non-negative number)",
                    storage_class, value
                )
            }
            ValidationError::MalformedPriceEntry(entry) => {
                write!(
                    f,
                    "Malformed price entry '{}' (expected CLASS=price)",
                    entry
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}
