use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::{
    adapters::outbound::storage::{InMemoryObjectStorage, S3Config, S3ObjectStorage},
    domain::{
        errors::ValidationError,
        models::{PriceTable, TierPolicy},
    },
    ports::storage::ObjectStorage,
    services::TieringServiceImpl,
};

/// Price table variable, checked first
pub const PRICE_TABLE_ENV: &str = "APP_S3_PRICE_PER_GB";
/// Alternate spelling of [`PRICE_TABLE_ENV`], used only when that one is unset
pub const PRICE_TABLE_ENV_ALT: &str = "APP_S3_PRICEPERGB";

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub price_table: PriceTable,
    pub default_policy: TierPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::InMemory,
            price_table: PriceTable::default(),
            default_policy: TierPolicy::default(),
        }
    }
}

/// Storage backend configuration
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    /// AWS S3 or an S3-compatible endpoint (LocalStack, MinIO)
    S3(S3Config),
}

impl StorageBackend {
    pub fn name(&self) -> &'static str {
        match self {
            StorageBackend::InMemory => "memory",
            StorageBackend::S3(_) => "s3",
        }
    }
}

/// Application services container
pub struct AppServices {
    pub tiering_service: TieringServiceImpl,
    pub storage: Arc<dyn ObjectStorage>,
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
    storage: Option<Arc<dyn ObjectStorage>>,
}

impl AppBuilder {
    /// Create a new application builder
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            storage: None,
        }
    }

    /// Configure the application with custom settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure storage backend
    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    /// Use an already constructed storage adapter instead of the configured backend
    pub fn with_storage(mut self, storage: Arc<dyn ObjectStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_price_table(mut self, price_table: PriceTable) -> Self {
        self.config.price_table = price_table;
        self
    }

    pub fn with_default_policy(mut self, policy: TierPolicy) -> Self {
        self.config.default_policy = policy;
        self
    }

    /// Build the complete application with services
    pub async fn build(self) -> Result<AppServices, AppError> {
        let storage = match &self.storage {
            Some(storage) => storage.clone(),
            None => self.create_storage_adapter().await?,
        };

        info!(
            backend = self.config.storage_backend.name(),
            prices = self.config.price_table.len(),
            warm_after_days = self.config.default_policy.warm_after_days(),
            archive_after_days = self.config.default_policy.archive_after_days(),
            "building tiering service"
        );

        let tiering_service = TieringServiceImpl::new(
            storage.clone(),
            Arc::new(self.config.price_table),
            self.config.default_policy,
        );

        Ok(AppServices {
            tiering_service,
            storage,
        })
    }

    /// Create the storage adapter based on configuration
    async fn create_storage_adapter(&self) -> Result<Arc<dyn ObjectStorage>, AppError> {
        match &self.config.storage_backend {
            StorageBackend::InMemory => Ok(Arc::new(InMemoryObjectStorage::new())),
            StorageBackend::S3(config) => {
                if config.region.trim().is_empty() {
                    return Err(AppError::Configuration {
                        message: "S3 region must not be empty".to_string(),
                    });
                }
                Ok(Arc::new(S3ObjectStorage::connect(config).await))
            }
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid configuration value: {0}")]
    InvalidValue(#[from] ValidationError),
}

/// Parse a price table from `CLASS=price[,CLASS=price...]` or a JSON object
/// such as `{"STANDARD": 0.033}`. The result replaces the default table.
pub fn parse_price_table(raw: &str) -> Result<PriceTable, ValidationError> {
    let raw = raw.trim();

    let prices: HashMap<String, f64> = if raw.starts_with('{') {
        serde_json::from_str(raw)
            .map_err(|e| ValidationError::MalformedPriceEntry(format!("{}: {}", raw, e)))?
    } else {
        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let (class, price) = entry
                    .split_once('=')
                    .ok_or_else(|| ValidationError::MalformedPriceEntry(entry.to_string()))?;
                let price = price
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| ValidationError::MalformedPriceEntry(entry.to_string()))?;
                Ok((class.trim().to_string(), price))
            })
            .collect::<Result<_, ValidationError>>()?
    };

    PriceTable::new(prices)
}

/// Resolve the price table from the two supported variable spellings.
/// The first non-blank one wins; neither gives the default table.
pub fn price_table_from(
    primary: Option<&str>,
    alternate: Option<&str>,
) -> Result<PriceTable, ValidationError> {
    let non_blank = |raw: &&str| !raw.trim().is_empty();
    match primary.filter(non_blank).or(alternate.filter(non_blank)) {
        Some(raw) => parse_price_table(raw),
        None => Ok(PriceTable::default()),
    }
}

/// Convenience functions for common configurations
///
/// Create an in-memory application for testing and development
pub async fn create_in_memory_app() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::InMemory)
        .build()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::services::TieringService;

    #[tokio::test]
    async fn test_create_in_memory_app() {
        let app = create_in_memory_app().await.unwrap();
        assert_eq!(app.tiering_service.default_policy(), TierPolicy::default());
        assert_eq!(app.tiering_service.prices().price_for("STANDARD"), 0.033);
    }

    #[tokio::test]
    async fn test_app_builder_overrides() {
        let policy = TierPolicy::new(7, 14).unwrap();
        let prices = parse_price_table("STANDARD=0.05").unwrap();
        let app = AppBuilder::new()
            .with_default_policy(policy)
            .with_price_table(prices)
            .build()
            .await
            .unwrap();

        assert_eq!(app.tiering_service.default_policy(), policy);
        assert_eq!(app.tiering_service.prices().price_for("STANDARD"), 0.05);
        assert_eq!(app.tiering_service.prices().price_for("GLACIER"), 0.0);
    }

    #[test]
    fn test_parse_price_table_formats() {
        let table = parse_price_table("STANDARD=0.04, GLACIER_IR = 0.01").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.price_for("GLACIER_IR"), 0.01);

        let table = parse_price_table(r#"{"STANDARD": 0.04, "INTELLIGENT_TIERING": 0.02}"#).unwrap();
        assert_eq!(table.price_for("INTELLIGENT_TIERING"), 0.02);
    }

    #[test]
    fn test_parse_price_table_rejects_garbage() {
        assert!(matches!(
            parse_price_table("STANDARD"),
            Err(ValidationError::MalformedPriceEntry(_))
        ));
        assert!(matches!(
            parse_price_table("STANDARD=cheap"),
            Err(ValidationError::MalformedPriceEntry(_))
        ));
        assert!(matches!(
            parse_price_table("STANDARD=-1"),
            Err(ValidationError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn test_price_table_key_precedence() {
        let table = price_table_from(Some("STANDARD=1"), Some("STANDARD=2")).unwrap();
        assert_eq!(table.price_for("STANDARD"), 1.0);

        let table = price_table_from(None, Some("STANDARD=2")).unwrap();
        assert_eq!(table.price_for("STANDARD"), 2.0);

        let table = price_table_from(None, None).unwrap();
        assert_eq!(table, PriceTable::default());
    }

    #[test]
    fn test_blank_primary_price_table_falls_back_to_alternate() {
        let table = price_table_from(Some(""), Some("STANDARD=2")).unwrap();
        assert_eq!(table.price_for("STANDARD"), 2.0);
        assert_eq!(table.len(), 1);

        let table = price_table_from(Some("  "), Some("")).unwrap();
        assert_eq!(table, PriceTable::default());
    }

    #[tokio::test]
    async fn test_s3_backend_requires_region() {
        let result = AppBuilder::new()
            .with_storage_backend(StorageBackend::S3(S3Config::default().with_region(" ")))
            .build()
            .await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_s3_backend_builds_without_network() {
        let config = S3Config::default()
            .with_endpoint("http://localhost:4566")
            .with_credentials("test", "test");
        let app = AppBuilder::new()
            .with_storage_backend(StorageBackend::S3(config))
            .build()
            .await
            .unwrap();
        assert_eq!(app.tiering_service.default_policy(), TierPolicy::default());
    }
}
