pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    // Value objects
    BucketName,
    // Models
    ClassifyStats,
    ContinuationToken,
    DomainValidationError,
    ObjectDescriptor,
    ObjectKey,
    ObjectPage,
    PriceTable,
    SavingsReport,
    // Errors
    StorageError,
    StorageClass,
    TagSet,
    Tier,
    TierPolicy,
    TieringError,
};

// Port types - interfaces for external systems
pub use ports::{ObjectStorage, TieringService};

// Service implementations - business logic
pub use services::{BucketScanner, TieringServiceImpl};

// Application factory and configuration
pub use app::{
    AppBuilder, AppConfig, AppError, AppServices, StorageBackend, create_in_memory_app,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::storage::{
    InMemoryObjectStorage, S3Config, S3ObjectStorage, SeedObject,
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        AppBuilder, AppServices, BucketName, InMemoryObjectStorage, ObjectKey, ObjectStorage,
        PriceTable, SeedObject, Tier, TierPolicy, TieringService, TieringServiceImpl,
        create_in_memory_app,
    };
}
