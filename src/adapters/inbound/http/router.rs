use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{classify_objects, health, s3_savings_report};
use crate::ports::services::TieringService;

/// Application state containing all services
#[derive(Clone)]
pub struct AppState {
    pub tiering_service: Arc<dyn TieringService>,
}

/// Create the main application router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/storage", create_storage_router())
        .layer(TraceLayer::new_for_http())
        // Add state for dependency injection
        .with_state(state)
}

/// Create a router with just the storage tiering operations
pub fn create_storage_router() -> Router<AppState> {
    Router::new()
        .route("/classify", post(classify_objects))
        .route("/reports/s3-savings", get(s3_savings_report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::{
            inbound::http::dto::{
                ClassifyResponseDto, ErrorResponseDto, HealthResponseDto, SavingsReportDto,
            },
            outbound::storage::{InMemoryObjectStorage, SeedObject},
        },
        domain::{models::PriceTable, value_objects::BucketName},
        services::TieringServiceImpl,
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::{Duration, Utc};
    use serde_json::json;

    async fn create_test_server() -> (TestServer, Arc<InMemoryObjectStorage>) {
        let storage = Arc::new(InMemoryObjectStorage::new());
        let bucket = BucketName::new("media".to_string()).unwrap();
        storage
            .insert_object(
                &bucket,
                SeedObject::builder()
                    .key("old.bin")
                    .size_bytes(1 << 30)
                    .last_modified(Utc::now() - Duration::days(100))
                    .build(),
            )
            .await
            .unwrap();

        let service = TieringServiceImpl::new(
            storage.clone(),
            Arc::new(PriceTable::default()),
            Default::default(),
        );
        let state = AppState {
            tiering_service: Arc::new(service),
        };

        (TestServer::new(create_router(state)).unwrap(), storage)
    }

    #[tokio::test]
    async fn test_health() {
        let (server, _) = create_test_server().await;

        let response = server.get("/health").await;
        response.assert_status_ok();
        assert_eq!(response.json::<HealthResponseDto>().status, "ok");
    }

    #[tokio::test]
    async fn test_classify_endpoint() {
        let (server, storage) = create_test_server().await;

        let response = server
            .post("/storage/classify")
            .json(&json!({ "bucket": "media" }))
            .await;

        response.assert_status_ok();
        let body = response.json::<ClassifyResponseDto>();
        assert_eq!(body.status, "ok");
        assert_eq!(body.tagged, 1);
        assert_eq!(body.skipped, 0);

        let bucket = BucketName::new("media".to_string()).unwrap();
        let tags = storage.tags_of(&bucket, "old.bin").await.unwrap();
        assert_eq!(tags.get("tier").map(String::as_str), Some("archive"));
    }

    #[tokio::test]
    async fn test_classify_rejects_invalid_bucket() {
        let (server, _) = create_test_server().await;

        let response = server
            .post("/storage/classify")
            .json(&json!({ "bucket": "media/assets" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<ErrorResponseDto>().error, "ValidationError");
    }

    #[tokio::test]
    async fn test_classify_rejects_inverted_policy() {
        let (server, _) = create_test_server().await;

        let response = server
            .post("/storage/classify")
            .json(&json!({ "bucket": "media", "warmAfterDays": 90, "archiveAfterDays": 30 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_savings_report_endpoint() {
        let (server, _) = create_test_server().await;

        let response = server
            .get("/storage/reports/s3-savings")
            .add_query_param("bucket", "media")
            .await;

        response.assert_status_ok();
        let report = response.json::<SavingsReportDto>();
        assert_eq!(report.bucket, "media");
        assert_eq!(report.prefix, "");
        assert_eq!(report.object_count, 1);
        assert_eq!(report.current_monthly_aud, 0.03);
        assert_eq!(report.projected_monthly_aud, 0.03);
    }

    #[tokio::test]
    async fn test_savings_report_missing_bucket_is_bad_gateway() {
        let (server, _) = create_test_server().await;

        let response = server
            .get("/storage/reports/s3-savings")
            .add_query_param("bucket", "no-such-bucket")
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body = response.json::<ErrorResponseDto>();
        assert_eq!(body.error, "ScanFailed");
    }
}
