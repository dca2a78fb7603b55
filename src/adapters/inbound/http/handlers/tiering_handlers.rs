use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::{
    adapters::inbound::http::{
        dto::{
            ClassifyRequestDto, ClassifyResponseDto, ErrorResponseDto, SavingsQuery,
            SavingsReportDto,
        },
        router::AppState,
    },
    domain::{errors::TieringError, value_objects::BucketName},
};

type ApiError = (StatusCode, Json<ErrorResponseDto>);

fn tiering_error(e: TieringError) -> ApiError {
    let status_code = StatusCode::from(&e);
    (status_code, Json(ErrorResponseDto::from_tiering_error(&e)))
}

fn parse_bucket(name: String) -> Result<BucketName, ApiError> {
    BucketName::new(name).map_err(|e| tiering_error(TieringError::from(e)))
}

/// Handle tagging every object under a prefix with its tier
pub async fn classify_objects(
    State(app_state): State<AppState>,
    Json(request): Json<ClassifyRequestDto>,
) -> Result<Json<ClassifyResponseDto>, ApiError> {
    let tiering_service = &app_state.tiering_service;

    let bucket = parse_bucket(request.bucket.clone())?;
    let policy = request
        .policy(tiering_service.default_policy())
        .map_err(|e| tiering_error(e.into()))?;

    let stats = tiering_service
        .classify(&bucket, &request.prefix, policy)
        .await
        .map_err(tiering_error)?;

    Ok(Json(stats.into()))
}

/// Handle the monthly savings report for a prefix
pub async fn s3_savings_report(
    State(app_state): State<AppState>,
    Query(query): Query<SavingsQuery>,
) -> Result<Json<SavingsReportDto>, ApiError> {
    let bucket = parse_bucket(query.bucket)?;

    let report = app_state
        .tiering_service
        .estimate_savings(&bucket, &query.prefix)
        .await
        .map_err(tiering_error)?;

    Ok(Json(report.into()))
}
