use axum::Json;

use crate::adapters::inbound::http::dto::HealthResponseDto;

/// Liveness probe
pub async fn health() -> Json<HealthResponseDto> {
    Json(HealthResponseDto {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
