//! Health Handler

use axum::Json;

use crate::infrastructure::http::dto::HealthResponse;

/// 健康检查
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
