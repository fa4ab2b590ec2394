//! Avatar Handlers

use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use std::sync::Arc;

use crate::infrastructure::http::dto::{GenerateAvatarBody, GenerateAvatarResponseDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// 优先取 X-API-Key header，其次取请求体中的 key 字段
fn provided_key<'a>(headers: &'a HeaderMap, body_key: Option<&'a str>) -> Option<&'a str> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .or(body_key)
}

/// POST /generate-avatar
///
/// 认证检查先于任何输入校验；请求体中的 key 单独读取
pub async fn generate_avatar(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<GenerateAvatarResponseDto>, ApiError> {
    let body = GenerateAvatarBody::from_slice(&body);

    if !state.is_authorized(provided_key(&headers, body.key())) {
        return Err(ApiError::Unauthorized(
            "Invalid or missing API key".to_string(),
        ));
    }

    let req = body
        .into_request()
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))?;

    let result = state.generate_avatar_handler.handle(req.into()).await?;

    Ok(Json(GenerateAvatarResponseDto {
        success: true,
        video_url: result.video_url,
        job_id: result.job_id,
    }))
}
