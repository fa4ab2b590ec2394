//! HTTP Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::GenerationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    /// 400 - 输入校验失败
    BadRequest(String),
    /// 401 - API key 缺失或错误
    Unauthorized(String),
    /// 502 - 外部服务拒绝或任务失败
    BadGateway(String),
    /// 504 - 轮询超时
    GatewayTimeout(String),
    /// 500 - 未分类错误
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::BadGateway(msg)
            | ApiError::GatewayTimeout(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(status = status.as_u16(), error = %msg, "Bad request");
            }
            ApiError::Unauthorized(_) => {
                tracing::warn!(status = status.as_u16(), "Unauthorized request");
            }
            ApiError::BadGateway(msg) => {
                tracing::error!(status = status.as_u16(), error = %msg, "Upstream service error");
            }
            ApiError::GatewayTimeout(msg) => {
                tracing::error!(status = status.as_u16(), error = %msg, "Upstream timeout");
            }
            ApiError::Internal(msg) => {
                tracing::error!(status = status.as_u16(), error = %msg, "Internal server error");
            }
        }

        (status, Json(ErrorResponse::new(self.message()))).into_response()
    }
}

impl From<GenerationError> for ApiError {
    fn from(e: GenerationError) -> Self {
        let message = e.to_string();
        match e {
            GenerationError::Validation(_) => ApiError::BadRequest(message),
            GenerationError::Timeout { .. } => ApiError::GatewayTimeout(message),
            GenerationError::Submission(_)
            | GenerationError::JobFailed(_)
            | GenerationError::Invariant(_)
            | GenerationError::Download(_)
            | GenerationError::Upload(_) => ApiError::BadGateway(message),
            GenerationError::Unexpected(_) => ApiError::Internal(message),
        }
    }
}
