//! HTTP Routes
//!
//! API Endpoints:
//! - /generate-avatar   POST  生成数字人视频（同步等待合成、下载、转存完成）
//! - /health            GET   健康检查
//! - /models            GET   可用头像角色及风格
//! - /voices            GET   可用音色

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate-avatar", post(handlers::generate_avatar))
        .route("/health", get(handlers::health))
        .route("/models", get(handlers::list_models))
        .route("/voices", get(handlers::list_voices))
}
