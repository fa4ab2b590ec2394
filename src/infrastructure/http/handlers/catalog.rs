//! Catalog Handlers - 可用头像与音色

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{ListModels, ListVoices};
use crate::infrastructure::http::dto::{ModelsResponse, VoicesResponse};
use crate::infrastructure::http::state::AppState;

/// GET /models
pub async fn list_models(State(state): State<Arc<AppState>>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        avatars: state.list_models_handler.handle(ListModels),
    })
}

/// GET /voices
pub async fn list_voices(State(state): State<Arc<AppState>>) -> Json<VoicesResponse> {
    Json(VoicesResponse {
        voices: state.list_voices_handler.handle(ListVoices),
    })
}
