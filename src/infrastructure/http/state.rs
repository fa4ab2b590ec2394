//! Application State
//!
//! 启动时构建一次，所有请求只读共享

use std::sync::Arc;

use crate::application::{
    // Command handlers
    GenerateAvatarHandler, PollingPolicy,
    // Query handlers
    ListModelsHandler, ListVoicesHandler,
    // Ports
    ArtifactFetcherPort, AvatarSynthesizerPort, MediaHostPort,
};
use crate::domain::avatar::AvatarCatalog;

/// 应用状态
pub struct AppState {
    /// 客户端必须提供的共享密钥
    pub api_key: String,

    // ========== Command Handlers ==========
    pub generate_avatar_handler: GenerateAvatarHandler,

    // ========== Query Handlers ==========
    pub list_models_handler: ListModelsHandler,
    pub list_voices_handler: ListVoicesHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        api_key: impl Into<String>,
        catalog: Arc<AvatarCatalog>,
        synthesizer: Arc<dyn AvatarSynthesizerPort>,
        fetcher: Arc<dyn ArtifactFetcherPort>,
        media_host: Arc<dyn MediaHostPort>,
        polling: PollingPolicy,
    ) -> Self {
        Self {
            api_key: api_key.into(),

            generate_avatar_handler: GenerateAvatarHandler::new(
                catalog.clone(),
                synthesizer,
                fetcher,
                media_host,
                polling,
            ),

            list_models_handler: ListModelsHandler::new(catalog.clone()),
            list_voices_handler: ListVoicesHandler::new(catalog),
        }
    }

    /// 校验客户端提供的 API key
    pub fn is_authorized(&self, provided: Option<&str>) -> bool {
        provided.is_some_and(|key| key == self.api_key)
    }
}
