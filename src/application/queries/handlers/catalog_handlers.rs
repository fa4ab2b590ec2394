//! Catalog Query Handlers

use std::sync::Arc;

use crate::application::queries::{ListModels, ListVoices};
use crate::domain::avatar::{AvatarCatalog, AvatarStyles, VoiceGroups};

/// ListModels Handler
pub struct ListModelsHandler {
    catalog: Arc<AvatarCatalog>,
}

impl ListModelsHandler {
    pub fn new(catalog: Arc<AvatarCatalog>) -> Self {
        Self { catalog }
    }

    pub fn handle(&self, _query: ListModels) -> AvatarStyles {
        self.catalog.avatars().clone()
    }
}

/// ListVoices Handler
pub struct ListVoicesHandler {
    catalog: Arc<AvatarCatalog>,
}

impl ListVoicesHandler {
    pub fn new(catalog: Arc<AvatarCatalog>) -> Self {
        Self { catalog }
    }

    pub fn handle(&self, _query: ListVoices) -> VoiceGroups {
        self.catalog.voices().clone()
    }
}
