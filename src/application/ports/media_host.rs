//! Media Host Port - 媒体托管服务抽象

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaHostError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Upload rejected [{status}]: {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 上传完成后的托管资源
#[derive(Debug, Clone)]
pub struct HostedMedia {
    pub secure_url: String,
    pub public_id: Option<String>,
}

/// Media Host Port
#[async_trait]
pub trait MediaHostPort: Send + Sync {
    /// 以受限访问的视频资源上传本地文件
    async fn upload_video(&self, path: &Path) -> Result<HostedMedia, MediaHostError>;
}
