//! Artifact Fetcher Port - 合成产物下载抽象

use async_trait::async_trait;
use std::io;
use std::path::Path;
use tempfile::TempPath;
use thiserror::Error;

/// 下载错误
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("HTTP {status} while downloading {url}")]
    HttpStatus { status: u16, url: String },

    #[error("IO error: {0}")]
    IoError(String),
}

/// 下载到本地的临时文件
///
/// 不变量:
/// - 文件在 drop 时删除，失败路径同样会清理
#[derive(Debug)]
pub struct TempArtifact {
    path: TempPath,
    size_bytes: u64,
}

impl TempArtifact {
    pub fn new(path: TempPath, size_bytes: u64) -> Self {
        Self { path, size_bytes }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// 立即删除文件，并返回删除结果
    pub fn remove(self) -> io::Result<()> {
        self.path.close()
    }
}

/// Artifact Fetcher Port
#[async_trait]
pub trait ArtifactFetcherPort: Send + Sync {
    /// 以流式方式把远程资源写入唯一命名的临时文件
    async fn fetch(&self, url: &str) -> Result<TempArtifact, ArtifactError>;
}
