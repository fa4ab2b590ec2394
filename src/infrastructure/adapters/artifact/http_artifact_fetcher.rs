//! HTTP Artifact Fetcher - 流式下载合成视频
//!
//! 实现 ArtifactFetcherPort trait，按块写入临时文件以限制内存占用

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

use crate::application::ports::{ArtifactError, ArtifactFetcherPort, TempArtifact};

/// 下载器配置
#[derive(Debug, Clone)]
pub struct HttpArtifactFetcherConfig {
    /// 临时文件目录，None 表示系统临时目录
    pub temp_dir: Option<PathBuf>,
    /// 单次下载超时（秒）
    pub timeout_secs: u64,
}

impl Default for HttpArtifactFetcherConfig {
    fn default() -> Self {
        Self {
            temp_dir: None,
            timeout_secs: 300,
        }
    }
}

pub struct HttpArtifactFetcher {
    client: Client,
    config: HttpArtifactFetcherConfig,
}

impl HttpArtifactFetcher {
    pub fn new(config: HttpArtifactFetcherConfig) -> Result<Self, ArtifactError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ArtifactError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn create_temp_file(&self) -> std::io::Result<tempfile::NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("avatar-").suffix(".mp4");
        match &self.config.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
    }
}

#[async_trait]
impl ArtifactFetcherPort for HttpArtifactFetcher {
    async fn fetch(&self, url: &str) -> Result<TempArtifact, ArtifactError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ArtifactError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArtifactError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let (std_file, path) = self
            .create_temp_file()
            .map_err(|e| ArtifactError::IoError(e.to_string()))?
            .into_parts();
        let mut file = tokio::fs::File::from_std(std_file);

        let mut size_bytes: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| ArtifactError::NetworkError(e.to_string()))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| ArtifactError::IoError(e.to_string()))?;
            size_bytes += chunk.len() as u64;
        }
        file.flush()
            .await
            .map_err(|e| ArtifactError::IoError(e.to_string()))?;

        tracing::debug!(
            url = %url,
            path = %path.display(),
            size_bytes,
            "Artifact downloaded"
        );

        Ok(TempArtifact::new(path, size_bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use tempfile::tempdir;

    fn fetcher_in(dir: &std::path::Path) -> HttpArtifactFetcher {
        HttpArtifactFetcher::new(HttpArtifactFetcherConfig {
            temp_dir: Some(dir.to_path_buf()),
            timeout_secs: 10,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_writes_temp_file() {
        let mut server = Server::new_async().await;
        let body = vec![7u8; 64 * 1024];
        server
            .mock("GET", "/results/video.mp4")
            .with_status(200)
            .with_body(body.clone())
            .create_async()
            .await;

        let temp_dir = tempdir().unwrap();
        let fetcher = fetcher_in(temp_dir.path());
        let artifact = fetcher
            .fetch(&format!("{}/results/video.mp4", server.url()))
            .await
            .unwrap();

        assert_eq!(artifact.size_bytes(), body.len() as u64);
        assert_eq!(artifact.path().extension().unwrap(), "mp4");
        assert!(artifact.path().starts_with(temp_dir.path()));
        assert_eq!(std::fs::read(artifact.path()).unwrap(), body);

        let path = artifact.path().to_path_buf();
        artifact.remove().unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/results/missing.mp4")
            .with_status(404)
            .create_async()
            .await;

        let temp_dir = tempdir().unwrap();
        let url = format!("{}/results/missing.mp4", server.url());
        let err = fetcher_in(temp_dir.path()).fetch(&url).await.unwrap_err();

        match err {
            ArtifactError::HttpStatus { status, url: failed } => {
                assert_eq!(status, 404);
                assert_eq!(failed, url);
            }
            other => panic!("expected http status error, got {:?}", other),
        }
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_dropped_artifact_is_removed() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/results/video.mp4")
            .with_status(200)
            .with_body("data")
            .create_async()
            .await;

        let temp_dir = tempdir().unwrap();
        let artifact = fetcher_in(temp_dir.path())
            .fetch(&format!("{}/results/video.mp4", server.url()))
            .await
            .unwrap();
        let path = artifact.path().to_path_buf();
        assert!(path.exists());

        drop(artifact);
        assert!(!path.exists());
    }
}
