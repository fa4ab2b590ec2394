//! Cloudinary Client - 视频托管上传
//!
//! 实现 MediaHostPort trait
//!
//! 外部 API:
//! POST {upload_url}/{cloud_name}/video/upload  (multipart/form-data, 签名上传)
//! Response: {"secure_url": "...", "public_id": "..."}
//! 错误: {"error": {"message": "..."}}

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tokio_util::io::ReaderStream;

use crate::application::ports::{HostedMedia, MediaHostError, MediaHostPort};

/// 受限访问的交付类型
const DELIVERY_TYPE: &str = "authenticated";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    #[serde(default)]
    public_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadErrorResponse {
    error: UploadErrorBody,
}

#[derive(Debug, Deserialize)]
struct UploadErrorBody {
    message: String,
}

/// Cloudinary 客户端配置
#[derive(Debug, Clone)]
pub struct CloudinaryClientConfig {
    /// 上传 API 基础 URL
    pub upload_url: String,
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// 目标文件夹
    pub folder: String,
    /// 上传超时（秒）
    pub timeout_secs: u64,
}

impl CloudinaryClientConfig {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            upload_url: "https://api.cloudinary.com/v1_1".to_string(),
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            folder: "avatar_videos".to_string(),
            timeout_secs: 300,
        }
    }

    pub fn with_upload_url(mut self, upload_url: impl Into<String>) -> Self {
        self.upload_url = upload_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }
}

/// Cloudinary 客户端
pub struct CloudinaryClient {
    client: Client,
    config: CloudinaryClientConfig,
}

impl CloudinaryClient {
    pub fn new(config: CloudinaryClientConfig) -> Result<Self, MediaHostError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MediaHostError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn video_upload_url(&self) -> String {
        format!(
            "{}/{}/video/upload",
            self.config.upload_url, self.config.cloud_name
        )
    }

    /// 需要签名的上传参数（按键名排序）
    fn signed_params(&self, timestamp: i64) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("folder", self.config.folder.clone()),
            ("timestamp", timestamp.to_string()),
            ("type", DELIVERY_TYPE.to_string()),
        ])
    }

    /// 表单中的全部文本字段
    ///
    /// 除 api_key 与 signature 外的字段都必须参与签名，否则服务端校验失败
    fn form_fields(&self, timestamp: i64) -> Vec<(&'static str, String)> {
        let params = self.signed_params(timestamp);
        let signature = sign_params(&params, &self.config.api_secret);

        let mut fields = vec![
            ("api_key", self.config.api_key.clone()),
            ("signature", signature),
        ];
        fields.extend(params);
        fields
    }
}

/// 计算上传签名: sha256("k1=v1&k2=v2..." + api_secret)
///
/// 账户的签名算法需设置为 SHA-256
pub fn sign_params(params: &BTreeMap<&str, String>, api_secret: &str) -> String {
    let to_sign = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl MediaHostPort for CloudinaryClient {
    async fn upload_video(&self, path: &Path) -> Result<HostedMedia, MediaHostError> {
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|e| MediaHostError::IoError(e.to_string()))?;
        let file_len = file
            .metadata()
            .await
            .map_err(|e| MediaHostError::IoError(e.to_string()))?
            .len();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("video.mp4")
            .to_string();

        let part = Part::stream_with_length(Body::wrap_stream(ReaderStream::new(file)), file_len)
            .file_name(file_name)
            .mime_str("video/mp4")
            .map_err(|e| MediaHostError::InvalidResponse(e.to_string()))?;

        let form = self
            .form_fields(Utc::now().timestamp())
            .into_iter()
            .fold(Form::new(), |form, (key, value)| form.text(key, value))
            .part("file", part);

        tracing::debug!(
            url = %self.video_upload_url(),
            folder = %self.config.folder,
            size_bytes = file_len,
            "Uploading video"
        );

        let response = self
            .client
            .post(self.video_upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaHostError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MediaHostError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<UploadErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(MediaHostError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let uploaded: UploadResponse = serde_json::from_str(&body)
            .map_err(|e| MediaHostError::InvalidResponse(e.to_string()))?;

        tracing::info!(
            public_id = ?uploaded.public_id,
            secure_url = %uploaded.secure_url,
            "Video uploaded"
        );

        Ok(HostedMedia {
            secure_url: uploaded.secure_url,
            public_id: uploaded.public_id,
        })
    }
}
