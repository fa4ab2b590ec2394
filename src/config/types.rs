//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::domain::avatar::{AvatarCatalog, AvatarStyles, VoiceGroups};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 客户端认证
    #[serde(default)]
    pub auth: AuthConfig,

    /// Azure 数字人合成服务
    #[serde(default)]
    pub azure: AzureConfig,

    /// Cloudinary 媒体托管
    #[serde(default)]
    pub cloudinary: CloudinaryConfig,

    /// 任务轮询
    #[serde(default)]
    pub polling: PollingConfig,

    /// 头像 / 音色目录
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3300
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 客户端认证配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// 客户端需通过 X-API-Key 或请求体 key 字段提供
    #[serde(default)]
    pub api_key: String,
}

/// Azure Speech 配置
#[derive(Debug, Clone, Deserialize)]
pub struct AzureConfig {
    /// 订阅密钥
    #[serde(default)]
    pub speech_key: String,

    /// 服务端点，例如 https://westeurope.api.cognitive.microsoft.com
    #[serde(default)]
    pub endpoint: String,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// 单次 HTTP 请求超时（秒）
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// 合成结果下载超时（秒）
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,
}

fn default_api_version() -> String {
    "2024-08-01".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

fn default_download_timeout() -> u64 {
    300
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            speech_key: String::new(),
            endpoint: String::new(),
            api_version: default_api_version(),
            request_timeout_secs: default_request_timeout(),
            download_timeout_secs: default_download_timeout(),
        }
    }
}

impl AzureConfig {
    /// 去除末尾 '/' 的端点
    pub fn endpoint(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }
}

/// Cloudinary 配置
#[derive(Debug, Clone, Deserialize)]
pub struct CloudinaryConfig {
    #[serde(default)]
    pub cloud_name: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default)]
    pub api_secret: String,

    /// 上传 API 基础 URL
    #[serde(default = "default_upload_url")]
    pub upload_url: String,

    /// 视频存放目录
    #[serde(default = "default_folder")]
    pub folder: String,

    /// 上传超时（秒）
    #[serde(default = "default_transfer_timeout")]
    pub timeout_secs: u64,
}

fn default_upload_url() -> String {
    "https://api.cloudinary.com/v1_1".to_string()
}

fn default_folder() -> String {
    "avatar_videos".to_string()
}

fn default_transfer_timeout() -> u64 {
    300
}

impl Default for CloudinaryConfig {
    fn default() -> Self {
        Self {
            cloud_name: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            upload_url: default_upload_url(),
            folder: default_folder(),
            timeout_secs: default_transfer_timeout(),
        }
    }
}

/// 轮询配置
#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    /// 总超时（秒）
    #[serde(default = "default_poll_timeout")]
    pub timeout_secs: u64,

    /// 查询间隔（秒）
    #[serde(default = "default_poll_interval")]
    pub interval_secs: u64,
}

fn default_poll_timeout() -> u64 {
    600 // 10 分钟
}

fn default_poll_interval() -> u64 {
    5
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_poll_timeout(),
            interval_secs: default_poll_interval(),
        }
    }
}

/// 目录配置，缺省时使用内置目录
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "AvatarCatalog::builtin_avatars")]
    pub avatars: AvatarStyles,

    #[serde(default = "AvatarCatalog::builtin_voices")]
    pub voices: VoiceGroups,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            avatars: AvatarCatalog::builtin_avatars(),
            voices: AvatarCatalog::builtin_voices(),
        }
    }
}

impl CatalogConfig {
    pub fn to_catalog(&self) -> AvatarCatalog {
        AvatarCatalog::new(self.avatars.clone(), self.voices.clone())
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3300);
        assert_eq!(config.azure.api_version, "2024-08-01");
        assert_eq!(config.cloudinary.folder, "avatar_videos");
        assert_eq!(config.polling.timeout_secs, 600);
        assert_eq!(config.polling.interval_secs, 5);
        assert!(config.auth.api_key.is_empty());
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:3300");
    }

    #[test]
    fn test_azure_endpoint_trims_slash() {
        let config = AzureConfig {
            endpoint: "https://eastus.api.cognitive.microsoft.com/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.endpoint(), "https://eastus.api.cognitive.microsoft.com");
    }

    #[test]
    fn test_default_catalog_is_builtin() {
        assert_eq!(CatalogConfig::default().to_catalog(), AvatarCatalog::builtin());
    }
}
