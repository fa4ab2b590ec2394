//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 兼容的扁平环境变量（API_KEY、AZURE_SPEECH_KEY 等）
//! 2. 前缀环境变量（AVATAR_RELAY_*）
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::domain::avatar::{DEFAULT_CHARACTER, DEFAULT_STYLE, DEFAULT_VOICE};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 扁平环境变量名 -> 配置键
const LEGACY_ENV_VARS: &[(&str, &str)] = &[
    ("API_KEY", "auth.api_key"),
    ("AZURE_SPEECH_KEY", "azure.speech_key"),
    ("AZURE_AVATAR_ENDPOINT", "azure.endpoint"),
    ("CLOUDINARY_CLOUD_NAME", "cloudinary.cloud_name"),
    ("CLOUDINARY_API_KEY", "cloudinary.api_key"),
    ("CLOUDINARY_API_SECRET", "cloudinary.api_secret"),
];

/// 加载应用配置
///
/// # 环境变量示例
/// - `AVATAR_RELAY_SERVER__PORT=3300`
/// - `AVATAR_RELAY_AZURE__ENDPOINT=https://westeurope.api.cognitive.microsoft.com`
/// - `AVATAR_RELAY_POLLING__TIMEOUT_SECS=900`
/// - `AZURE_SPEECH_KEY=...`（扁平写法同样生效）
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    build_config(config_path, |name| std::env::var(name).ok())
}

fn build_config<F>(config_path: Option<&Path>, env_lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3300)?
        .set_default("azure.api_version", "2024-08-01")?
        .set_default("azure.request_timeout_secs", 60)?
        .set_default("azure.download_timeout_secs", 300)?
        .set_default("cloudinary.upload_url", "https://api.cloudinary.com/v1_1")?
        .set_default("cloudinary.folder", "avatar_videos")?
        .set_default("cloudinary.timeout_secs", 300)?
        .set_default("polling.timeout_secs", 600)?
        .set_default("polling.interval_secs", 5)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 前缀环境变量，层级分隔符 __
    // 例如: AVATAR_RELAY_AZURE__SPEECH_KEY=xxx
    builder = builder.add_source(
        Environment::with_prefix("AVATAR_RELAY")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 扁平环境变量
    builder = apply_legacy_env(builder, &env_lookup)?;

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

fn apply_legacy_env<F>(
    mut builder: ConfigBuilder<DefaultState>,
    env_lookup: &F,
) -> Result<ConfigBuilder<DefaultState>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    for (var, key) in LEGACY_ENV_VARS {
        let value = env_lookup(var).filter(|v| !v.is_empty());
        builder = builder.set_override_option(*key, value)?;
    }
    Ok(builder)
}

/// 验证配置有效性
///
/// 任一凭据缺失都会拒绝启动
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let required = [
        ("auth.api_key", "API_KEY", &config.auth.api_key),
        ("azure.speech_key", "AZURE_SPEECH_KEY", &config.azure.speech_key),
        ("azure.endpoint", "AZURE_AVATAR_ENDPOINT", &config.azure.endpoint),
        ("cloudinary.cloud_name", "CLOUDINARY_CLOUD_NAME", &config.cloudinary.cloud_name),
        ("cloudinary.api_key", "CLOUDINARY_API_KEY", &config.cloudinary.api_key),
        ("cloudinary.api_secret", "CLOUDINARY_API_SECRET", &config.cloudinary.api_secret),
    ];

    let missing: Vec<String> = required
        .iter()
        .filter(|(_, _, value)| value.trim().is_empty())
        .map(|(key, var, _)| format!("{} ({})", key, var))
        .collect();
    if !missing.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "Missing required settings: {}",
            missing.join(", ")
        )));
    }

    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.polling.interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Polling interval cannot be 0".to_string(),
        ));
    }

    if config.polling.interval_secs > config.polling.timeout_secs {
        return Err(ConfigError::ValidationError(
            "Polling interval cannot exceed polling timeout".to_string(),
        ));
    }

    let catalog = config.catalog.to_catalog();
    if catalog.is_empty() {
        return Err(ConfigError::ValidationError(
            "Catalog must contain at least one avatar and one voice".to_string(),
        ));
    }
    if !catalog.has_voice(DEFAULT_VOICE) {
        return Err(ConfigError::ValidationError(format!(
            "Catalog must contain default voice '{}'",
            DEFAULT_VOICE
        )));
    }
    let default_style_known = catalog
        .styles_for(DEFAULT_CHARACTER)
        .is_some_and(|styles| styles.iter().any(|s| s == DEFAULT_STYLE));
    if !default_style_known {
        return Err(ConfigError::ValidationError(format!(
            "Catalog must contain default avatar '{}' with style '{}'",
            DEFAULT_CHARACTER, DEFAULT_STYLE
        )));
    }

    Ok(())
}

/// 密钥只显示前两位
fn mask(secret: &str) -> String {
    let prefix: String = secret.chars().take(2).collect();
    format!("{}***", prefix)
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("API Key: {}", mask(&config.auth.api_key));
    tracing::info!("Azure Endpoint: {}", config.azure.endpoint());
    tracing::info!("Azure API Version: {}", config.azure.api_version);
    tracing::info!("Azure Speech Key: {}", mask(&config.azure.speech_key));
    tracing::info!("Cloudinary Cloud: {}", config.cloudinary.cloud_name);
    tracing::info!("Cloudinary Folder: {}", config.cloudinary.folder);
    tracing::info!(
        "Polling: timeout {}s, interval {}s",
        config.polling.timeout_secs,
        config.polling.interval_secs
    );
    tracing::info!(
        "Catalog: {} avatars, {} voice groups",
        config.catalog.avatars.len(),
        config.catalog.voices.len()
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
