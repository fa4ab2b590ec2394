//! avatar-relay - 文本转数字人视频中转服务
//!
//! 启动流程: 加载配置 -> 初始化日志 -> 构建适配器 -> 启动 HTTP 服务

use std::sync::Arc;

use avatar_relay::application::PollingPolicy;
use avatar_relay::config::{load_config, print_config, AppConfig};
use avatar_relay::infrastructure::adapters::{
    AzureAvatarClient, AzureAvatarClientConfig, CloudinaryClient, CloudinaryClientConfig,
    HttpArtifactFetcher, HttpArtifactFetcherConfig,
};
use avatar_relay::infrastructure::http::{AppState, HttpServer, ServerConfig};

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},avatar_relay={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 中的变量仅在未设置时生效
    dotenvy::dotenv().ok();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值），缺少凭据时拒绝启动
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("avatar-relay v{}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    let catalog = Arc::new(config.catalog.to_catalog());

    // Azure 数字人合成
    let azure_config = AzureAvatarClientConfig::new(
        config.azure.endpoint(),
        config.azure.speech_key.clone(),
    )
    .with_api_version(config.azure.api_version.clone())
    .with_timeout(config.azure.request_timeout_secs);
    let synthesizer = Arc::new(AzureAvatarClient::new(azure_config)?);

    // 合成结果下载
    let fetcher = Arc::new(HttpArtifactFetcher::new(HttpArtifactFetcherConfig {
        temp_dir: None,
        timeout_secs: config.azure.download_timeout_secs,
    })?);

    // Cloudinary 上传
    let mut cloudinary_config = CloudinaryClientConfig::new(
        config.cloudinary.cloud_name.clone(),
        config.cloudinary.api_key.clone(),
        config.cloudinary.api_secret.clone(),
    )
    .with_upload_url(config.cloudinary.upload_url.clone())
    .with_folder(config.cloudinary.folder.clone());
    cloudinary_config.timeout_secs = config.cloudinary.timeout_secs;
    let media_host = Arc::new(CloudinaryClient::new(cloudinary_config)?);

    let polling = PollingPolicy::from_secs(
        config.polling.timeout_secs,
        config.polling.interval_secs,
    );

    let state = AppState::new(
        config.auth.api_key.clone(),
        catalog,
        synthesizer,
        fetcher,
        media_host,
        polling,
    );

    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
