//! avatar-relay - 文本转数字人视频中转服务
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Avatar Context: 目录、请求校验、合成任务状态
//!
//! 应用层 (application/):
//! - Ports: AvatarSynthesizer, ArtifactFetcher, MediaHost
//! - Commands: GenerateAvatar 编排（提交 -> 轮询 -> 下载 -> 转存 -> 清理）
//! - Queries: 目录查询
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Adapters: Azure 数字人客户端、视频下载、Cloudinary 上传

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{load_config, AppConfig};
