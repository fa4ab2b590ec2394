//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（AvatarSynthesizer、ArtifactFetcher、MediaHost）
//! - commands: 生成命令及编排处理器
//! - queries: 目录查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{GenerateAvatarHandler, PollingPolicy},
    GenerateAvatar, GenerateAvatarResponse,
};

pub use error::GenerationError;

pub use ports::{
    // Artifact fetcher
    ArtifactError,
    ArtifactFetcherPort,
    TempArtifact,
    // Avatar synthesizer
    AvatarSynthesizerPort,
    JobStatusReport,
    SynthesisError,
    // Media host
    HostedMedia,
    MediaHostError,
    MediaHostPort,
};

pub use queries::{
    handlers::{ListModelsHandler, ListVoicesHandler},
    ListModels, ListVoices,
};
