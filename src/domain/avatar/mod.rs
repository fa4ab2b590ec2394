//! Avatar Context - 数字人视频限界上下文
//!
//! 职责:
//! - 角色 / 风格 / 音色目录
//! - 生成请求校验
//! - 合成任务状态

mod catalog;
mod errors;
mod job;
mod request;

pub use catalog::{AvatarCatalog, AvatarStyles, VoiceGroups};
pub use errors::{JobError, ValidationError};
pub use job::{AvatarJob, JobProgress, JobStatus};
pub use request::{
    GenerationDraft, GenerationRequest, DEFAULT_CHARACTER, DEFAULT_STYLE, DEFAULT_VOICE,
};
