//! Avatar Context - Errors

use thiserror::Error;
use uuid::Uuid;

/// 请求校验错误（客户端输入问题，不会触发任何外部调用）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing 'text' field")]
    MissingText,

    #[error("Invalid voice '{voice}'. Valid: {valid:?}. See GET /voices for options.")]
    InvalidVoice { voice: String, valid: Vec<String> },

    #[error("Invalid character '{0}'. See GET /models for options.")]
    InvalidCharacter(String),

    #[error("Invalid style '{style}' for character '{character}'. Valid: {valid:?}")]
    InvalidStyle {
        style: String,
        character: String,
        valid: Vec<String>,
    },
}

/// 任务状态迁移错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    #[error("Job succeeded but no result URL found")]
    MissingResultUrl(Uuid),

    #[error("Job {0} already reached a terminal state")]
    AlreadyTerminal(Uuid),
}
