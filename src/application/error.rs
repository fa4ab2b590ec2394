//! 应用层错误定义
//!
//! 生成流程各阶段的错误分类

use thiserror::Error;
use uuid::Uuid;

use crate::domain::avatar::ValidationError;

/// 生成流程错误
#[derive(Debug, Error)]
pub enum GenerationError {
    /// 客户端输入无效
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// 合成服务拒绝任务创建或状态查询
    #[error("{0}")]
    Submission(String),

    /// 合成服务报告任务失败（携带完整响应体）
    #[error("Avatar job failed: {0}")]
    JobFailed(String),

    /// 轮询超出时间预算
    #[error("Avatar job {job_id} did not finish within {timeout_secs}s")]
    Timeout { job_id: Uuid, timeout_secs: u64 },

    /// 服务端响应违反约定（如成功但无结果 URL）
    #[error("{0}")]
    Invariant(String),

    #[error("Video download failed: {0}")]
    Download(String),

    #[error("Video upload failed: {0}")]
    Upload(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl GenerationError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}
