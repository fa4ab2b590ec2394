//! Avatar Synthesizer Port - 数字人视频合成服务抽象
//!
//! 定义异步批量合成任务的提交与状态查询接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::avatar::{GenerationRequest, JobStatus};

/// 合成服务错误
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Network error: {0}")]
    NetworkError(String),

    /// 服务端返回 4xx / 5xx
    #[error("HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 一次状态查询的结果
#[derive(Debug, Clone)]
pub struct JobStatusReport {
    pub status: JobStatus,
    /// outputs.result
    pub result_url: Option<String>,
    /// 服务端原始响应体
    pub payload: serde_json::Value,
}

/// Avatar Synthesizer Port
#[async_trait]
pub trait AvatarSynthesizerPort: Send + Sync {
    /// 以指定 job_id 创建合成任务
    async fn submit_job(
        &self,
        job_id: Uuid,
        request: &GenerationRequest,
    ) -> Result<(), SynthesisError>;

    /// 查询任务状态
    async fn job_status(&self, job_id: Uuid) -> Result<JobStatusReport, SynthesisError>;
}
