//! GenerateAvatar Command Handler
//!
//! 单个请求的完整编排:
//! validate -> submit_job -> poll_until_done -> fetch_artifact -> relocate_artifact -> cleanup
//!
//! 各步骤顺序执行，不做重试；只有轮询会在任务未完成时重复查询状态

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use uuid::Uuid;

use crate::application::commands::{GenerateAvatar, GenerateAvatarResponse};
use crate::application::error::GenerationError;
use crate::application::ports::{
    ArtifactError, ArtifactFetcherPort, AvatarSynthesizerPort, MediaHostError, MediaHostPort,
    SynthesisError, TempArtifact,
};
use crate::domain::avatar::{AvatarCatalog, AvatarJob, GenerationRequest, JobProgress};

/// 轮询策略：固定间隔，无退避，无抖动
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingPolicy {
    pub timeout: Duration,
    pub interval: Duration,
}

impl PollingPolicy {
    pub fn from_secs(timeout_secs: u64, interval_secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
            interval: Duration::from_secs(interval_secs),
        }
    }
}

impl Default for PollingPolicy {
    fn default() -> Self {
        Self::from_secs(600, 5)
    }
}

/// GenerateAvatar Handler
pub struct GenerateAvatarHandler {
    catalog: Arc<AvatarCatalog>,
    synthesizer: Arc<dyn AvatarSynthesizerPort>,
    fetcher: Arc<dyn ArtifactFetcherPort>,
    media_host: Arc<dyn MediaHostPort>,
    polling: PollingPolicy,
}

impl GenerateAvatarHandler {
    pub fn new(
        catalog: Arc<AvatarCatalog>,
        synthesizer: Arc<dyn AvatarSynthesizerPort>,
        fetcher: Arc<dyn ArtifactFetcherPort>,
        media_host: Arc<dyn MediaHostPort>,
        polling: PollingPolicy,
    ) -> Self {
        Self {
            catalog,
            synthesizer,
            fetcher,
            media_host,
            polling,
        }
    }

    pub async fn handle(
        &self,
        command: GenerateAvatar,
    ) -> Result<GenerateAvatarResponse, GenerationError> {
        let request = self.validate(command)?;
        let job_id = self.submit_job(&request).await?;
        let result_url = self.poll_until_done(job_id).await?;
        let artifact = self.fetch_artifact(&result_url).await?;
        let video_url = self.relocate_artifact(&artifact).await?;
        self.cleanup(artifact);

        tracing::info!(
            job_id = %job_id,
            video_url = %video_url,
            "Avatar video generated"
        );

        Ok(GenerateAvatarResponse { job_id, video_url })
    }

    /// 校验输入，失败时不会发起任何外部调用
    pub fn validate(&self, command: GenerateAvatar) -> Result<GenerationRequest, GenerationError> {
        Ok(GenerationRequest::validate(command.into(), &self.catalog)?)
    }

    /// 以新生成的 job_id 提交合成任务
    pub async fn submit_job(&self, request: &GenerationRequest) -> Result<Uuid, GenerationError> {
        let job_id = Uuid::new_v4();

        self.synthesizer
            .submit_job(job_id, request)
            .await
            .map_err(|e| match e {
                SynthesisError::Rejected { status, body } => GenerationError::Submission(
                    format!("Azure job creation failed [{}]: {}", status, body),
                ),
                other => GenerationError::unexpected(other.to_string()),
            })?;

        tracing::info!(
            job_id = %job_id,
            character = %request.character(),
            style = %request.style(),
            voice = %request.voice(),
            text_len = request.text().len(),
            "Avatar job submitted"
        );

        Ok(job_id)
    }

    /// 按固定间隔轮询直到任务进入终态或超过截止时间
    pub async fn poll_until_done(&self, job_id: Uuid) -> Result<String, GenerationError> {
        let mut job = AvatarJob::pending(job_id);
        let deadline = Instant::now() + self.polling.timeout;
        let mut polls: u32 = 0;

        while Instant::now() < deadline {
            let report = self
                .synthesizer
                .job_status(job_id)
                .await
                .map_err(|e| match e {
                    SynthesisError::Rejected { status, body } => GenerationError::Submission(
                        format!("Azure job status query failed [{}]: {}", status, body),
                    ),
                    other => GenerationError::unexpected(other.to_string()),
                })?;
            polls += 1;

            tracing::debug!(
                job_id = %job_id,
                poll = polls,
                status = report.status.as_str(),
                "Polled avatar job"
            );

            let progress = job
                .advance(report.status, report.result_url)
                .map_err(|e| GenerationError::Invariant(e.to_string()))?;

            match progress {
                JobProgress::Succeeded(url) => return Ok(url),
                JobProgress::Failed => {
                    let body = serde_json::to_string_pretty(&report.payload)
                        .unwrap_or_else(|_| report.payload.to_string());
                    tracing::warn!(job_id = %job_id, polls, "Avatar job failed");
                    return Err(GenerationError::JobFailed(body));
                }
                JobProgress::Pending => sleep(self.polling.interval).await,
            }
        }

        tracing::warn!(
            job_id = %job_id,
            polls,
            timeout_secs = self.polling.timeout.as_secs(),
            "Avatar job timed out"
        );

        Err(GenerationError::Timeout {
            job_id,
            timeout_secs: self.polling.timeout.as_secs(),
        })
    }

    /// 下载合成结果到临时文件
    pub async fn fetch_artifact(&self, url: &str) -> Result<TempArtifact, GenerationError> {
        let artifact = self.fetcher.fetch(url).await.map_err(|e| match e {
            ArtifactError::HttpStatus { .. } => GenerationError::Download(e.to_string()),
            other => GenerationError::unexpected(other.to_string()),
        })?;

        tracing::debug!(
            path = %artifact.path().display(),
            size_bytes = artifact.size_bytes(),
            "Avatar video downloaded"
        );

        Ok(artifact)
    }

    /// 上传到媒体托管服务，返回安全 URL
    pub async fn relocate_artifact(
        &self,
        artifact: &TempArtifact,
    ) -> Result<String, GenerationError> {
        let hosted = self
            .media_host
            .upload_video(artifact.path())
            .await
            .map_err(|e| match e {
                MediaHostError::IoError(msg) => GenerationError::unexpected(msg),
                other => GenerationError::Upload(other.to_string()),
            })?;

        tracing::debug!(
            public_id = ?hosted.public_id,
            "Avatar video uploaded"
        );

        Ok(hosted.secure_url)
    }

    /// 删除临时文件
    ///
    /// 失败路径上 TempArtifact 被 drop 时同样会删除文件
    pub fn cleanup(&self, artifact: TempArtifact) {
        let path = artifact.path().to_path_buf();
        if let Err(e) = artifact.remove() {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove temp video");
        }
    }
}
