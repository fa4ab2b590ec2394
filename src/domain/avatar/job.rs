//! Avatar Context - Synthesis Job

use uuid::Uuid;

use super::errors::JobError;

/// 任务状态
///
/// 迁移: Pending -> Succeeded | Failed，两个终态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Succeeded,
    Failed,
}

impl JobStatus {
    /// 解析合成服务返回的状态字符串
    ///
    /// NotStarted / Running 以及未知值都视为 Pending
    pub fn from_provider(status: &str) -> Self {
        match status {
            "Succeeded" => Self::Succeeded,
            "Failed" => Self::Failed,
            _ => Self::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// 一次推进后的结果，成功时携带结果 URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobProgress {
    Pending,
    Succeeded(String),
    Failed,
}

/// 单次请求内的合成任务（仅存在于内存）
///
/// 不变量: 只有携带非空结果 URL 的报告才能进入 Succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarJob {
    job_id: Uuid,
    status: JobStatus,
}

impl AvatarJob {
    pub fn pending(job_id: Uuid) -> Self {
        Self {
            job_id,
            status: JobStatus::Pending,
        }
    }

    /// 根据服务端报告推进状态
    pub fn advance(
        &mut self,
        status: JobStatus,
        result_url: Option<String>,
    ) -> Result<JobProgress, JobError> {
        if self.status.is_terminal() {
            return Err(JobError::AlreadyTerminal(self.job_id));
        }

        match status {
            JobStatus::Pending => Ok(JobProgress::Pending),
            JobStatus::Succeeded => {
                let url = result_url
                    .filter(|u| !u.is_empty())
                    .ok_or(JobError::MissingResultUrl(self.job_id))?;
                self.status = JobStatus::Succeeded;
                Ok(JobProgress::Succeeded(url))
            }
            JobStatus::Failed => {
                self.status = JobStatus::Failed;
                Ok(JobProgress::Failed)
            }
        }
    }

    #[cfg(test)]
    pub fn status(&self) -> JobStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_status_mapping() {
        assert_eq!(JobStatus::from_provider("NotStarted"), JobStatus::Pending);
        assert_eq!(JobStatus::from_provider("Running"), JobStatus::Pending);
        assert_eq!(JobStatus::from_provider("Succeeded"), JobStatus::Succeeded);
        assert_eq!(JobStatus::from_provider("Failed"), JobStatus::Failed);
    }

    #[test]
    fn test_succeeded_requires_result_url() {
        let job_id = Uuid::new_v4();
        let mut job = AvatarJob::pending(job_id);
        let err = job.advance(JobStatus::Succeeded, None).unwrap_err();
        assert_eq!(err, JobError::MissingResultUrl(job_id));
        assert_eq!(job.status(), JobStatus::Pending);
    }

    #[test]
    fn test_pending_then_succeeded() {
        let mut job = AvatarJob::pending(Uuid::new_v4());
        assert_eq!(job.advance(JobStatus::Pending, None), Ok(JobProgress::Pending));
        assert_eq!(
            job.advance(JobStatus::Succeeded, Some("https://x/video.mp4".into())),
            Ok(JobProgress::Succeeded("https://x/video.mp4".to_string()))
        );
        assert_eq!(job.status(), JobStatus::Succeeded);
    }

    #[test]
    fn test_terminal_state_is_final() {
        let job_id = Uuid::new_v4();
        let mut job = AvatarJob::pending(job_id);
        assert_eq!(job.advance(JobStatus::Failed, None), Ok(JobProgress::Failed));
        assert_eq!(
            job.advance(JobStatus::Succeeded, Some("u".into())),
            Err(JobError::AlreadyTerminal(job_id))
        );
    }
}
