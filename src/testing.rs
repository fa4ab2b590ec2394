//! 测试用的端口替身

use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::application::ports::{
    ArtifactError, ArtifactFetcherPort, AvatarSynthesizerPort, HostedMedia, JobStatusReport,
    MediaHostError, MediaHostPort, SynthesisError, TempArtifact,
};
use crate::application::{GenerateAvatarHandler, PollingPolicy};
use crate::domain::avatar::{AvatarCatalog, GenerationRequest, JobStatus};

pub fn pending() -> JobStatusReport {
    JobStatusReport {
        status: JobStatus::Pending,
        result_url: None,
        payload: serde_json::json!({ "status": "Running" }),
    }
}

pub fn succeeded(url: &str) -> JobStatusReport {
    JobStatusReport {
        status: JobStatus::Succeeded,
        result_url: Some(url.to_string()),
        payload: serde_json::json!({ "status": "Succeeded", "outputs": { "result": url } }),
    }
}

pub fn failed(payload: serde_json::Value) -> JobStatusReport {
    JobStatusReport {
        status: JobStatus::Failed,
        result_url: None,
        payload,
    }
}

/// 按脚本返回状态的合成服务；脚本耗尽后一直返回 Pending
#[derive(Default)]
pub struct ScriptedSynthesizer {
    reject: Option<(u16, String)>,
    reject_status: Option<(u16, String)>,
    unreachable: bool,
    reports: Mutex<VecDeque<JobStatusReport>>,
    pub submitted: Mutex<Vec<(Uuid, GenerationRequest)>>,
    pub polls: AtomicUsize,
}

impl ScriptedSynthesizer {
    pub fn new(reports: Vec<JobStatusReport>) -> Self {
        Self {
            reports: Mutex::new(reports.into()),
            ..Default::default()
        }
    }

    pub fn rejecting(status: u16, body: &str) -> Self {
        Self {
            reject: Some((status, body.to_string())),
            ..Default::default()
        }
    }

    /// 创建成功，但状态查询返回非 2xx
    pub fn rejecting_status(status: u16, body: &str) -> Self {
        Self {
            reject_status: Some((status, body.to_string())),
            ..Default::default()
        }
    }

    /// 连接失败
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Default::default()
        }
    }

    pub fn submit_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub fn poll_count(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AvatarSynthesizerPort for ScriptedSynthesizer {
    async fn submit_job(
        &self,
        job_id: Uuid,
        request: &GenerationRequest,
    ) -> Result<(), SynthesisError> {
        if self.unreachable {
            return Err(SynthesisError::NetworkError(
                "Cannot connect to avatar service: connection refused".to_string(),
            ));
        }
        if let Some((status, body)) = &self.reject {
            return Err(SynthesisError::Rejected {
                status: *status,
                body: body.clone(),
            });
        }
        self.submitted
            .lock()
            .unwrap()
            .push((job_id, request.clone()));
        Ok(())
    }

    async fn job_status(&self, _job_id: Uuid) -> Result<JobStatusReport, SynthesisError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        if let Some((status, body)) = &self.reject_status {
            return Err(SynthesisError::Rejected {
                status: *status,
                body: body.clone(),
            });
        }
        Ok(self
            .reports
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(pending))
    }
}

/// 把固定字节写入临时文件的下载器
#[derive(Default)]
pub struct FakeFetcher {
    status: Option<u16>,
    pub last_path: Mutex<Option<PathBuf>>,
}

impl FakeFetcher {
    pub fn failing(status: u16) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn last_path(&self) -> Option<PathBuf> {
        self.last_path.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArtifactFetcherPort for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<TempArtifact, ArtifactError> {
        if let Some(status) = self.status {
            return Err(ArtifactError::HttpStatus {
                status,
                url: url.to_string(),
            });
        }

        let mut file = tempfile::Builder::new()
            .suffix(".mp4")
            .tempfile()
            .map_err(|e| ArtifactError::IoError(e.to_string()))?;
        file.write_all(b"fake mp4 data")
            .map_err(|e| ArtifactError::IoError(e.to_string()))?;
        let path = file.into_temp_path();
        *self.last_path.lock().unwrap() = Some(path.to_path_buf());
        Ok(TempArtifact::new(path, 13))
    }
}

/// 记录上传路径的托管服务
pub struct FakeMediaHost {
    secure_url: String,
    fail: bool,
    pub uploads: Mutex<Vec<(PathBuf, bool)>>,
}

impl FakeMediaHost {
    pub fn new(secure_url: &str) -> Self {
        Self {
            secure_url: secure_url.to_string(),
            fail: false,
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new("")
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl MediaHostPort for FakeMediaHost {
    async fn upload_video(&self, path: &Path) -> Result<HostedMedia, MediaHostError> {
        self.uploads
            .lock()
            .unwrap()
            .push((path.to_path_buf(), path.exists()));
        if self.fail {
            return Err(MediaHostError::Rejected {
                status: 401,
                message: "Invalid Signature".to_string(),
            });
        }
        Ok(HostedMedia {
            secure_url: self.secure_url.clone(),
            public_id: Some("avatar_videos/fake".to_string()),
        })
    }
}

pub struct Fixture {
    pub synthesizer: Arc<ScriptedSynthesizer>,
    pub fetcher: Arc<FakeFetcher>,
    pub media_host: Arc<FakeMediaHost>,
}

impl Fixture {
    pub fn new(
        synthesizer: ScriptedSynthesizer,
        fetcher: FakeFetcher,
        media_host: FakeMediaHost,
    ) -> Self {
        Self {
            synthesizer: Arc::new(synthesizer),
            fetcher: Arc::new(fetcher),
            media_host: Arc::new(media_host),
        }
    }

    pub fn succeeding() -> Self {
        Self::new(
            ScriptedSynthesizer::new(vec![succeeded("https://azure.example.com/result.mp4")]),
            FakeFetcher::default(),
            FakeMediaHost::new("https://res.cloudinary.com/demo/video/authenticated/v1/a.mp4"),
        )
    }

    pub fn handler(&self, polling: PollingPolicy) -> GenerateAvatarHandler {
        GenerateAvatarHandler::new(
            Arc::new(AvatarCatalog::builtin()),
            self.synthesizer.clone(),
            self.fetcher.clone(),
            self.media_host.clone(),
            polling,
        )
    }
}
