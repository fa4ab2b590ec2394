//! Azure Avatar Client - 调用 Azure Speech 批量数字人合成服务
//!
//! 实现 AvatarSynthesizerPort trait
//!
//! 外部 API:
//! PUT {endpoint}/avatar/batchsyntheses/{job_id}?api-version=2024-08-01  创建任务
//! GET {endpoint}/avatar/batchsyntheses/{job_id}?api-version=2024-08-01  查询状态
//! 认证: Ocp-Apim-Subscription-Key

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use uuid::Uuid;

use crate::application::ports::{AvatarSynthesizerPort, JobStatusReport, SynthesisError};
use crate::domain::avatar::{GenerationRequest, JobStatus};

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// 未指定背景图时使用的纯白背景
const DEFAULT_BACKGROUND_COLOR: &str = "#FFFFFFFF";

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchSynthesisPayload<'a> {
    input_kind: &'static str,
    synthesis_config: SynthesisConfig<'a>,
    custom_voices: BTreeMap<String, String>,
    inputs: Vec<SynthesisInput<'a>>,
    avatar_config: AvatarConfig<'a>,
}

#[derive(Debug, Serialize)]
struct SynthesisConfig<'a> {
    voice: &'a str,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    content: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AvatarConfig<'a> {
    talking_avatar_character: &'a str,
    talking_avatar_style: &'a str,
    customized: bool,
    video_format: &'static str,
    video_codec: &'static str,
    subtitle_type: &'static str,
    use_built_in_voice: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    background_image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    background_color: Option<&'static str>,
}

impl<'a> BatchSynthesisPayload<'a> {
    fn from_request(request: &'a GenerationRequest) -> Self {
        let background_image = request.background();
        let background_color = match background_image {
            Some(_) => None,
            None => Some(DEFAULT_BACKGROUND_COLOR),
        };

        Self {
            input_kind: "PlainText",
            synthesis_config: SynthesisConfig {
                voice: request.voice(),
            },
            custom_voices: BTreeMap::new(),
            inputs: vec![SynthesisInput {
                content: request.text(),
            }],
            avatar_config: AvatarConfig {
                talking_avatar_character: request.character(),
                talking_avatar_style: request.style(),
                customized: false,
                video_format: "mp4",
                video_codec: "h264",
                subtitle_type: "soft_embedded",
                use_built_in_voice: false,
                background_image,
                background_color,
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct BatchSynthesisStatus {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    outputs: Option<BatchSynthesisOutputs>,
}

#[derive(Debug, Default, Deserialize)]
struct BatchSynthesisOutputs {
    #[serde(default)]
    result: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// Azure 数字人客户端配置
#[derive(Debug, Clone)]
pub struct AzureAvatarClientConfig {
    /// 服务端点（不含末尾 '/'）
    pub endpoint: String,
    pub speech_key: String,
    pub api_version: String,
    /// 单次 HTTP 请求超时（秒）
    pub timeout_secs: u64,
}

impl AzureAvatarClientConfig {
    pub fn new(endpoint: impl Into<String>, speech_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            speech_key: speech_key.into(),
            api_version: "2024-08-01".to_string(),
            timeout_secs: 60,
        }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Azure 数字人客户端
pub struct AzureAvatarClient {
    client: Client,
    config: AzureAvatarClientConfig,
}

impl AzureAvatarClient {
    pub fn new(config: AzureAvatarClientConfig) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SynthesisError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 任务资源 URL（创建与查询共用）
    fn job_url(&self, job_id: Uuid) -> String {
        format!(
            "{}/avatar/batchsyntheses/{}?api-version={}",
            self.config.endpoint, job_id, self.config.api_version
        )
    }
}

fn network_error(e: reqwest::Error) -> SynthesisError {
    if e.is_connect() {
        SynthesisError::NetworkError(format!("Cannot connect to avatar service: {}", e))
    } else {
        SynthesisError::NetworkError(e.to_string())
    }
}

#[async_trait]
impl AvatarSynthesizerPort for AzureAvatarClient {
    async fn submit_job(
        &self,
        job_id: Uuid,
        request: &GenerationRequest,
    ) -> Result<(), SynthesisError> {
        let payload = BatchSynthesisPayload::from_request(request);

        tracing::debug!(
            job_id = %job_id,
            character = %request.character(),
            style = %request.style(),
            has_background = request.background().is_some(),
            "Creating avatar batch synthesis"
        );

        let response = self
            .client
            .put(self.job_url(job_id))
            .header(SUBSCRIPTION_KEY_HEADER, &self.config.speech_key)
            .json(&payload)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }

    async fn job_status(&self, job_id: Uuid) -> Result<JobStatusReport, SynthesisError> {
        let response = self
            .client
            .get(self.job_url(job_id))
            .header(SUBSCRIPTION_KEY_HEADER, &self.config.speech_key)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(e.to_string()))?;
        let parsed: BatchSynthesisStatus = serde_json::from_value(payload.clone())
            .map_err(|e| SynthesisError::InvalidResponse(e.to_string()))?;

        let job_status = parsed
            .status
            .as_deref()
            .map(JobStatus::from_provider)
            .unwrap_or(JobStatus::Pending);

        Ok(JobStatusReport {
            status: job_status,
            result_url: parsed.outputs.and_then(|o| o.result),
            payload,
        })
    }
}
