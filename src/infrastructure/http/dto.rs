//! Data Transfer Objects

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::application::GenerateAvatar;
use crate::domain::avatar::{AvatarStyles, VoiceGroups};

// ============================================================================
// Avatar DTOs
// ============================================================================

/// POST /generate-avatar 原始请求体
///
/// key 与其它字段分开读取，字段类型错误不影响认证
#[derive(Debug)]
pub struct GenerateAvatarBody(Value);

impl GenerateAvatarBody {
    /// 非 JSON 请求体按空请求处理
    pub fn from_slice(body: &[u8]) -> Self {
        Self(serde_json::from_slice(body).unwrap_or(Value::Null))
    }

    pub fn key(&self) -> Option<&str> {
        self.0.get("key").and_then(Value::as_str)
    }

    /// 认证通过后再做类型化解析
    pub fn into_request(self) -> Result<GenerateAvatarRequest, serde_json::Error> {
        match self.0 {
            Value::Null => Ok(GenerateAvatarRequest::default()),
            value => serde_json::from_value(value),
        }
    }
}

/// 生成请求字段，均可缺省
#[derive(Debug, Default, Deserialize)]
pub struct GenerateAvatarRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default, rename = "talkingAvatarCharacter")]
    pub talking_avatar_character: Option<String>,
    #[serde(default, rename = "talkingAvatarStyle")]
    pub talking_avatar_style: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
}

impl From<GenerateAvatarRequest> for GenerateAvatar {
    fn from(req: GenerateAvatarRequest) -> Self {
        Self {
            text: req.text,
            voice: req.voice,
            character: req.talking_avatar_character,
            style: req.talking_avatar_style,
            background: req.background,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateAvatarResponseDto {
    pub success: bool,
    pub video_url: String,
    pub job_id: Uuid,
}

// ============================================================================
// Catalog DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub avatars: AvatarStyles,
}

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: VoiceGroups,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
