//! Avatar Commands

use uuid::Uuid;

use crate::domain::avatar::GenerationDraft;

/// 生成数字人视频命令
#[derive(Debug, Clone, Default)]
pub struct GenerateAvatar {
    pub text: Option<String>,
    pub voice: Option<String>,
    pub character: Option<String>,
    pub style: Option<String>,
    pub background: Option<String>,
}

impl From<GenerateAvatar> for GenerationDraft {
    fn from(command: GenerateAvatar) -> Self {
        Self {
            text: command.text,
            voice: command.voice,
            character: command.character,
            style: command.style,
            background: command.background,
        }
    }
}

/// 生成结果
#[derive(Debug, Clone)]
pub struct GenerateAvatarResponse {
    pub job_id: Uuid,
    /// 托管平台返回的安全 URL
    pub video_url: String,
}
