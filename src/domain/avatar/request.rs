//! Avatar Context - Generation Request

use super::catalog::AvatarCatalog;
use super::errors::ValidationError;

pub const DEFAULT_VOICE: &str = "th-TH-NiwatNeural";
pub const DEFAULT_CHARACTER: &str = "harry";
pub const DEFAULT_STYLE: &str = "casual";

/// 未校验的生成参数（缺省字段为 None）
#[derive(Debug, Clone, Default)]
pub struct GenerationDraft {
    pub text: Option<String>,
    pub voice: Option<String>,
    pub character: Option<String>,
    pub style: Option<String>,
    pub background: Option<String>,
}

/// 已校验的生成请求
///
/// 不变量:
/// - text 去除首尾空白后非空
/// - voice 属于目录中的已知音色
/// - style 属于 character 允许的风格
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    text: String,
    voice: String,
    character: String,
    style: String,
    background: Option<String>,
}

impl GenerationRequest {
    /// 按顺序校验：文本 -> 音色 -> 角色 -> 风格，首个失败即返回
    pub fn validate(
        draft: GenerationDraft,
        catalog: &AvatarCatalog,
    ) -> Result<Self, ValidationError> {
        let text = draft.text.as_deref().unwrap_or_default().trim();
        if text.is_empty() {
            return Err(ValidationError::MissingText);
        }

        let voice = draft.voice.unwrap_or_else(|| DEFAULT_VOICE.to_string());
        let character = draft
            .character
            .unwrap_or_else(|| DEFAULT_CHARACTER.to_string());
        let style = draft.style.unwrap_or_else(|| DEFAULT_STYLE.to_string());

        if !catalog.has_voice(&voice) {
            let valid = catalog.all_voices().into_iter().map(String::from).collect();
            return Err(ValidationError::InvalidVoice { voice, valid });
        }

        let styles = catalog
            .styles_for(&character)
            .ok_or_else(|| ValidationError::InvalidCharacter(character.clone()))?;

        if !styles.contains(&style) {
            return Err(ValidationError::InvalidStyle {
                style,
                character,
                valid: styles.to_vec(),
            });
        }

        // 空字符串背景视为未提供
        let background = draft.background.filter(|b| !b.trim().is_empty());

        Ok(Self {
            text: text.to_string(),
            voice,
            character,
            style,
            background,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }

    pub fn character(&self) -> &str {
        &self.character
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(text: &str) -> GenerationDraft {
        GenerationDraft {
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_applied() {
        let request = GenerationRequest::validate(draft("  hello "), &AvatarCatalog::builtin())
            .unwrap();
        assert_eq!(request.text(), "hello");
        assert_eq!(request.voice(), DEFAULT_VOICE);
        assert_eq!(request.character(), DEFAULT_CHARACTER);
        assert_eq!(request.style(), DEFAULT_STYLE);
        assert_eq!(request.background(), None);
    }

    #[test]
    fn test_whitespace_text_rejected() {
        let catalog = AvatarCatalog::builtin();
        for text in ["", "   ", "\n\t"] {
            assert_eq!(
                GenerationRequest::validate(draft(text), &catalog),
                Err(ValidationError::MissingText)
            );
        }
        assert_eq!(
            GenerationRequest::validate(GenerationDraft::default(), &catalog),
            Err(ValidationError::MissingText)
        );
    }

    #[test]
    fn test_text_checked_before_voice() {
        let input = GenerationDraft {
            text: Some(" ".to_string()),
            voice: Some("nope".to_string()),
            ..Default::default()
        };
        assert_eq!(
            GenerationRequest::validate(input, &AvatarCatalog::builtin()),
            Err(ValidationError::MissingText)
        );
    }

    #[test]
    fn test_unknown_voice_lists_valid_voices() {
        let input = GenerationDraft {
            voice: Some("en-US-JennyNeural".to_string()),
            ..draft("hi")
        };
        let err = GenerationRequest::validate(input, &AvatarCatalog::builtin()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Invalid voice 'en-US-JennyNeural'"));
        assert!(message.contains("th-TH-NiwatNeural"));
        assert!(message.contains("GET /voices"));
    }

    #[test]
    fn test_unknown_character() {
        let input = GenerationDraft {
            character: Some("bob".to_string()),
            ..draft("hi")
        };
        assert_eq!(
            GenerationRequest::validate(input, &AvatarCatalog::builtin()),
            Err(ValidationError::InvalidCharacter("bob".to_string()))
        );
    }

    #[test]
    fn test_style_must_belong_to_character() {
        let input = GenerationDraft {
            character: Some("jeff".to_string()),
            style: Some("casual".to_string()),
            ..draft("hi")
        };
        let err = GenerationRequest::validate(input, &AvatarCatalog::builtin()).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"Invalid style 'casual' for character 'jeff'. Valid: ["business", "formal"]"#
        );
    }

    #[test]
    fn test_empty_background_ignored() {
        let input = GenerationDraft {
            background: Some(String::new()),
            ..draft("hi")
        };
        let request = GenerationRequest::validate(input, &AvatarCatalog::builtin()).unwrap();
        assert_eq!(request.background(), None);

        let input = GenerationDraft {
            background: Some("https://res.example.com/bg.png".to_string()),
            ..draft("hi")
        };
        let request = GenerationRequest::validate(input, &AvatarCatalog::builtin()).unwrap();
        assert_eq!(request.background(), Some("https://res.example.com/bg.png"));
    }
}
