//! Avatar Context - Catalog
//!
//! 角色 / 风格 / 音色的静态查找表，启动时构建一次，之后只读

use std::collections::BTreeMap;

/// 角色 -> 允许的风格列表
pub type AvatarStyles = BTreeMap<String, Vec<String>>;

/// 音色性别 -> 音色 ID 列表
pub type VoiceGroups = BTreeMap<String, Vec<String>>;

const BUILTIN_AVATARS: &[(&str, &[&str])] = &[
    ("harry", &["business", "casual", "youthful"]),
    ("jeff", &["business", "formal"]),
    (
        "lisa",
        &[
            "casual-sitting",
            "graceful-sitting",
            "graceful-standing",
            "technical-sitting",
            "technical-standing",
        ],
    ),
    ("lori", &["casual", "graceful", "formal"]),
    ("max", &["business", "casual", "formal"]),
    ("meg", &["formal", "casual", "business"]),
];

const BUILTIN_VOICES: &[(&str, &[&str])] = &[
    ("female", &["th-TH-PremwadeeNeural", "th-TH-AcharaNeural"]),
    ("male", &["th-TH-NiwatNeural"]),
];

fn table(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(key, values)| {
            (
                key.to_string(),
                values.iter().map(|v| v.to_string()).collect(),
            )
        })
        .collect()
}

/// 头像目录
///
/// 不变量:
/// - 构建后不可变，跨请求共享
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarCatalog {
    avatars: AvatarStyles,
    voices: VoiceGroups,
}

impl AvatarCatalog {
    pub fn new(avatars: AvatarStyles, voices: VoiceGroups) -> Self {
        Self { avatars, voices }
    }

    /// 内置目录（Azure 标准头像与泰语神经音色）
    pub fn builtin() -> Self {
        Self::new(Self::builtin_avatars(), Self::builtin_voices())
    }

    pub fn builtin_avatars() -> AvatarStyles {
        table(BUILTIN_AVATARS)
    }

    pub fn builtin_voices() -> VoiceGroups {
        table(BUILTIN_VOICES)
    }

    pub fn avatars(&self) -> &AvatarStyles {
        &self.avatars
    }

    pub fn voices(&self) -> &VoiceGroups {
        &self.voices
    }

    /// 所有音色 ID（按性别分组顺序展开）
    pub fn all_voices(&self) -> Vec<&str> {
        self.voices
            .values()
            .flat_map(|ids| ids.iter().map(String::as_str))
            .collect()
    }

    pub fn has_voice(&self, voice: &str) -> bool {
        self.voices.values().any(|ids| ids.iter().any(|id| id == voice))
    }

    pub fn styles_for(&self, character: &str) -> Option<&[String]> {
        self.avatars.get(character).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.avatars.is_empty() || self.voices.is_empty()
    }
}

impl Default for AvatarCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
