//! Domain Layer - 领域层
//!
//! - Avatar Context: 数字人视频生成

pub mod avatar;
