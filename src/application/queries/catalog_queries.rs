//! Catalog Queries

/// 列出所有头像角色及其风格
#[derive(Debug, Clone)]
pub struct ListModels;

/// 列出所有音色（按性别分组）
#[derive(Debug, Clone)]
pub struct ListVoices;
