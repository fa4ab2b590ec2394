//! Azure Adapter - 批量数字人合成客户端

mod azure_avatar_client;

pub use azure_avatar_client::*;
