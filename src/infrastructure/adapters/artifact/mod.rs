//! Artifact Adapter - 合成视频下载

mod http_artifact_fetcher;

pub use http_artifact_fetcher::*;
