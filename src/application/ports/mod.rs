//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod artifact_fetcher;
mod avatar_synthesizer;
mod media_host;

pub use artifact_fetcher::{ArtifactError, ArtifactFetcherPort, TempArtifact};
pub use avatar_synthesizer::{AvatarSynthesizerPort, JobStatusReport, SynthesisError};
pub use media_host::{HostedMedia, MediaHostError, MediaHostPort};
