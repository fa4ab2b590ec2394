//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod artifact;
pub mod azure;
pub mod cloudinary;

pub use artifact::*;
pub use azure::*;
pub use cloudinary::*;
