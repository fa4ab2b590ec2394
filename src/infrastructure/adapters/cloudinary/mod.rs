//! Cloudinary Adapter - 视频托管上传

mod cloudinary_client;

pub use cloudinary_client::*;
