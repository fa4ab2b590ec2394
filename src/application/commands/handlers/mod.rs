//! Command Handlers 实现

mod generate_avatar_handler;

pub use generate_avatar_handler::*;
