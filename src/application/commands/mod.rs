//! 应用层 - 命令（写操作）

mod avatar_commands;

pub mod handlers;

pub use avatar_commands::*;
