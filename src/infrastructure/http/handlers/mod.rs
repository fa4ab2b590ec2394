//! HTTP Handlers

mod avatar;
mod catalog;
mod health;

pub use avatar::*;
pub use catalog::*;
pub use health::*;
