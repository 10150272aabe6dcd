//! Centralized error handling module
//!
//! Library code returns [`AppResult`]; the binary converts into `anyhow` at
//! the entry point.

pub mod context;
pub mod types;

pub use context::ErrorContextExt;
pub use types::{AppError, AppResult};
