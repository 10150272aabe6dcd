//! newman-batch library
//!
//! Runs a directory of Postman collections through newman one after another,
//! injecting shared pre-request and test scripts into every request and
//! optionally keeping only requests whose URL matches a glob.

pub mod batch;
pub mod cli;
pub mod collection;
pub mod config;
pub mod errors;
pub mod runner;

// Re-export commonly used types for convenience
pub use batch::{BatchConfig, BatchReport, BatchRunner, CollectionResult};
pub use collection::{apply_request_filter, inject_hooks, Collection, FilterStats, HookSet, UrlPattern};
pub use config::{Config, ConfigManager};
pub use errors::{AppError, AppResult};
pub use runner::{CollectionRunner, NewmanOptions, NewmanRunner, RunSummary};
