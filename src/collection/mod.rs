//! Collection transformation pipeline
//!
//! Parses collection documents into a request tree, injects shared hook
//! scripts into every request, and prunes the tree by request URL.

pub mod filter;
pub mod inject;
pub mod pattern;
pub mod types;
pub mod url;
pub mod validator;

pub use filter::{apply_request_filter, FilterOutcome, FilterStats, UrlMatch};
pub use inject::{inject_hooks, HookEvent, HookSet};
pub use pattern::UrlPattern;
pub use types::{Collection, Event, Folder, Item, Request, Script};
pub use url::{resolve_url, RequestUrl};
pub use validator::{is_collection, validate_collection, Validation};
