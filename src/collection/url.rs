//! Request URL resolution
//!
//! Postman stores a request URL either as a plain string or as a structured
//! object. [`RequestUrl`] names each shape once so matching code never has to
//! probe JSON properties itself.

use serde_json::Value;

/// The shapes a request URL can take
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestUrl {
    /// `"url": "https://..."`
    Plain(String),
    /// `"url": {"raw": "https://...", ...}` with a non-empty raw string
    Raw(String),
    /// `"url": {"host": [...], "path": [...]}` without a usable raw form
    Segments { host: Vec<String>, path: Vec<String> },
    /// Anything else, including a missing descriptor
    Unresolvable,
}

impl RequestUrl {
    /// Classify the `url` of a request descriptor
    pub fn from_descriptor(descriptor: Option<&Value>) -> Self {
        let Some(url) = descriptor.and_then(|d| d.get("url")) else {
            return RequestUrl::Unresolvable;
        };

        match url {
            Value::String(url) => RequestUrl::Plain(url.clone()),
            Value::Object(parts) => {
                if let Some(raw) = parts.get("raw").and_then(Value::as_str) {
                    if !raw.is_empty() {
                        return RequestUrl::Raw(raw.to_string());
                    }
                }
                match (parts.get("host"), parts.get("path")) {
                    (Some(host), Some(path)) => RequestUrl::Segments {
                        host: segments(host),
                        path: segments(path),
                    },
                    _ => RequestUrl::Unresolvable,
                }
            }
            _ => RequestUrl::Unresolvable,
        }
    }

    /// Comparable string form; empty when the shape cannot be resolved
    pub fn resolve(&self) -> String {
        match self {
            RequestUrl::Plain(url) | RequestUrl::Raw(url) => url.clone(),
            RequestUrl::Segments { host, path } => {
                format!("{}/{}", host.join("."), path.join("/"))
            }
            RequestUrl::Unresolvable => String::new(),
        }
    }
}

/// Host and path may each be an array of segments or a single string.
/// Variable segments (`{"value": ...}`) contribute their value.
fn segments(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Object(obj) => obj.get("value").and_then(Value::as_str).map(str::to_string),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Resolve the URL of a request descriptor to a string
pub fn resolve_url(descriptor: Option<&Value>) -> String {
    RequestUrl::from_descriptor(descriptor).resolve()
}
