//! Structural check for Postman collection documents

use super::types::is_truthy;
use serde_json::Value;

/// Outcome of checking a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(&'static str),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }
}

/// Check that `document` looks like a collection: it needs an `info` marker
/// and either an `item` tree or a legacy `requests` list.
pub fn validate_collection(document: &Value) -> Validation {
    if !document.is_object() {
        return Validation::Invalid("document is not a JSON object");
    }
    if !document.get("info").is_some_and(is_truthy) {
        return Validation::Invalid("missing 'info' section");
    }
    let has_items = document.get("item").is_some_and(is_truthy);
    let has_requests = document.get("requests").is_some_and(is_truthy);
    if !has_items && !has_requests {
        return Validation::Invalid("missing 'item' or 'requests' list");
    }
    Validation::Valid
}

/// Shorthand for `validate_collection(document).is_valid()`
pub fn is_collection(document: &Value) -> bool {
    validate_collection(document).is_valid()
}
