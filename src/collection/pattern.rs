//! Wildcard matching of request URLs
//!
//! `*` matches any run of characters and `?` exactly one. Patterns without
//! wildcards fall back to a substring test. All matching ignores case.

use regex::{Regex, RegexBuilder};
use tracing::warn;

/// A compiled URL pattern
#[derive(Debug, Clone)]
pub enum UrlPattern {
    /// No pattern given; accepts every URL
    Any,
    /// Lower-cased literal searched for anywhere in the URL
    Substring(String),
    /// Anchored, case-insensitive translation of a wildcard pattern
    Wildcard(Regex),
}

impl UrlPattern {
    /// Compile `pattern`. An absent or empty pattern matches everything.
    pub fn compile(pattern: Option<&str>) -> Self {
        let pattern = match pattern {
            Some(p) if !p.is_empty() => p,
            _ => return UrlPattern::Any,
        };

        if !pattern.contains(['*', '?']) {
            return UrlPattern::Substring(pattern.to_lowercase());
        }

        let source = wildcard_to_regex(pattern);
        match RegexBuilder::new(&source).case_insensitive(true).build() {
            Ok(regex) => UrlPattern::Wildcard(regex),
            Err(e) => {
                // Only reachable for patterns exceeding the regex size limit
                warn!(pattern, error = %e, "Wildcard pattern too large, using substring match");
                UrlPattern::Substring(pattern.to_lowercase())
            }
        }
    }

    /// Test a resolved URL. An empty URL only matches [`UrlPattern::Any`].
    pub fn is_match(&self, url: &str) -> bool {
        match self {
            UrlPattern::Any => true,
            _ if url.is_empty() => false,
            UrlPattern::Substring(needle) => url.to_lowercase().contains(needle.as_str()),
            UrlPattern::Wildcard(regex) => regex.is_match(url),
        }
    }

    /// Whether this pattern filters anything at all
    pub fn is_identity(&self) -> bool {
        matches!(self, UrlPattern::Any)
    }
}

/// Translate a wildcard pattern into an anchored regular expression,
/// escaping every other character literally.
pub fn wildcard_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    out.push_str("(?s)^");

    let mut literal = String::new();
    for ch in pattern.chars() {
        match ch {
            '*' | '?' => {
                out.push_str(&regex::escape(&literal));
                literal.clear();
                out.push_str(if ch == '*' { ".*" } else { "." });
            }
            _ => literal.push(ch),
        }
    }
    out.push_str(&regex::escape(&literal));
    out.push('$');
    out
}
