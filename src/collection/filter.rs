//! Pruning a request tree down to requests whose URL matches a pattern
//!
//! Folders survive only while they still contain a matching request, and
//! surviving siblings keep their original order.

use super::pattern::UrlPattern;
use super::types::{Collection, Item};
use super::url::resolve_url;
use serde::{Deserialize, Serialize};

/// A request seen by the filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlMatch {
    pub name: String,
    pub url: String,
}

/// Counts collected during one filter pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterStats {
    pub total: usize,
    pub matched: usize,
    pub skipped: usize,
    pub matched_urls: Vec<UrlMatch>,
    pub skipped_urls: Vec<UrlMatch>,
}

/// Result of [`apply_request_filter`]
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub collection: Collection,
    /// `None` when no pattern was given and nothing was filtered
    pub stats: Option<FilterStats>,
}

/// Filter `collection` by `pattern`.
///
/// An absent or empty pattern returns the collection unchanged with no
/// statistics, which callers can tell apart from a pass that matched
/// everything.
pub fn apply_request_filter(collection: &Collection, pattern: Option<&str>) -> FilterOutcome {
    let matcher = UrlPattern::compile(pattern);
    if matcher.is_identity() {
        return FilterOutcome {
            collection: collection.clone(),
            stats: None,
        };
    }

    let mut stats = FilterStats::default();
    let items = collection
        .items
        .as_ref()
        .map(|items| filter_items(items, &matcher, &mut stats));

    FilterOutcome {
        collection: Collection {
            items,
            meta: collection.meta.clone(),
        },
        stats: Some(stats),
    }
}

/// Rebuild `items` keeping only matching requests and non-empty folders
pub fn filter_items(items: &[Item], matcher: &UrlPattern, stats: &mut FilterStats) -> Vec<Item> {
    let mut kept = Vec::new();

    for item in items {
        match item {
            Item::Folder(folder) => {
                let children = filter_items(&folder.children, matcher, stats);
                if !children.is_empty() {
                    let mut folder = folder.clone();
                    folder.children = children;
                    kept.push(Item::Folder(folder));
                }
            }
            Item::Request(request) => {
                stats.total += 1;
                let entry = UrlMatch {
                    name: request.display_name().to_string(),
                    url: resolve_url(Some(&request.request)),
                };

                if matcher.is_match(&entry.url) {
                    stats.matched += 1;
                    stats.matched_urls.push(entry);
                    kept.push(item.clone());
                } else {
                    stats.skipped += 1;
                    stats.skipped_urls.push(entry);
                }
            }
            Item::Opaque(_) => {}
        }
    }

    kept
}
