//! List response envelopes.

use serde::{Deserialize, Serialize};

/// Page-number pagination envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// A list endpoint answers with a page or, when pagination is disabled for
/// the view, with a bare array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Page(Page<T>),
    Plain(Vec<T>),
}

impl<T> Listing<T> {
    pub fn items(&self) -> &[T] {
        match self {
            Listing::Page(page) => &page.results,
            Listing::Plain(items) => items,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Page(page) => page.results,
            Listing::Plain(items) => items,
        }
    }

    /// Total across all pages, or the item count for a bare array.
    pub fn total(&self) -> u64 {
        match self {
            Listing::Page(page) => page.count,
            Listing::Plain(items) => items.len() as u64,
        }
    }

    pub fn has_next(&self) -> bool {
        matches!(self, Listing::Page(Page { next: Some(_), .. }))
    }
}
