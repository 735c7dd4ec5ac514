//! Search query construction and the backend seam.
//!
//! Fetching and parsing a Q&A site's result pages lives behind
//! [`SearchBackend`]. The crate ships [`UrlBackend`], which points the
//! user at the site's own search page.

mod url;

pub use url::{encode_query, UrlBackend, DEFAULT_SEARCH_URL};

use serde::{Deserialize, Serialize};

use crate::language::Language;
use crate::Result;

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Question title.
    pub title: String,
    /// Link to the question (or the search page).
    pub url: String,
    /// Answer count, when the backend knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<u32>,
}

/// What to search for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// The extracted error message.
    pub text: String,
    /// Optional site tag narrowing the search, e.g. `python`.
    pub tag: Option<String>,
}

impl SearchQuery {
    /// Build a query from an error message and the detected language.
    pub fn new(message: impl Into<String>, language: Option<Language>) -> Self {
        Self {
            text: message.into(),
            tag: language.map(|l| l.tag().to_string()),
        }
    }

    /// The query string as typed into a search box: `[tag] message`.
    pub fn search_terms(&self) -> String {
        match self.tag {
            Some(ref tag) => format!("[{}] {}", tag, self.text),
            None => self.text.clone(),
        }
    }

    /// Full search URL under `base_url`.
    pub fn to_url(&self, base_url: &str) -> String {
        let sep = if base_url.contains('?') { '&' } else { '?' };
        format!("{}{}q={}", base_url, sep, encode_query(&self.search_terms()))
    }
}

/// Source of search results.
pub trait SearchBackend {
    /// Run `query` and return the hits, best first.
    fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>>;
}
