//! Search-page backend.

use tracing::debug;

use super::{SearchBackend, SearchQuery, SearchResult};
use crate::Result;

/// Default Q&A search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://stackoverflow.com/search";

/// Backend returning a single result: the site's search page for the query.
#[derive(Debug, Clone)]
pub struct UrlBackend {
    base_url: String,
}

impl UrlBackend {
    /// Create a backend for the given search endpoint.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// The configured endpoint.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for UrlBackend {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_URL)
    }
}

impl SearchBackend for UrlBackend {
    fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>> {
        let url = query.to_url(&self.base_url);
        debug!(%url, "built search url");
        Ok(vec![SearchResult {
            title: format!("Search results for \"{}\"", query.search_terms()),
            url,
            answers: None,
        }])
    }
}

/// Form-encode a query value (`application/x-www-form-urlencoded`).
pub fn encode_query(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'*' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
