#![deny(missing_docs)]

//! # Conversion Options
//!
//! Run-level settings shared by the collection builder and the example generator.

use crate::oas::resolver::DEFAULT_MAX_DEPTH;

/// Settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Depth bound for reference resolution and example generation.
    pub max_depth: usize,
    /// Headers attached to every request item, in order.
    pub headers: Vec<(String, String)>,
    /// Where the document came from; used to derive a base URL when the document has none.
    pub source_url: Option<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            headers: Vec::new(),
            source_url: None,
        }
    }
}

impl ConvertOptions {
    /// Sets the depth bound.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Appends a header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Sets the source URL.
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }
}
