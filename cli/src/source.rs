#![deny(missing_docs)]

//! # Document Source
//!
//! Loads the API definition from a local file or, with the `client` feature,
//! over HTTP with the user's headers attached.

use crate::error::{CliError, CliResult};
use s2p_core::parse_document;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reads and decodes a local JSON or YAML document.
pub fn read_document(path: &Path) -> CliResult<Value> {
    if !path.exists() {
        return Err(CliError::General(format!(
            "API definition not found: {:?}",
            path
        )));
    }

    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "Read API definition");
    Ok(parse_document(&content)?)
}

/// Fetches and decodes a document over HTTP(S).
#[cfg(feature = "client")]
pub fn fetch_document(url: &str, headers: &[(String, String)]) -> CliResult<Value> {
    let mut request = ureq::get(url);
    for (key, value) in headers {
        request = request.header(key.as_str(), value.as_str());
    }

    let mut response = request
        .call()
        .map_err(|e| CliError::Fetch(format!("{}: {}", url, e)))?;
    let content = response
        .body_mut()
        .read_to_string()
        .map_err(|e| CliError::Fetch(format!("{}: {}", url, e)))?;
    debug!(url, bytes = content.len(), "Fetched API definition");

    Ok(parse_document(&content)?)
}

/// Fetching is unavailable without the `client` feature.
#[cfg(not(feature = "client"))]
pub fn fetch_document(url: &str, _headers: &[(String, String)]) -> CliResult<Value> {
    Err(CliError::Fetch(format!(
        "{}: built without the `client` feature",
        url
    )))
}
