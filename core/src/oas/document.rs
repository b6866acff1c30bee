#![deny(missing_docs)]

//! # Source Document
//!
//! Decoding of the API description and the document-level facts the
//! collection builder needs: version, title and base URL.

use crate::error::{AppError, AppResult};
use serde_json::Value;
use url::Url;

/// The dialect of the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecVersion {
    /// `swagger: "2.0"`.
    Swagger2,
    /// `openapi: 3.x`.
    OpenApi3,
    /// Neither marker present; treated like OpenAPI 3 where it matters.
    Unknown,
}

impl SpecVersion {
    /// Detects the dialect from the top-level version markers.
    pub fn detect(document: &Value) -> Self {
        if document.get("openapi").is_some() {
            Self::OpenApi3
        } else if document.get("swagger").is_some() {
            Self::Swagger2
        } else {
            Self::Unknown
        }
    }
}

/// Decodes a document from JSON, falling back to YAML.
///
/// The top level must be a mapping.
pub fn parse_document(content: &str) -> AppResult<Value> {
    let value: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(json_err) => serde_yaml::from_str::<Value>(content).map_err(|yaml_err| {
            AppError::Parse(format!(
                "Document is neither JSON ({}) nor YAML ({})",
                json_err, yaml_err
            ))
        })?,
    };

    if !value.is_object() {
        return Err(AppError::Parse(
            "Document root must be a mapping".to_string(),
        ));
    }
    Ok(value)
}

/// Collection title from `info.title`.
pub fn title(document: &Value) -> String {
    info_field(document, "title").unwrap_or_else(|| "API Collection".to_string())
}

/// Collection description from `info.description`.
pub fn description(document: &Value) -> String {
    info_field(document, "description").unwrap_or_default()
}

fn info_field(document: &Value, key: &str) -> Option<String> {
    document
        .get("info")
        .and_then(|info| info.get(key))
        .and_then(Value::as_str)
        .map(String::from)
}

/// Derives the base URL requests are rooted at, without a trailing slash.
///
/// Order: `servers[0].url` (joined onto `source_url` when relative), Swagger 2.0
/// `schemes`/`host`/`basePath`, then the scheme and authority of `source_url`.
pub fn base_url(document: &Value, source_url: Option<&str>) -> String {
    let source = source_url.and_then(|s| Url::parse(s).ok());

    let base = server_url(document, source.as_ref())
        .or_else(|| swagger_host_url(document, source.as_ref()))
        .or_else(|| source.as_ref().map(origin))
        .unwrap_or_default();

    base.trim_end_matches('/').to_string()
}

fn server_url(document: &Value, source: Option<&Url>) -> Option<String> {
    let url = document
        .get("servers")?
        .as_array()?
        .first()?
        .get("url")?
        .as_str()?;

    if Url::parse(url).is_ok() {
        return Some(url.to_string());
    }
    match source.and_then(|s| s.join(url).ok()) {
        Some(joined) => Some(joined.to_string()),
        None => Some(url.to_string()),
    }
}

fn swagger_host_url(document: &Value, source: Option<&Url>) -> Option<String> {
    let host = document.get("host")?.as_str()?;
    let scheme = document
        .get("schemes")
        .and_then(Value::as_array)
        .and_then(|s| s.first())
        .and_then(Value::as_str)
        .map(String::from)
        .or_else(|| source.map(|s| s.scheme().to_string()))
        .unwrap_or_else(|| "https".to_string());
    let base_path = document
        .get("basePath")
        .and_then(Value::as_str)
        .unwrap_or("");
    Some(format!("{}://{}{}", scheme, host, base_path))
}

fn origin(url: &Url) -> String {
    format!("{}://{}", url.scheme(), authority(url))
}

/// `host[:port]` of a URL.
pub(crate) fn authority(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        _ => String::new(),
    }
}
