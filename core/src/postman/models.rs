#![deny(missing_docs)]

//! # Postman Collection Models
//!
//! Serde model of the Postman Collection v2.1 subset the converter emits.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Schema URL written into `info.schema`.
pub const COLLECTION_SCHEMA_URL: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// A complete collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection metadata.
    pub info: Info,
    /// Top-level folders.
    pub item: Vec<Folder>,
}

/// Collection metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Collection format URL.
    pub schema: String,
}

/// A folder grouping requests that share a tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    /// Folder name (the tag).
    pub name: String,
    /// Requests in document order.
    pub item: Vec<RequestItem>,
}

/// One request with its (empty) saved responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestItem {
    /// Display name.
    pub name: String,
    /// The request.
    pub request: Request,
    /// Saved responses; always empty.
    pub response: Vec<Value>,
}

/// The HTTP request of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Upper-case HTTP method.
    pub method: String,
    /// Request headers.
    pub header: Vec<Header>,
    /// Target URL.
    pub url: RequestUrl,
    /// Operation description.
    pub description: String,
    /// Raw body, if the operation takes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
}

/// A request header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Header name.
    pub key: String,
    /// Header value.
    pub value: String,
    /// Postman value type (`text`) for user-supplied headers.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Parameter description for header parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Set for optional header parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

impl Header {
    /// A plain `key: value` header.
    pub fn plain(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            kind: None,
            description: None,
            disabled: None,
        }
    }

    /// A user-configured header (`type: text`).
    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: Some("text".to_string()),
            ..Self::plain(key, value)
        }
    }
}

/// Structured request URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestUrl {
    /// Full URL text.
    pub raw: String,
    /// Scheme of the base URL.
    pub protocol: String,
    /// Host split on `.`.
    pub host: Vec<String>,
    /// Path segments.
    pub path: Vec<String>,
    /// Query parameters.
    pub query: Vec<QueryParam>,
}

/// A query parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParam {
    /// Parameter name.
    pub key: String,
    /// Example value.
    pub value: String,
    /// Parameter description.
    pub description: String,
    /// True for optional parameters.
    pub disabled: bool,
}

/// A raw request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Always `raw`.
    pub mode: String,
    /// Pretty-printed example payload.
    pub raw: String,
    /// Editor options.
    pub options: BodyOptions,
}

/// Body editor options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyOptions {
    /// Options of the raw editor.
    pub raw: RawOptions,
}

/// Raw editor options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOptions {
    /// `json` or `text`.
    pub language: String,
}

impl Body {
    /// A raw body, highlighted as JSON when the content type mentions `json`.
    pub fn raw(content: impl Into<String>, content_type: &str) -> Self {
        let language = if content_type.contains("json") {
            "json"
        } else {
            "text"
        };
        Self {
            mode: "raw".to_string(),
            raw: content.into(),
            options: BodyOptions {
                raw: RawOptions {
                    language: language.to_string(),
                },
            },
        }
    }
}
