#![deny(missing_docs)]

//! # Reference Pointers
//!
//! Parsing of `$ref` strings into schema dictionary names, plus lookup of
//! arbitrary local JSON Pointers inside the source document.
//!
//! Only local references (`#/...`) are understood; nothing is fetched.

use derive_more::Display;
use percent_encoding::percent_decode_str;
use serde_json::Value;

/// The namespace a schema pointer addresses. Both resolve against the same dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaNamespace {
    /// Swagger 2.0 `#/definitions/{name}`.
    Definitions,
    /// OpenAPI 3.x `#/components/schemas/{name}`.
    Components,
}

/// A parsed schema pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaPointer {
    /// Which syntax the pointer used.
    pub namespace: SchemaNamespace,
    /// Decoded schema name.
    pub name: String,
}

/// Why a pointer could not be mapped onto the schema dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum PointerError {
    /// The pointer does not start with `#/`.
    #[display("not a local reference")]
    NotLocal,
    /// The pointer is local but not under `definitions` or `components/schemas`.
    #[display("unsupported reference namespace")]
    UnsupportedNamespace,
    /// The name segment is empty.
    #[display("empty schema name")]
    EmptyName,
}

impl std::error::Error for PointerError {}

/// Parses a schema `$ref` such as `#/components/schemas/User` or `#/definitions/User`.
pub fn parse_schema_pointer(pointer: &str) -> Result<SchemaPointer, PointerError> {
    let segments = local_segments(pointer).ok_or(PointerError::NotLocal)?;

    let (namespace, raw_name) = match segments.as_slice() {
        ["definitions", name] => (SchemaNamespace::Definitions, *name),
        ["components", "schemas", name] => (SchemaNamespace::Components, *name),
        _ => return Err(PointerError::UnsupportedNamespace),
    };

    let name = decode_pointer_segment(raw_name);
    if name.is_empty() {
        return Err(PointerError::EmptyName);
    }
    Ok(SchemaPointer { namespace, name })
}

/// Follows a local JSON Pointer (e.g. `#/components/parameters/Limit`) inside `document`.
///
/// Returns `None` for non-local pointers or missing targets.
pub fn resolve_local<'a>(document: &'a Value, pointer: &str) -> Option<&'a Value> {
    let segments = local_segments(pointer)?;
    segments.iter().try_fold(document, |node, segment| {
        let key = decode_pointer_segment(segment);
        match node {
            Value::Object(map) => map.get(&key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    })
}

/// Decodes a JSON Pointer segment (handles `~1`, `~0` and percent encoding).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}

fn local_segments(pointer: &str) -> Option<Vec<&str>> {
    let rest = pointer.strip_prefix("#/")?;
    Some(rest.split('/').collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_components_pointer() {
        let parsed = parse_schema_pointer("#/components/schemas/User").unwrap();
        assert_eq!(parsed.namespace, SchemaNamespace::Components);
        assert_eq!(parsed.name, "User");
    }

    #[test]
    fn test_parse_definitions_pointer() {
        let parsed = parse_schema_pointer("#/definitions/Pet").unwrap();
        assert_eq!(parsed.namespace, SchemaNamespace::Definitions);
        assert_eq!(parsed.name, "Pet");
    }

    #[test]
    fn test_parse_rejects_remote_pointer() {
        let err = parse_schema_pointer("https://example.com/openapi.yaml#/definitions/Pet");
        assert_eq!(err, Err(PointerError::NotLocal));
    }

    #[test]
    fn test_parse_rejects_other_sections() {
        let err = parse_schema_pointer("#/components/parameters/Limit");
        assert_eq!(err, Err(PointerError::UnsupportedNamespace));
        let err = parse_schema_pointer("#/components/schemas/User/properties/id");
        assert_eq!(err, Err(PointerError::UnsupportedNamespace));
    }

    #[test]
    fn test_parse_empty_name() {
        assert_eq!(
            parse_schema_pointer("#/definitions/"),
            Err(PointerError::EmptyName)
        );
    }

    #[test]
    fn test_decode_pointer_segment_percent_encoding() {
        let decoded = decode_pointer_segment("User%20Profile~1details");
        assert_eq!(decoded, "User Profile/details");
    }

    #[test]
    fn test_resolve_local_follows_segments() {
        let doc = json!({
            "components": { "parameters": { "Limit": { "name": "limit", "in": "query" } } },
            "servers": [{ "url": "https://api.example.com" }]
        });
        let param = resolve_local(&doc, "#/components/parameters/Limit").unwrap();
        assert_eq!(param["name"], "limit");
        let server = resolve_local(&doc, "#/servers/0/url").unwrap();
        assert_eq!(server, "https://api.example.com");
        assert!(resolve_local(&doc, "#/components/parameters/Missing").is_none());
        assert!(resolve_local(&doc, "other.yaml#/x").is_none());
    }
}
