#![deny(missing_docs)]

//! # Collection Builder
//!
//! Walks the `paths` of an OpenAPI 3.x or Swagger 2.0 document and emits one
//! request item per operation, grouped into folders by first tag.
//!
//! Payloads and parameter values come from the [`ExampleGenerator`]. Each
//! parameter is generated on its own so a malformed one only costs its own value.

use crate::config::ConvertOptions;
use crate::error::{AppError, AppResult};
use crate::example::ExampleGenerator;
use crate::oas::dictionary::SchemaDictionary;
use crate::oas::document::{self, SpecVersion};
use crate::oas::pointer::resolve_local;
use crate::oas::resolver::ReferenceResolver;
use crate::postman::models::{
    Body, Collection, Folder, Header, Info, QueryParam, Request, RequestItem, RequestUrl,
    COLLECTION_SCHEMA_URL,
};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Folder receiving operations without tags.
pub const UNTAGGED_FOLDER: &str = "Other";

/// Run summary handed to the caller for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// Number of request items produced.
    pub operations: usize,
    /// Pointers found to be circular, in discovery order.
    pub circular_refs: Vec<String>,
    /// Parameters whose value fell back to the placeholder.
    pub parameter_fallbacks: usize,
}

/// The result of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// The generated collection.
    pub collection: Collection,
    /// What happened along the way.
    pub report: ConversionReport,
}

/// A parameter after `$ref` following, with the fields every location needs.
struct Parameter<'a> {
    name: String,
    location: String,
    description: String,
    required: bool,
    raw: &'a Value,
}

/// Builds a collection from one document.
pub struct CollectionBuilder<'a> {
    document: &'a Value,
    options: ConvertOptions,
    version: SpecVersion,
    base_url: String,
    generator: ExampleGenerator,
    parameter_fallbacks: usize,
}

impl<'a> CollectionBuilder<'a> {
    /// Prepares the schema dictionary, resolver and generator for `document`.
    pub fn new(document: &'a Value, options: ConvertOptions) -> AppResult<Self> {
        if !document.is_object() {
            return Err(AppError::Parse(
                "Document root must be a mapping".to_string(),
            ));
        }

        let dictionary = SchemaDictionary::from_document(document);
        debug!(schemas = dictionary.len(), "Loaded schema dictionary");

        let resolver = ReferenceResolver::new(dictionary).with_max_depth(options.max_depth);
        let base_url = document::base_url(document, options.source_url.as_deref());

        Ok(Self {
            document,
            version: SpecVersion::detect(document),
            base_url,
            generator: ExampleGenerator::new(resolver),
            options,
            parameter_fallbacks: 0,
        })
    }

    /// Converts every operation and consumes the builder.
    pub fn convert(mut self) -> Conversion {
        let document = self.document;
        let mut tagged: Vec<(Option<String>, RequestItem)> = Vec::new();

        if let Some(paths) = document.get("paths").and_then(Value::as_object) {
            for (path, path_item) in paths {
                let Some(path_item) = path_item.as_object() else {
                    warn!(path = path.as_str(), "Skipping path item that is not a mapping");
                    continue;
                };
                let shared = path_item.get("parameters");

                for (method, operation) in path_item {
                    if !HTTP_METHODS.contains(&method.to_ascii_lowercase().as_str()) {
                        continue;
                    }
                    debug!(method = method.as_str(), path = path.as_str(), "Converting operation");
                    let item = self.request_item(path, method, operation, shared);
                    tagged.push((first_tag(operation), item));
                }
            }
        }

        let operations = tagged.len();
        let collection = Collection {
            info: Info {
                name: document::title(document),
                description: document::description(document),
                schema: COLLECTION_SCHEMA_URL.to_string(),
            },
            item: organize_by_tags(tagged),
        };
        let report = ConversionReport {
            operations,
            circular_refs: self.generator.into_registry().into_vec(),
            parameter_fallbacks: self.parameter_fallbacks,
        };

        Conversion { collection, report }
    }

    fn request_item(
        &mut self,
        path: &str,
        method: &str,
        operation: &'a Value,
        shared: Option<&'a Value>,
    ) -> RequestItem {
        let method = method.to_uppercase();
        let name = str_field(operation, "summary").unwrap_or_else(|| format!("{} {}", method, path));

        let mut header: Vec<Header> = self
            .options
            .headers
            .iter()
            .map(|(key, value)| Header::text(key, value))
            .collect();
        let mut url = self.request_url(path);
        let mut body_param: Option<&'a Value> = None;

        for param in self.parameters(shared, operation.get("parameters")) {
            match param.location.as_str() {
                "query" => {
                    let value = self.parameter_value(&param);
                    url.query.push(QueryParam {
                        key: param.name,
                        value,
                        description: param.description,
                        disabled: !param.required,
                    });
                }
                "header" => {
                    let value = self.parameter_value(&param);
                    header.push(Header {
                        key: param.name,
                        value,
                        kind: None,
                        description: Some(param.description),
                        disabled: Some(!param.required),
                    });
                }
                "body" => body_param = Some(param.raw),
                _ => {}
            }
        }

        let body = match self.version {
            SpecVersion::Swagger2 => body_param.map(|p| self.swagger_body(operation, p)),
            SpecVersion::OpenApi3 => self.openapi_body(operation),
            // Unmarked documents may use either body style.
            SpecVersion::Unknown => self
                .openapi_body(operation)
                .or_else(|| body_param.map(|p| self.swagger_body(operation, p))),
        };
        if let Some((content_type, _)) = &body {
            header.push(Header::plain("Content-Type", content_type.clone()));
        }

        RequestItem {
            name,
            request: Request {
                method,
                header,
                url,
                description: str_field(operation, "description").unwrap_or_default(),
                body: body.map(|(_, body)| body),
            },
            response: Vec::new(),
        }
    }

    fn request_url(&self, path: &str) -> RequestUrl {
        let base = Url::parse(&self.base_url).ok();
        let protocol = base
            .as_ref()
            .map(|u| u.scheme().to_string())
            .unwrap_or_default();
        let authority = base.as_ref().map(document::authority).unwrap_or_default();
        let host = if authority.is_empty() {
            Vec::new()
        } else {
            authority.split('.').map(String::from).collect()
        };

        let base_segments = base
            .as_ref()
            .map(|u| u.path().split('/').filter(|s| !s.is_empty()))
            .into_iter()
            .flatten();
        let path_segments = path.strip_prefix('/').unwrap_or(path).split('/');

        RequestUrl {
            raw: format!("{}{}", self.base_url, path),
            protocol,
            host,
            path: base_segments.chain(path_segments).map(String::from).collect(),
            query: Vec::new(),
        }
    }

    /// Path-level parameters overridden by operation-level ones on the same `(name, in)`.
    fn parameters(&self, shared: Option<&'a Value>, own: Option<&'a Value>) -> Vec<Parameter<'a>> {
        let mut merged: IndexMap<(String, String), Parameter<'a>> = IndexMap::new();

        let entries = [shared, own]
            .into_iter()
            .flatten()
            .filter_map(Value::as_array)
            .flatten();

        for entry in entries {
            let raw = match entry.get("$ref").and_then(Value::as_str) {
                Some(pointer) => match resolve_local(self.document, pointer) {
                    Some(target) => target,
                    None => {
                        warn!(pointer, "Skipping unresolvable parameter reference");
                        continue;
                    }
                },
                None => entry,
            };

            let (Some(name), Some(location)) = (str_field(raw, "name"), str_field(raw, "in")) else {
                warn!("Skipping parameter without name or location");
                continue;
            };

            let param = Parameter {
                description: str_field(raw, "description").unwrap_or_default(),
                required: raw.get("required").and_then(Value::as_bool).unwrap_or(false),
                name: name.clone(),
                location: location.clone(),
                raw,
            };
            merged.insert((name, location), param);
        }

        merged.into_values().collect()
    }

    /// Example value for a parameter, or `""` when its schema is unusable.
    fn parameter_value(&mut self, param: &Parameter<'a>) -> String {
        match self.parameter_example(param.raw) {
            Ok(value) => render_value(&value),
            Err(reason) => {
                warn!(
                    parameter = param.name.as_str(),
                    "Falling back to placeholder value: {}", reason
                );
                self.parameter_fallbacks += 1;
                String::new()
            }
        }
    }

    fn parameter_example(&mut self, raw: &Value) -> Result<Value, String> {
        if let Some(example) = raw.get("example").filter(|v| !v.is_null()) {
            return Ok(example.clone());
        }
        if let Some(schema) = raw.get("schema") {
            if !schema.is_object() {
                return Err("schema is not an object".to_string());
            }
            return Ok(self.generator.generate_from_value(Some(schema)));
        }
        if let Some(content) = raw.get("content") {
            let media = content
                .as_object()
                .and_then(|c| c.values().next())
                .ok_or("content declares no media type")?;
            return Ok(self.generator.generate_from_value(media.get("schema")));
        }
        // Swagger 2.0 declares non-body parameter types inline.
        if raw.get("type").is_some() {
            return Ok(self.generator.generate_from_value(Some(raw)));
        }
        Ok(Value::String(String::new()))
    }

    fn openapi_body(&mut self, operation: &'a Value) -> Option<(String, Body)> {
        let mut request_body = operation.get("requestBody")?;
        if let Some(pointer) = request_body.get("$ref").and_then(Value::as_str) {
            request_body = match resolve_local(self.document, pointer) {
                Some(target) => target,
                None => {
                    warn!(pointer, "Skipping unresolvable request body reference");
                    return None;
                }
            };
        }

        let (content_type, media) = request_body.get("content")?.as_object()?.iter().next()?;
        let example = self.generator.generate_from_value(media.get("schema"));
        Some((content_type.clone(), raw_body(&example, content_type)))
    }

    fn swagger_body(&mut self, operation: &Value, param: &Value) -> (String, Body) {
        let content_type = first_str(operation, "consumes")
            .or_else(|| first_str(self.document, "consumes"))
            .unwrap_or_else(|| "application/json".to_string());
        let example = self.generator.generate_from_value(param.get("schema"));
        let body = raw_body(&example, &content_type);
        (content_type, body)
    }
}

/// Converts `document` with `options` in one call.
pub fn convert_document(document: &Value, options: ConvertOptions) -> AppResult<Conversion> {
    Ok(CollectionBuilder::new(document, options)?.convert())
}

/// Groups items into folders by tag, in order of first appearance.
///
/// Untagged items land in a trailing [`UNTAGGED_FOLDER`], omitted when empty.
pub fn organize_by_tags(items: Vec<(Option<String>, RequestItem)>) -> Vec<Folder> {
    let mut groups: IndexMap<String, Vec<RequestItem>> = IndexMap::new();
    let mut untagged = Vec::new();

    for (tag, item) in items {
        match tag {
            Some(tag) => groups.entry(tag).or_default().push(item),
            None => untagged.push(item),
        }
    }

    let mut folders: Vec<Folder> = groups
        .into_iter()
        .map(|(name, item)| Folder { name, item })
        .collect();
    if !untagged.is_empty() {
        folders.push(Folder {
            name: UNTAGGED_FOLDER.to_string(),
            item: untagged,
        });
    }
    folders
}

fn raw_body(example: &Value, content_type: &str) -> Body {
    let raw = serde_json::to_string_pretty(example).unwrap_or_default();
    Body::raw(raw, content_type)
}

/// Strings are used verbatim; everything else as compact JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(String::from)
}

fn first_str(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .and_then(|list| list.first())
        .and_then(Value::as_str)
        .map(String::from)
}

fn first_tag(operation: &Value) -> Option<String> {
    first_str(operation, "tags")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(name: &str) -> RequestItem {
        RequestItem {
            name: name.to_string(),
            request: Request {
                method: "GET".into(),
                header: vec![],
                url: RequestUrl {
                    raw: String::new(),
                    protocol: String::new(),
                    host: vec![],
                    path: vec![],
                    query: vec![],
                },
                description: String::new(),
                body: None,
            },
            response: vec![],
        }
    }

    #[test]
    fn test_organize_by_tags_keeps_first_seen_order() {
        let folders = organize_by_tags(vec![
            (Some("pets".into()), item("a")),
            (None, item("b")),
            (Some("store".into()), item("c")),
            (Some("pets".into()), item("d")),
        ]);
        let shape: Vec<(String, Vec<String>)> = folders
            .iter()
            .map(|f| (f.name.clone(), f.item.iter().map(|i| i.name.clone()).collect()))
            .collect();
        assert_eq!(
            shape,
            vec![
                ("pets".to_string(), vec!["a".to_string(), "d".to_string()]),
                ("store".to_string(), vec!["c".to_string()]),
                ("Other".to_string(), vec!["b".to_string()]),
            ]
        );
    }

    #[test]
    fn test_organize_without_untagged_has_no_other_folder() {
        let folders = organize_by_tags(vec![(Some("pets".into()), item("a"))]);
        assert_eq!(folders.len(), 1);
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&json!("abc")), "abc");
        assert_eq!(render_value(&json!(0)), "0");
        assert_eq!(render_value(&json!(["string"])), r#"["string"]"#);
    }

    #[test]
    fn test_request_url_includes_base_path() {
        let doc = json!({ "servers": [{ "url": "https://api.example.com:8443/v1" }], "paths": {} });
        let builder = CollectionBuilder::new(&doc, ConvertOptions::default()).unwrap();
        let url = builder.request_url("/pets/{petId}");
        assert_eq!(url.raw, "https://api.example.com:8443/v1/pets/{petId}");
        assert_eq!(url.protocol, "https");
        assert_eq!(url.host, vec!["api", "example", "com:8443"]);
        assert_eq!(url.path, vec!["v1", "pets", "{petId}"]);
    }

    #[test]
    fn test_request_url_without_base() {
        let doc = json!({ "paths": {} });
        let builder = CollectionBuilder::new(&doc, ConvertOptions::default()).unwrap();
        let url = builder.request_url("/health");
        assert_eq!(url.raw, "/health");
        assert!(url.host.is_empty());
        assert_eq!(url.path, vec!["health"]);
    }

    #[test]
    fn test_operation_parameters_override_path_parameters() {
        let doc = json!({
            "openapi": "3.0.0",
            "components": { "parameters": { "Limit": { "name": "limit", "in": "query", "schema": { "type": "integer", "default": 20 } } } },
            "paths": {
                "/pets": {
                    "parameters": [
                        { "name": "limit", "in": "query", "schema": { "type": "integer" } },
                        { "name": "X-Trace", "in": "header", "required": true, "schema": { "type": "string", "format": "uuid" } }
                    ],
                    "get": { "parameters": [{ "$ref": "#/components/parameters/Limit" }] }
                }
            }
        });
        let conversion = convert_document(&doc, ConvertOptions::default()).unwrap();
        let request = &conversion.collection.item[0].item[0].request;
        assert_eq!(request.url.query.len(), 1);
        assert_eq!(request.url.query[0].value, "20");
        assert!(request.url.query[0].disabled);
        assert_eq!(request.header[0].key, "X-Trace");
        assert_eq!(request.header[0].value, "uuid");
        assert_eq!(request.header[0].disabled, Some(false));
    }

    #[test]
    fn test_non_method_keys_are_not_operations() {
        let doc = json!({
            "paths": { "/a": { "summary": "shared", "x-internal": true, "get": {}, "POST": {} } }
        });
        let conversion = convert_document(&doc, ConvertOptions::default()).unwrap();
        assert_eq!(conversion.report.operations, 2);
        let names: Vec<&str> = conversion.collection.item[0]
            .item
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["GET /a", "POST /a"]);
    }

    #[test]
    fn test_parameter_values_and_referenced_request_body() {
        let doc = json!({
            "openapi": "3.0.0",
            "components": {
                "schemas": { "N": { "type": "object", "properties": { "n": { "type": "integer" } } } },
                "requestBodies": {
                    "NBody": { "content": { "application/json": { "schema": { "$ref": "#/components/schemas/N" } } } }
                }
            },
            "paths": {
                "/search": {
                    "post": {
                        "parameters": [
                            { "name": "q", "in": "query", "example": "ex", "schema": { "type": "string" } },
                            { "name": "c", "in": "query", "content": { "application/json": { "schema": { "type": "boolean" } } } },
                            { "$ref": "#/components/parameters/Missing" },
                            { "in": "query", "schema": { "type": "string" } }
                        ],
                        "requestBody": { "$ref": "#/components/requestBodies/NBody" }
                    }
                }
            }
        });
        let conversion = convert_document(&doc, ConvertOptions::default()).unwrap();
        assert_eq!(conversion.report.operations, 1);
        assert_eq!(conversion.report.parameter_fallbacks, 0);

        let request = &conversion.collection.item[0].item[0].request;
        let query: Vec<(&str, &str)> = request
            .url
            .query
            .iter()
            .map(|q| (q.key.as_str(), q.value.as_str()))
            .collect();
        assert_eq!(query, vec![("q", "ex"), ("c", "false")]);

        let body = request.body.as_ref().unwrap();
        assert_eq!(body.raw, "{\n  \"n\": 0\n}");
        assert_eq!(request.header.last().unwrap().key, "Content-Type");
        assert_eq!(request.header.last().unwrap().value, "application/json");
    }

    #[test]
    fn test_unmarked_document_accepts_body_parameter() {
        let doc = json!({
            "paths": {
                "/pets": {
                    "post": {
                        "parameters": [{
                            "name": "pet",
                            "in": "body",
                            "schema": { "type": "object", "properties": { "name": { "type": "string" } } }
                        }]
                    }
                }
            }
        });
        let conversion = convert_document(&doc, ConvertOptions::default()).unwrap();
        let request = &conversion.collection.item[0].item[0].request;
        let body = request.body.as_ref().unwrap();
        assert_eq!(body.raw, "{\n  \"name\": \"string\"\n}");
        assert_eq!(body.options.raw.language, "json");
    }

    #[test]
    fn test_rejects_non_mapping_document() {
        let doc = json!([1, 2, 3]);
        assert!(CollectionBuilder::new(&doc, ConvertOptions::default()).is_err());
    }
}
