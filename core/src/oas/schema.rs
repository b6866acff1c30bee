#![deny(missing_docs)]

//! # Schema Definitions
//!
//! A closed, tagged model of the schema nodes the example generator understands.
//!
//! Parsing from raw JSON is total: every input maps onto one of the four variants.
//! Keywords outside direct property/array nesting (`allOf`, `oneOf`, `not`, ...)
//! are not interpreted; such nodes become untyped primitives that still carry
//! their `example` and `default`.

use indexmap::IndexMap;
use serde_json::{json, Map, Value};

/// The declared type of a primitive schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// `type: string`
    String,
    /// `type: number`
    Number,
    /// `type: integer`
    Integer,
    /// `type: boolean`
    Boolean,
    /// `type: null`
    Null,
    /// A `type` tag outside the known set (e.g. `file` in Swagger 2.0).
    Unknown(String),
    /// No usable `type` at all.
    Untyped,
}

impl PrimitiveKind {
    fn from_tag(tag: &str) -> Self {
        match tag {
            "string" => Self::String,
            "number" => Self::Number,
            "integer" => Self::Integer,
            "boolean" => Self::Boolean,
            "null" => Self::Null,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The `type` tag for this kind, `None` when untyped.
    pub fn as_tag(&self) -> Option<&str> {
        match self {
            Self::String => Some("string"),
            Self::Number => Some("number"),
            Self::Integer => Some("integer"),
            Self::Boolean => Some("boolean"),
            Self::Null => Some("null"),
            Self::Unknown(tag) => Some(tag.as_str()),
            Self::Untyped => None,
        }
    }
}

/// A leaf schema.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveSchema {
    /// Declared type.
    pub kind: PrimitiveKind,
    /// Optional `format` hint (`date`, `uuid`, ...).
    pub format: Option<String>,
    /// Explicit `example`.
    pub example: Option<Value>,
    /// Explicit `default`.
    pub default: Option<Value>,
}

/// An object schema with ordered properties.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    /// Property name to schema, in declaration order.
    pub properties: IndexMap<String, SchemaNode>,
    /// Explicit `example`.
    pub example: Option<Value>,
    /// Explicit `default`.
    pub default: Option<Value>,
}

/// An array schema with a single `items` slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArraySchema {
    /// Element schema, if declared.
    pub items: Option<Box<SchemaNode>>,
    /// Explicit `example`.
    pub example: Option<Value>,
    /// Explicit `default`.
    pub default: Option<Value>,
}

/// A schema definition node.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// String, number, integer, boolean, null or untyped leaf.
    Primitive(PrimitiveSchema),
    /// `type: object`.
    Object(ObjectSchema),
    /// `type: array`.
    Array(ArraySchema),
    /// A `$ref` pointer into the schema dictionary.
    Reference(String),
}

impl SchemaNode {
    /// Parses a raw JSON schema node. Never fails.
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::Primitive(PrimitiveSchema {
                kind: PrimitiveKind::Untyped,
                format: None,
                example: None,
                default: None,
            });
        };

        if let Some(pointer) = map.get("$ref").and_then(Value::as_str) {
            return Self::Reference(pointer.to_string());
        }

        let example = annotation(map, "example");
        let default = annotation(map, "default");

        match declared_type(map).as_deref() {
            Some("object") => Self::Object(ObjectSchema {
                properties: parse_properties(map),
                example,
                default,
            }),
            Some("array") => Self::Array(ArraySchema {
                items: parse_items(map),
                example,
                default,
            }),
            Some(tag) => Self::Primitive(PrimitiveSchema {
                kind: PrimitiveKind::from_tag(tag),
                format: map.get("format").and_then(Value::as_str).map(String::from),
                example,
                default,
            }),
            // Untagged nodes are still shaped by their structural keywords.
            None if map.get("properties").is_some_and(Value::is_object) => {
                Self::Object(ObjectSchema {
                    properties: parse_properties(map),
                    example,
                    default,
                })
            }
            None if map.get("items").is_some_and(Value::is_object) => Self::Array(ArraySchema {
                items: parse_items(map),
                example,
                default,
            }),
            None => Self::Primitive(PrimitiveSchema {
                kind: PrimitiveKind::Untyped,
                format: None,
                example,
                default,
            }),
        }
    }

    /// Builds the placeholder string schema substituted when resolution cannot proceed.
    pub fn sentinel(message: impl Into<String>) -> Self {
        Self::Primitive(PrimitiveSchema {
            kind: PrimitiveKind::String,
            format: None,
            example: Some(Value::String(message.into())),
            default: None,
        })
    }

    /// The explicit `example`, if any. References carry none.
    pub fn example(&self) -> Option<&Value> {
        match self {
            Self::Primitive(p) => p.example.as_ref(),
            Self::Object(o) => o.example.as_ref(),
            Self::Array(a) => a.example.as_ref(),
            Self::Reference(_) => None,
        }
    }

    /// The explicit `default`, if any. References carry none.
    pub fn default_value(&self) -> Option<&Value> {
        match self {
            Self::Primitive(p) => p.default.as_ref(),
            Self::Object(o) => o.default.as_ref(),
            Self::Array(a) => a.default.as_ref(),
            Self::Reference(_) => None,
        }
    }

    /// Renders the node back to JSON Schema form.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        match self {
            Self::Reference(pointer) => return json!({ "$ref": pointer }),
            Self::Primitive(p) => {
                if let Some(tag) = p.kind.as_tag() {
                    map.insert("type".into(), Value::String(tag.to_string()));
                }
                if let Some(format) = &p.format {
                    map.insert("format".into(), Value::String(format.clone()));
                }
                insert_annotations(&mut map, &p.example, &p.default);
            }
            Self::Object(o) => {
                map.insert("type".into(), json!("object"));
                let properties: Map<String, Value> = o
                    .properties
                    .iter()
                    .map(|(name, node)| (name.clone(), node.to_value()))
                    .collect();
                map.insert("properties".into(), Value::Object(properties));
                insert_annotations(&mut map, &o.example, &o.default);
            }
            Self::Array(a) => {
                map.insert("type".into(), json!("array"));
                if let Some(items) = &a.items {
                    map.insert("items".into(), items.to_value());
                }
                insert_annotations(&mut map, &a.example, &a.default);
            }
        }
        Value::Object(map)
    }
}

/// `example: null` is treated as absent.
fn annotation(map: &Map<String, Value>, key: &str) -> Option<Value> {
    map.get(key).filter(|v| !v.is_null()).cloned()
}

/// Reads `type`, accepting the OpenAPI 3.1 list form (`["string", "null"]`).
fn declared_type(map: &Map<String, Value>) -> Option<String> {
    match map.get("type")? {
        Value::String(tag) => Some(tag.clone()),
        Value::Array(tags) => {
            let tags: Vec<&str> = tags.iter().filter_map(Value::as_str).collect();
            tags.iter()
                .find(|t| **t != "null")
                .or_else(|| tags.first())
                .map(|t| t.to_string())
        }
        _ => None,
    }
}

fn parse_properties(map: &Map<String, Value>) -> IndexMap<String, SchemaNode> {
    map.get("properties")
        .and_then(Value::as_object)
        .map(|props| {
            props
                .iter()
                .map(|(name, node)| (name.clone(), SchemaNode::from_value(node)))
                .collect()
        })
        .unwrap_or_default()
}

fn parse_items(map: &Map<String, Value>) -> Option<Box<SchemaNode>> {
    map.get("items")
        .filter(|v| v.is_object())
        .map(|items| Box::new(SchemaNode::from_value(items)))
}

fn insert_annotations(map: &mut Map<String, Value>, example: &Option<Value>, default: &Option<Value>) {
    if let Some(example) = example {
        map.insert("example".into(), example.clone());
    }
    if let Some(default) = default {
        map.insert("default".into(), default.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference_ignores_siblings() {
        let node = SchemaNode::from_value(&json!({
            "$ref": "#/components/schemas/User",
            "description": "ignored"
        }));
        assert_eq!(node, SchemaNode::Reference("#/components/schemas/User".into()));
    }

    #[test]
    fn test_parse_object_preserves_property_order() {
        let node = SchemaNode::from_value(&json!({
            "type": "object",
            "properties": {
                "zeta": { "type": "string" },
                "alpha": { "type": "integer" },
                "mid": { "$ref": "#/definitions/Mid" }
            }
        }));
        let SchemaNode::Object(obj) = node else {
            panic!("expected object");
        };
        let names: Vec<&str> = obj.properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(
            obj.properties["mid"],
            SchemaNode::Reference("#/definitions/Mid".to_string())
        );
    }

    #[test]
    fn test_parse_nullable_type_list() {
        let node = SchemaNode::from_value(&json!({ "type": ["null", "integer"] }));
        match node {
            SchemaNode::Primitive(p) => assert_eq!(p.kind, PrimitiveKind::Integer),
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn test_untyped_properties_become_object() {
        let node = SchemaNode::from_value(&json!({ "properties": { "id": { "type": "integer" } } }));
        assert!(matches!(node, SchemaNode::Object(_)));
    }

    #[test]
    fn test_composition_is_untyped() {
        let node = SchemaNode::from_value(&json!({ "oneOf": [{ "type": "string" }] }));
        match node {
            SchemaNode::Primitive(p) => assert_eq!(p.kind, PrimitiveKind::Untyped),
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn test_unknown_tag_is_kept() {
        let node = SchemaNode::from_value(&json!({ "type": "file" }));
        assert_eq!(node.to_value(), json!({ "type": "file" }));
    }

    #[test]
    fn test_null_example_is_absent() {
        let node = SchemaNode::from_value(&json!({ "type": "string", "example": null }));
        assert!(node.example().is_none());
    }

    #[test]
    fn test_sentinel_renders_as_string_schema() {
        let node = SchemaNode::sentinel("[Circular reference to: #/definitions/A]");
        assert_eq!(
            node.to_value(),
            json!({ "type": "string", "example": "[Circular reference to: #/definitions/A]" })
        );
    }

    #[test]
    fn test_non_object_input_is_untyped() {
        let node = SchemaNode::from_value(&json!("not a schema"));
        assert_eq!(node.to_value(), json!({}));
    }
}
