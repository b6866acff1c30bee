#![deny(missing_docs)]

//! # Example Generation
//!
//! Produces a representative JSON value for a schema.
//!
//! Precedence is `example`, then `default`, then a placeholder derived from the
//! declared type. References are resolved through a fresh top-level resolution each
//! time they are met, and generation depth is counted separately from resolution
//! depth. Output is deterministic for a given schema and dictionary.

use crate::oas::registry::CircularRegistry;
use crate::oas::resolver::ReferenceResolver;
use crate::oas::schema::{ArraySchema, ObjectSchema, PrimitiveKind, PrimitiveSchema, SchemaNode};
use serde_json::{json, Map, Value};

/// Message placed in the diagnostic mapping when generation depth runs out.
pub const DEPTH_EXCEEDED_MESSAGE: &str = "Max recursion depth exceeded";

/// Example generator for one conversion run.
///
/// Owns the resolver and the circular-reference registry it feeds.
#[derive(Debug, Clone)]
pub struct ExampleGenerator {
    resolver: ReferenceResolver,
    registry: CircularRegistry,
    max_depth: usize,
}

impl ExampleGenerator {
    /// Creates a generator sharing the resolver's depth bound.
    pub fn new(resolver: ReferenceResolver) -> Self {
        let max_depth = resolver.max_depth();
        Self {
            resolver,
            registry: CircularRegistry::new(),
            max_depth,
        }
    }

    /// Circular pointers found so far.
    pub fn registry(&self) -> &CircularRegistry {
        &self.registry
    }

    /// Ends the run, handing back the registry.
    pub fn into_registry(self) -> CircularRegistry {
        self.registry
    }

    /// Generates from a raw JSON schema. Missing, `null` and empty schemas yield `{}`.
    pub fn generate_from_value(&mut self, schema: Option<&Value>) -> Value {
        match schema {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(Value::Object(map)) if map.is_empty() => Value::Object(Map::new()),
            Some(raw) => self.generate(&SchemaNode::from_value(raw), 0),
        }
    }

    /// Generates an example for `schema` at generation depth `depth`.
    pub fn generate(&mut self, schema: &SchemaNode, depth: usize) -> Value {
        if depth >= self.max_depth {
            return json!({ "error": DEPTH_EXCEEDED_MESSAGE });
        }

        if let Some(value) = schema.example().or(schema.default_value()) {
            return value.clone();
        }

        match schema {
            SchemaNode::Reference(pointer) => {
                let resolution = self.resolver.resolve_root(pointer, &mut self.registry);
                self.generate(&resolution.schema, depth + 1)
            }
            SchemaNode::Object(obj) => self.object(obj, depth),
            SchemaNode::Array(arr) => self.array(arr, depth),
            SchemaNode::Primitive(p) => placeholder(p),
        }
    }

    fn object(&mut self, obj: &ObjectSchema, depth: usize) -> Value {
        let mut map = Map::new();
        for (name, prop) in &obj.properties {
            let value = self.generate(prop, depth + 1);
            map.insert(name.clone(), value);
        }
        Value::Object(map)
    }

    fn array(&mut self, arr: &ArraySchema, depth: usize) -> Value {
        match &arr.items {
            Some(items) => Value::Array(vec![self.generate(items, depth + 1)]),
            None => Value::Array(Vec::new()),
        }
    }
}

fn placeholder(p: &PrimitiveSchema) -> Value {
    match &p.kind {
        PrimitiveKind::String => match &p.format {
            Some(format) => Value::String(format.clone()),
            None => Value::String("string".to_string()),
        },
        PrimitiveKind::Integer => json!(0),
        PrimitiveKind::Number => json!(0.0),
        PrimitiveKind::Boolean => Value::Bool(false),
        PrimitiveKind::Null | PrimitiveKind::Unknown(_) => Value::String(String::new()),
        PrimitiveKind::Untyped => Value::Object(Map::new()),
    }
}
