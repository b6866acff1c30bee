use s2p_core::example::DEPTH_EXCEEDED_MESSAGE;
use s2p_core::oas::Diagnostic;
use s2p_core::{CircularRegistry, ExampleGenerator, ReferenceResolver, SchemaDictionary};
use serde_json::{json, Map, Value};

fn dictionary(definitions: Value) -> SchemaDictionary {
    SchemaDictionary::from_document(&json!({ "swagger": "2.0", "definitions": definitions }))
}

/// Every schema references every other schema, including itself.
fn dense_cycles(size: usize) -> Value {
    let mut definitions = Map::new();
    for i in 0..size {
        let mut properties = Map::new();
        for j in 0..size {
            properties.insert(format!("to{}", j), json!({ "$ref": format!("#/definitions/N{}", j) }));
        }
        properties.insert(
            "list".into(),
            json!({ "type": "array", "items": { "$ref": format!("#/definitions/N{}", (i + 1) % size) } }),
        );
        definitions.insert(
            format!("N{}", i),
            json!({ "type": "object", "properties": properties }),
        );
    }
    Value::Object(definitions)
}

#[test]
fn test_dense_cyclic_dictionary_terminates() {
    let resolver = ReferenceResolver::new(dictionary(dense_cycles(3)));
    let mut generator = ExampleGenerator::new(resolver);

    for i in 0..3 {
        let value = generator.generate_from_value(Some(&json!({ "$ref": format!("#/definitions/N{}", i) })));
        assert!(value.is_object());
    }

    let found: Vec<&str> = generator.registry().iter().collect();
    assert_eq!(found.len(), 3);
}

#[test]
fn test_cycle_idempotence() {
    let resolver = ReferenceResolver::new(dictionary(json!({
        "A": { "type": "object", "properties": { "x": { "$ref": "#/definitions/A" } } }
    })));
    let mut registry = CircularRegistry::new();

    let first = resolver.resolve_root("#/definitions/A", &mut registry);
    let second = resolver.resolve_root("#/definitions/A", &mut registry);

    assert_eq!(first, second);
    assert_eq!(
        first.schema.to_value(),
        json!({
            "type": "object",
            "properties": {
                "x": { "type": "string", "example": "[Circular reference to: #/definitions/A]" }
            }
        })
    );
    assert_eq!(registry.into_vec(), vec!["#/definitions/A".to_string()]);
}

#[test]
fn test_non_cycle_revisit_generates_identically() {
    let resolver = ReferenceResolver::new(dictionary(json!({
        "A": {
            "type": "object",
            "properties": {
                "billing": { "$ref": "#/definitions/B" },
                "shipping": { "$ref": "#/components/schemas/B" }
            }
        },
        "B": { "type": "object", "properties": { "street": { "type": "string" }, "zip": { "type": "integer" } } }
    })));
    let mut generator = ExampleGenerator::new(resolver);

    let value = generator.generate_from_value(Some(&json!({ "$ref": "#/definitions/A" })));

    assert_eq!(value["billing"], json!({ "street": "string", "zip": 0 }));
    assert_eq!(value["billing"], value["shipping"]);
    assert!(generator.registry().is_empty());
}

#[test]
fn test_depth_exceeded_chain_still_returns() {
    let mut definitions = Map::new();
    for i in 0..25 {
        definitions.insert(
            format!("L{}", i),
            json!({ "type": "object", "properties": { "next": { "$ref": format!("#/definitions/L{}", i + 1) } } }),
        );
    }
    let resolver = ReferenceResolver::new(dictionary(Value::Object(definitions)));
    let mut registry = CircularRegistry::new();

    let resolution = resolver.resolve_root("#/definitions/L0", &mut registry);
    let mut node = resolution.schema.to_value();
    let mut levels = 0;
    while node["type"] == "object" {
        node = node["properties"]["next"].clone();
        levels += 1;
    }
    assert_eq!(levels, 10);
    assert_eq!(node["example"], "[Max depth exceeded: #/definitions/L10]");

    let mut generator = ExampleGenerator::new(resolver);
    let value = generator.generate_from_value(Some(&json!({ "$ref": "#/definitions/L0" })));
    let mut cursor = &value;
    while let Some(next) = cursor.get("next") {
        cursor = next;
    }
    assert!(
        cursor == &json!({ "error": DEPTH_EXCEEDED_MESSAGE })
            || cursor.as_str().is_some_and(|s| s.starts_with("[Max depth exceeded"))
    );
}

#[test]
fn test_unknown_pointer_is_reported() {
    let resolver = ReferenceResolver::new(dictionary(json!({})));
    let mut registry = CircularRegistry::new();

    let resolution = resolver.resolve_root("#/parameters/limit", &mut registry);

    assert!(matches!(resolution.diagnostic, Some(Diagnostic::Unresolved { .. })));
    assert_eq!(
        resolution.schema.example(),
        Some(&json!("[Unresolved reference: #/parameters/limit]"))
    );
}
