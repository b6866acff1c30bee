#![deny(missing_docs)]

//! # Schema Dictionary
//!
//! The named, reusable schema definitions of one source document.
//!
//! Swagger 2.0 keeps them under top-level `definitions`, OpenAPI 3.x under
//! `components.schemas`. Both sections feed one dictionary so that either pointer
//! syntax finds the same entry. Entries stay raw until looked up, so a broken entry
//! only fails the references that reach it.

use crate::oas::pointer::{parse_schema_pointer, PointerError};
use crate::oas::schema::SchemaNode;
use derive_more::Display;
use indexmap::IndexMap;
use serde_json::Value;

/// Why a lookup failed.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum LookupError {
    /// The pointer itself could not be parsed.
    #[display("invalid pointer: {_0}")]
    InvalidPointer(PointerError),
    /// No entry with that name.
    #[display("schema '{_0}' not found")]
    Missing(String),
    /// The entry exists but is not a schema object.
    #[display("schema '{_0}' is not an object")]
    NotAnObject(String),
}

impl std::error::Error for LookupError {}

/// Immutable name → schema mapping for one conversion run.
#[derive(Debug, Clone, Default)]
pub struct SchemaDictionary {
    entries: IndexMap<String, Value>,
}

impl SchemaDictionary {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects `definitions` and then `components.schemas` from a document.
    ///
    /// On a name clash the `components.schemas` entry wins.
    pub fn from_document(document: &Value) -> Self {
        let mut dictionary = Self::new();
        let sections = [
            document.get("definitions"),
            document.get("components").and_then(|c| c.get("schemas")),
        ];
        for section in sections.into_iter().flatten() {
            if let Some(map) = section.as_object() {
                for (name, schema) in map {
                    dictionary.insert(name.clone(), schema.clone());
                }
            }
        }
        dictionary
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, name: impl Into<String>, schema: Value) {
        self.entries.insert(name.into(), schema);
    }

    /// Raw entry by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the document declared no schemas.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the schema a `$ref` points at and parses it.
    pub fn lookup(&self, pointer: &str) -> Result<SchemaNode, LookupError> {
        let parsed = parse_schema_pointer(pointer).map_err(LookupError::InvalidPointer)?;
        let raw = self
            .entries
            .get(&parsed.name)
            .ok_or_else(|| LookupError::Missing(parsed.name.clone()))?;
        if !raw.is_object() {
            return Err(LookupError::NotAnObject(parsed.name));
        }
        Ok(SchemaNode::from_value(raw))
    }
}
