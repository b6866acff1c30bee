#![deny(missing_docs)]

//! # OpenAPI Schema Handling
//!
//! - **document**: Decoding and document-level metadata.
//! - **schema**: The tagged schema model.
//! - **pointer**: `$ref` parsing and local JSON Pointer lookup.
//! - **dictionary**: Named schema definitions of one document.
//! - **registry**: Circular reference bookkeeping.
//! - **resolver**: Bounded, cycle-aware reference resolution.

pub mod dictionary;
pub mod document;
pub mod pointer;
pub mod registry;
pub mod resolver;
pub mod schema;

pub use dictionary::{LookupError, SchemaDictionary};
pub use document::{parse_document, SpecVersion};
pub use registry::CircularRegistry;
pub use resolver::{Diagnostic, ReferenceResolver, Resolution, DEFAULT_MAX_DEPTH};
pub use schema::{ArraySchema, ObjectSchema, PrimitiveKind, PrimitiveSchema, SchemaNode};
