#![deny(missing_docs)]

//! # S2P Core
//!
//! Core library converting OpenAPI / Swagger documents into Postman collections.
//!
//! The interesting part is the schema side: [`oas::ReferenceResolver`] expands
//! `$ref` graphs with cycle detection and a depth bound, and [`ExampleGenerator`]
//! turns the result into example payloads. Neither can fail; problems degrade to
//! sentinel values and are logged through `tracing`.

/// Shared error types.
pub mod error;

/// Run-level options.
pub mod config;

/// OpenAPI (OAS) document and schema handling.
pub mod oas;

/// Example payload generation.
pub mod example;

/// Postman collection model and builder.
pub mod postman;

pub use config::ConvertOptions;
pub use error::{AppError, AppResult};
pub use example::ExampleGenerator;
pub use oas::{parse_document, CircularRegistry, ReferenceResolver, SchemaDictionary, SchemaNode};
pub use postman::{convert_document, Collection, CollectionBuilder, Conversion, ConversionReport};
