#![deny(missing_docs)]

//! # Postman Output
//!
//! - **models**: Serde model of the collection document.
//! - **builder**: Operation-to-request mapping and tag grouping.

pub mod builder;
pub mod models;

pub use builder::{convert_document, CollectionBuilder, Conversion, ConversionReport};
pub use models::Collection;
