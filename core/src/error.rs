//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Schema resolution and example generation never produce these errors; they
//! degrade to sentinel values instead. `AppError` covers loading and shaping the
//! document around them.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The source document could not be decoded as JSON or YAML.
    /// Created explicitly to keep `From<String>` mapped to `General`.
    #[from(ignore)]
    #[display("Parse Error: {_0}")]
    Parse(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
