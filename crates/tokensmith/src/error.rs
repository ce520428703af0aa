//! Errors for the text-decoding surface.
//!
//! Theme conversion and style resolution never fail; they report problems
//! through [`Diagnostics`](crate::Diagnostics). Only turning raw JSON or
//! YAML text into a value can fail, and that is what [`Error`] covers.

/// Error returned when theme or configuration text cannot be decoded.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input was not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The input was not valid YAML.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for decoding operations.
pub type Result<T> = std::result::Result<T, Error>;
