//! Unified error types for chargen_engine

use thiserror::Error;

/// Main error type for chargen_engine operations.
///
/// The codec is deliberately forgiving about binary payloads (short or
/// truncated ROM data is recovered silently) but strict about the
/// configuration describing how to interpret them.
#[derive(Debug, Error)]
pub enum EngineError {
    // === Transport Errors ===
    #[error("Malformed base64 data: {0}")]
    MalformedEncoding(#[from] base64::DecodeError),

    // === Configuration Errors ===
    #[error("Invalid glyph geometry: {field} must be at least 1, got {value}")]
    InvalidConfig { field: &'static str, value: usize },

    // === Preset Errors ===
    #[error("Unknown chip preset: {id}")]
    UnknownChip { id: String },

    #[error("Unknown system preset: {id}")]
    UnknownSystem { id: String },

    // === File Format Errors ===
    #[error("Unsupported format: {description}")]
    UnsupportedFormat { description: String },

    // === External Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("{0}")]
    Generic(String),
}

/// Result type alias for chargen_engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

// === Convenience constructors ===
impl EngineError {
    /// Create an error for a zero-sized glyph dimension
    pub fn invalid_config(field: &'static str, value: usize) -> Self {
        Self::InvalidConfig { field, value }
    }

    /// Create an error for unsupported file formats
    pub fn unsupported_format(description: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            description: description.into(),
        }
    }

    /// Create a generic error from any displayable type
    pub fn generic(msg: impl std::fmt::Display) -> Self {
        Self::Generic(msg.to_string())
    }
}
