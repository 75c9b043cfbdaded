//! Error types for toolshelf
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Failure while fetching or decoding one of the two catalog resources.
///
/// Every variant names the resource path so the rendered failure message
/// tells the reader which document broke.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// Transport-level failure (DNS, connection refused, body read)
    #[error("network error fetching {path}: {message}")]
    Network { path: String, message: String },

    /// Server answered with a non-success status
    #[error("HTTP {status} fetching {path}")]
    HttpStatus { path: String, status: u16 },

    /// Local file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Body was not the JSON shape we expect
    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogLoadError {
    /// Path of the resource that failed.
    pub fn path(&self) -> &str {
        match self {
            Self::Network { path, .. }
            | Self::HttpStatus { path, .. }
            | Self::Io { path, .. }
            | Self::Parse { path, .. } => path,
        }
    }
}

/// All error types that can occur in toolshelf
#[derive(Debug, Error)]
pub enum ToolshelfError {
    /// Catalog or icon document could not be loaded
    #[error("Catalog load failed: {0}")]
    Load(#[from] CatalogLoadError),

    /// Expected element is absent from the document
    #[error("Element not found: #{0}")]
    MissingElement(String),

    /// Token is not one of light, dark, auto
    #[error("Invalid theme: {0}")]
    InvalidTheme(String),

    /// Preference store error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Category already present in the catalog
    #[error("Category already exists: {0}")]
    CategoryExists(String),

    /// Category not present in the catalog
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Required field was blank
    #[error("Field cannot be empty: {0}")]
    EmptyField(&'static str),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for toolshelf operations
pub type Result<T> = std::result::Result<T, ToolshelfError>;
