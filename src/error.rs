//! Error types for zen-export
//!
//! Every formatter and the orchestrator report failures through
//! [`ExportError`]. None of them panic: callers get a typed error they can
//! turn into a "export failed" notification and retry.

use thiserror::Error;

/// The main error type for export operations
#[derive(Error, Debug)]
pub enum ExportError {
    /// The requested format tag is not one of `csv`, `json`, `document`
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// The payload does not have a shape any formatter accepts
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Encoding the artifact failed
    #[error("Render error: {0}")]
    Render(String),

    /// Settings or path resolution errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl ExportError {
    /// Create a malformed input error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput(message.into())
    }

    /// Create a render error
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }

    /// Check if the caller asked for a format that does not exist
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, Self::UnsupportedFormat(_))
    }

    /// Check if this is an input shape error
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput(_))
    }

    /// Check if this is an encoding failure
    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render(_))
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        Self::Render(format!("CSV writer failed: {}", err))
    }
}

/// Result type alias for export operations
///
/// `Ok(())` is the success signal handed back to UI callers.
pub type ExportResult<T = ()> = Result<T, ExportError>;
