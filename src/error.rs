//! Error types and handling.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed (connection, timeout, body decoding)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Session missing, expired or rejected by the API
    #[error("Not authenticated: please log in again")]
    Unauthorized,

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (local form check or API 400/422)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Data parsing error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Excel export error
    #[error("Export error: {0}")]
    Export(String),

    /// Printable document error
    #[error("Print error: {0}")]
    Print(String),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a parse error with message
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a config error with message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error with message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error with message
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Whether the error means the session is no longer valid.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        Self::Export(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = AppError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error (500): boom");
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(AppError::Unauthorized.is_unauthorized());
        assert!(!AppError::not_found("sheet 4").is_unauthorized());
    }
}
