//! Error types for promptdeck
//!
//! The stores themselves are deliberately forgiving (unknown ids are
//! no-ops, persistence is best-effort), so this type mostly covers the
//! edges where the core talks to the outside world: reading import
//! files, opening the storage directory, serializing collections.

use thiserror::Error;

/// Result type alias for promptdeck operations
pub type Result<T> = std::result::Result<T, DeckError>;

/// Main error type for promptdeck
#[derive(Debug, Error)]
pub enum DeckError {
    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Storage directory could not be resolved or created
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Import input was rejected before parsing (e.g. bad file extension)
    #[error("Import rejected: {0}")]
    ImportRejected(String),

    /// Generic error (catch-all)
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for DeckError {
    fn from(err: anyhow::Error) -> Self {
        DeckError::Other(err.to_string())
    }
}

impl From<String> for DeckError {
    fn from(err: String) -> Self {
        DeckError::Other(err)
    }
}

impl From<&str> for DeckError {
    fn from(err: &str) -> Self {
        DeckError::Other(err.to_string())
    }
}

impl DeckError {
    /// Get user-friendly error message for display in a host UI
    pub fn user_message(&self) -> String {
        match self {
            DeckError::ImportRejected(_) => {
                "Only .json or .csv files can be imported.".to_string()
            },
            DeckError::StorageError(msg) => {
                format!("Storage unavailable: {}", msg)
            },
            _ => self.to_string(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            DeckError::SerdeError(_) => "serialization",
            DeckError::IoError(_) => "io",
            DeckError::StorageError(_) => "storage",
            DeckError::ImportRejected(_) => "import",
            DeckError::Other(_) => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DeckError::ImportRejected("bad extension: .txt".to_string());
        assert_eq!(err.to_string(), "Import rejected: bad extension: .txt");
    }

    #[test]
    fn test_user_message() {
        let err = DeckError::ImportRejected(".txt".to_string());
        assert!(err.user_message().contains(".json or .csv"));
    }

    #[test]
    fn test_error_category() {
        assert_eq!(
            DeckError::StorageError("no data dir".to_string()).category(),
            "storage"
        );
        assert_eq!(
            DeckError::ImportRejected(".txt".to_string()).category(),
            "import"
        );
    }

    #[test]
    fn test_from_string() {
        let err: DeckError = "test error".into();
        assert_eq!(err.to_string(), "test error");
    }
}
