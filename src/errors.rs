//! Error types for the labforge engine.
//!
//! Invalid arguments and primary-area misses surface to the immediate caller;
//! nothing is retried internally because an identical query against an
//! unchanged snapshot returns identical results.

use thiserror::Error;

/// Main error type for catalog retrieval and lab synthesis
#[derive(Error, Debug)]
pub enum ForgeError {
    /// Malformed caller-supplied parameter (e.g. zero top_k or target_count)
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// Primary-area search returned no candidates during composition
    #[error("No catalog entries found for solution area '{area}'")]
    AreaNotFound { area: String },

    /// Catalog construction rejected a duplicate entry id
    #[error("Duplicate catalog entry id '{id}'")]
    DuplicateEntry { id: String },

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors with context
    #[error("Engine error: {0}")]
    Generic(String),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, ForgeError>;

/// Convert anyhow errors to ForgeError
impl From<anyhow::Error> for ForgeError {
    fn from(err: anyhow::Error) -> Self {
        ForgeError::Generic(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = ForgeError::InvalidArgument {
            name: "top_k",
            reason: "must be at least 1".to_string(),
        };
        assert!(err.to_string().contains("top_k"));
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_area_not_found_display() {
        let err = ForgeError::AreaNotFound {
            area: "Quantum".to_string(),
        };
        assert!(err.to_string().contains("Quantum"));
    }

    #[test]
    fn test_duplicate_entry_display() {
        let err = ForgeError::DuplicateEntry {
            id: "multi-agent-automation".to_string(),
        };
        assert!(err.to_string().contains("multi-agent-automation"));
    }
}
