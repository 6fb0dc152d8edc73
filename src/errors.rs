//! Error types for the ragmate retrieval engine
//!
//! Initialization failures (model load, empty knowledge base) are fatal:
//! the pipeline refuses to construct, so a half-initialized service can
//! never serve queries.

use thiserror::Error;

/// Main error type for the retrieval engine
#[derive(Error, Debug)]
pub enum RagError {
    /// Embedding model failed to download or load at startup
    #[error("Embedding model failed to load: {0}")]
    ModelLoad(String),

    /// Knowledge base produced zero documents
    #[error("Knowledge base is empty; refusing to build an index with no documents")]
    EmptyKnowledgeBase,

    /// Tokenization or forward-pass failure while embedding
    #[error("Embedding failed: {0}")]
    Embedding(String),

    /// Vector dimensionality does not match the index
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Search called with k < 1
    #[error("Invalid top-k: {k} (must be >= 1)")]
    InvalidTopK { k: usize },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for retrieval operations
pub type Result<T> = std::result::Result<T, RagError>;

/// Convert anyhow errors from engine internals
impl From<anyhow::Error> for RagError {
    fn from(err: anyhow::Error) -> Self {
        RagError::Embedding(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = RagError::DimensionMismatch {
            expected: 384,
            actual: 3,
        };
        assert!(err.to_string().contains("384"));
        assert!(err.to_string().contains("3"));
    }

    #[test]
    fn test_invalid_top_k_display() {
        let err = RagError::InvalidTopK { k: 0 };
        assert!(err.to_string().contains("must be >= 1"));
    }
}
