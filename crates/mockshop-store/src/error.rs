use mockshop_types::ValidationError;

/// Errors from entity store operations.
///
/// "Record not found" is not an error: lookups return `Option`, deletes
/// return `bool`. An absent document is initialized on first read.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Caller-supplied data violates a domain invariant.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The document does not have the required top-level shape.
    #[error("schema error: {0}")]
    Schema(String),

    /// The document exists but its content cannot be decoded.
    #[error("corrupt document {location}: {reason}")]
    Corruption { location: String, reason: String },

    /// I/O error from the underlying storage backend.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Encoding a document or record failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Short machine-readable name of the error class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Schema(_) => "schema",
            Self::Corruption { .. } => "corruption",
            Self::Storage(_) => "storage",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
