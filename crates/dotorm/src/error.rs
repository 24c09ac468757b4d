//! Error types for dotorm

use thiserror::Error;

/// Result type alias for dotorm operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Error types for registry construction and statement building
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrmError {
    /// Statement arguments failed validation; no SQL was produced
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity name not present in the registry
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    /// Entity declarations are inconsistent
    #[error("Schema error: {0}")]
    Schema(String),
}

impl OrmError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an unknown entity error
    pub fn is_unknown_entity(&self) -> bool {
        matches!(self, Self::UnknownEntity(_))
    }
}
