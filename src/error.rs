//! Error types for SQL generation

use thiserror::Error;

/// Errors that can occur while generating SQL
#[derive(Debug, Error)]
pub enum SqlGenError {
    #[error("Missing table metadata: {0} is not bound to a table")]
    MissingTableMetadata(String),

    #[error("Field access error on column '{column}': {reason}")]
    FieldAccess { column: String, reason: String },

    #[error("Empty column set: CREATE TABLE {0} requires at least one column")]
    EmptyColumnSet(String),

    #[error("Missing primary key: {0}")]
    MissingPrimaryKey(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SqlGenError {
    pub fn missing_table(type_name: impl Into<String>) -> Self {
        Self::MissingTableMetadata(type_name.into())
    }

    pub fn field_access(column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FieldAccess {
            column: column.into(),
            reason: reason.into(),
        }
    }

    pub fn missing_primary_key(msg: impl Into<String>) -> Self {
        Self::MissingPrimaryKey(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SqlGenError>;
