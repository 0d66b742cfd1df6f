//! SQL utilities
//!
//! Provides statement generation, literal formatting, and identifier handling.

pub mod explicit;
pub mod literal;
pub mod metadata;
pub mod sanitize;

pub use explicit::ExplicitSqlGenerator;
pub use literal::format_literal;
pub use metadata::MetadataSqlGenerator;
pub use sanitize::{SQL_RESERVED_WORDS, quote_identifier, validate_identifier};
