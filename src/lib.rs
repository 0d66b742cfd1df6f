//! # entity-sqlgen
//!
//! Metadata-driven SQL statement generation.
//!
//! Entity types describe themselves once (table name, ordered persisted
//! fields, primary-key marker) and the generators turn any entity into
//! CREATE TABLE, INSERT, SELECT, UPDATE and DELETE statements without any
//! per-entity generator code. A second, explicit generator produces the same
//! statement shapes from caller-supplied column maps.
//!
//! Statements are plain text with values interpolated directly. Nothing is
//! executed and, unless enabled in [`GeneratorConfig`], nothing is escaped.
//!
//! ## Quick Start
//!
//! ```rust
//! use entity_sqlgen::{generate_create, generate_delete, generate_insert, generate_update, impl_entity};
//!
//! struct Car {
//!     id: i32,
//!     model: String,
//!     price: f64,
//! }
//!
//! impl_entity! {
//!     #[table = "cars"]
//!     Car {
//!         id: "id" [primary_key],
//!         model: "model",
//!         price: "price",
//!     }
//! }
//!
//! # fn main() -> entity_sqlgen::Result<()> {
//! let mut car = Car { id: 1, model: "Toyota".into(), price: 25000.0 };
//!
//! assert_eq!(
//!     generate_create::<Car>()?,
//!     "CREATE TABLE cars (id INT, model VARCHAR(255), price DOUBLE);"
//! );
//! assert_eq!(
//!     generate_insert(&car)?,
//!     "INSERT INTO cars (id, model, price) VALUES (1, 'Toyota', 25000.0);"
//! );
//!
//! car.model = "Honda".into();
//! car.price = 27000.0;
//! assert_eq!(
//!     generate_update(&car)?,
//!     "UPDATE cars SET model = 'Honda', price = 27000.0 WHERE id = 1;"
//! );
//! assert_eq!(generate_delete::<Car>(1)?, "DELETE FROM cars WHERE id = 1;");
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use entity_sqlgen::{GeneratorConfig, MetadataSqlGenerator, PrimaryKeyStrategy};
//!
//! let config = GeneratorConfig::builder()
//!     .primary_key(PrimaryKeyStrategy::Marked) // Trust the primary-key marker
//!     .escape_literals(true)                   // 'O''Brien' instead of 'O'Brien'
//!     .quote_identifiers(true)                 // "cars" instead of cars
//!     .validate_identifiers(true)              // Reject reserved or malformed names
//!     .build();
//! let generator = MetadataSqlGenerator::new(&config);
//! # let _ = generator;
//! ```

pub mod config;
pub mod entity;
pub mod error;
pub mod sql;
pub mod types;

// Re-export main types for convenience
pub use config::{GeneratorConfig, GeneratorConfigBuilder, PrimaryKeyStrategy};
pub use entity::{Entity, EntityDescriptor, describe, fields_of, row_of, values_of};
pub use error::{Result, SqlGenError};
pub use types::{FieldDescriptor, FieldValue, SemanticType, ToFieldValue};

pub use sql::explicit::ExplicitSqlGenerator;
pub use sql::metadata::{
    MetadataSqlGenerator, generate_create, generate_delete, generate_insert, generate_select,
    generate_update,
};
pub use sql::{format_literal, quote_identifier, validate_identifier};
