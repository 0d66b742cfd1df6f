//! Metadata-driven SQL generation
//!
//! Builds CREATE TABLE, INSERT, SELECT, UPDATE and DELETE statements from an
//! [`Entity`]'s descriptor. Nothing here is specific to any entity type.

use crate::config::GeneratorConfig;
use crate::entity::{Entity, EntityDescriptor, describe, values_of};
use crate::error::{Result, SqlGenError};
use crate::sql::literal::format_literal;
use crate::sql::sanitize::{quote_identifier, validate_identifier};
use crate::types::FieldValue;

/// SQL generator driven by entity descriptors
#[derive(Debug, Clone, Copy)]
pub struct MetadataSqlGenerator<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> MetadataSqlGenerator<'a> {
    /// Create a new generator with the given configuration
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generate CREATE TABLE with one `column TYPE` pair per persisted field
    ///
    /// An entity with no persisted fields yields `CREATE TABLE t ();`.
    pub fn generate_create<E: Entity>(&self) -> Result<String> {
        let descriptor = describe::<E>()?;
        let table = self.table(descriptor)?;

        let columns = descriptor
            .fields
            .iter()
            .map(|f| Ok(f.column_definition_as(&self.identifier(&f.column_name)?)))
            .collect::<Result<Vec<_>>>()?;

        let sql = format!("CREATE TABLE {} ({});", table, columns.join(", "));
        tracing::debug!(entity = %descriptor.entity_name, %sql, "generated CREATE TABLE");
        Ok(sql)
    }

    /// Generate INSERT listing every persisted column and its value
    pub fn generate_insert<E: Entity>(&self, entity: &E) -> Result<String> {
        let descriptor = describe::<E>()?;
        let table = self.table(descriptor)?;
        let values = values_of(entity)?;

        let columns = self.column_list(descriptor)?;
        let literals: Vec<String> = values.iter().map(|v| self.literal(v)).collect();

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({});",
            table,
            columns,
            literals.join(", ")
        );
        tracing::debug!(entity = %descriptor.entity_name, %sql, "generated INSERT");
        Ok(sql)
    }

    /// Generate SELECT of every persisted column, without a WHERE clause
    pub fn generate_select<E: Entity>(&self) -> Result<String> {
        let descriptor = describe::<E>()?;
        let table = self.table(descriptor)?;

        let sql = format!("SELECT {} FROM {};", self.column_list(descriptor)?, table);
        tracing::debug!(entity = %descriptor.entity_name, %sql, "generated SELECT");
        Ok(sql)
    }

    /// Generate UPDATE of every non-key column, keyed by the primary key
    ///
    /// Fields carrying the primary-key marker are left out of the SET clause.
    /// The WHERE column comes from the configured
    /// [`PrimaryKeyStrategy`](crate::config::PrimaryKeyStrategy); with the
    /// default `FirstField` it is the first declared field even when another
    /// field carries the marker.
    pub fn generate_update<E: Entity>(&self, entity: &E) -> Result<String> {
        let descriptor = describe::<E>()?;
        let table = self.table(descriptor)?;
        let values = values_of(entity)?;
        let (key_pos, key_field) = descriptor.primary_key(self.config.primary_key)?;

        let assignments = descriptor
            .fields
            .iter()
            .zip(&values)
            .filter(|(f, _)| !f.primary_key)
            .map(|(f, v)| {
                Ok(format!(
                    "{} = {}",
                    self.identifier(&f.column_name)?,
                    self.literal(v)
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        let sql = format!(
            "UPDATE {} SET {} WHERE {} = {};",
            table,
            assignments.join(", "),
            self.identifier(&key_field.column_name)?,
            self.literal(&values[key_pos])
        );
        tracing::debug!(entity = %descriptor.entity_name, %sql, "generated UPDATE");
        Ok(sql)
    }

    /// Generate DELETE of the row whose primary key equals `id`
    pub fn generate_delete<E: Entity>(&self, id: impl Into<FieldValue>) -> Result<String> {
        let descriptor = describe::<E>()?;
        let table = self.table(descriptor)?;
        let (_, key_field) = descriptor.primary_key(self.config.primary_key)?;

        let sql = format!(
            "DELETE FROM {} WHERE {} = {};",
            table,
            self.identifier(&key_field.column_name)?,
            self.literal(&id.into())
        );
        tracing::debug!(entity = %descriptor.entity_name, %sql, "generated DELETE");
        Ok(sql)
    }

    fn table(&self, descriptor: &EntityDescriptor) -> Result<String> {
        self.identifier(descriptor.table()?)
    }

    fn column_list(&self, descriptor: &EntityDescriptor) -> Result<String> {
        let columns = descriptor
            .column_names()
            .map(|c| self.identifier(c))
            .collect::<Result<Vec<_>>>()?;
        Ok(columns.join(", "))
    }

    fn identifier(&self, name: &str) -> Result<String> {
        render_identifier(self.config, name)
    }

    fn literal(&self, value: &FieldValue) -> String {
        format_literal(value, self.config.escape_literals)
    }
}

/// Apply the configured validation and quoting to a table or column name
pub(crate) fn render_identifier(config: &GeneratorConfig, name: &str) -> Result<String> {
    if config.validate_identifiers {
        validate_identifier(name).map_err(SqlGenError::Validation)?;
    }
    if config.quote_identifiers {
        Ok(quote_identifier(name))
    } else {
        Ok(name.to_string())
    }
}

/// [`MetadataSqlGenerator::generate_create`] with the default configuration
pub fn generate_create<E: Entity>() -> Result<String> {
    MetadataSqlGenerator::new(&GeneratorConfig::default()).generate_create::<E>()
}

/// [`MetadataSqlGenerator::generate_insert`] with the default configuration
pub fn generate_insert<E: Entity>(entity: &E) -> Result<String> {
    MetadataSqlGenerator::new(&GeneratorConfig::default()).generate_insert(entity)
}

/// [`MetadataSqlGenerator::generate_select`] with the default configuration
pub fn generate_select<E: Entity>() -> Result<String> {
    MetadataSqlGenerator::new(&GeneratorConfig::default()).generate_select::<E>()
}

/// [`MetadataSqlGenerator::generate_update`] with the default configuration
pub fn generate_update<E: Entity>(entity: &E) -> Result<String> {
    MetadataSqlGenerator::new(&GeneratorConfig::default()).generate_update(entity)
}

/// [`MetadataSqlGenerator::generate_delete`] with the default configuration
pub fn generate_delete<E: Entity>(id: impl Into<FieldValue>) -> Result<String> {
    MetadataSqlGenerator::new(&GeneratorConfig::default()).generate_delete::<E>(id)
}
