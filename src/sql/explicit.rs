//! Explicit SQL generation
//!
//! Same statement shapes as the metadata generator, but the caller supplies
//! table names, column maps and WHERE conditions directly. Conditions are
//! inserted verbatim.

use indexmap::IndexMap;

use crate::config::GeneratorConfig;
use crate::error::{Result, SqlGenError};
use crate::sql::literal::format_literal;
use crate::sql::metadata::render_identifier;
use crate::types::FieldValue;

/// SQL generator over caller-supplied column maps
#[derive(Debug, Clone, Copy)]
pub struct ExplicitSqlGenerator<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> ExplicitSqlGenerator<'a> {
    /// Create a new generator with the given configuration
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generate CREATE TABLE from column name to SQL type pairs
    ///
    /// Fails with `EmptyColumnSet` when `columns` is empty.
    pub fn create_table(&self, table: &str, columns: &IndexMap<String, String>) -> Result<String> {
        if columns.is_empty() {
            return Err(SqlGenError::EmptyColumnSet(table.to_string()));
        }

        let definitions = columns
            .iter()
            .map(|(name, sql_type)| Ok(format!("{} {}", self.identifier(name)?, sql_type)))
            .collect::<Result<Vec<_>>>()?;

        let sql = format!(
            "CREATE TABLE {} ({});",
            self.identifier(table)?,
            definitions.join(", ")
        );
        tracing::debug!(%sql, "generated CREATE TABLE");
        Ok(sql)
    }

    /// Generate INSERT from column name to value pairs, in map order
    pub fn insert(&self, table: &str, values: &IndexMap<String, FieldValue>) -> Result<String> {
        let columns = values
            .keys()
            .map(|name| self.identifier(name))
            .collect::<Result<Vec<_>>>()?;
        let literals: Vec<String> = values.values().map(|v| self.literal(v)).collect();

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({});",
            self.identifier(table)?,
            columns.join(", "),
            literals.join(", ")
        );
        tracing::debug!(%sql, "generated INSERT");
        Ok(sql)
    }

    /// Generate SELECT of the given columns
    pub fn select(&self, table: &str, columns: &[&str]) -> Result<String> {
        let columns = columns
            .iter()
            .map(|name| self.identifier(name))
            .collect::<Result<Vec<_>>>()?;

        let sql = format!(
            "SELECT {} FROM {};",
            columns.join(", "),
            self.identifier(table)?
        );
        tracing::debug!(%sql, "generated SELECT");
        Ok(sql)
    }

    /// Generate UPDATE setting every pair in `values`, filtered by `condition`
    pub fn update(
        &self,
        table: &str,
        values: &IndexMap<String, FieldValue>,
        condition: &str,
    ) -> Result<String> {
        let assignments = values
            .iter()
            .map(|(name, value)| Ok(format!("{} = {}", self.identifier(name)?, self.literal(value))))
            .collect::<Result<Vec<_>>>()?;

        let sql = format!(
            "UPDATE {} SET {} WHERE {};",
            self.identifier(table)?,
            assignments.join(", "),
            condition
        );
        tracing::debug!(%sql, "generated UPDATE");
        Ok(sql)
    }

    /// Generate DELETE filtered by `condition`
    pub fn delete(&self, table: &str, condition: &str) -> Result<String> {
        let sql = format!("DELETE FROM {} WHERE {};", self.identifier(table)?, condition);
        tracing::debug!(%sql, "generated DELETE");
        Ok(sql)
    }

    fn identifier(&self, name: &str) -> Result<String> {
        render_identifier(self.config, name)
    }

    fn literal(&self, value: &FieldValue) -> String {
        format_literal(value, self.config.escape_literals)
    }
}

/// [`ExplicitSqlGenerator::create_table`] with the default configuration
pub fn create_table(table: &str, columns: &IndexMap<String, String>) -> Result<String> {
    ExplicitSqlGenerator::new(&GeneratorConfig::default()).create_table(table, columns)
}

/// [`ExplicitSqlGenerator::insert`] with the default configuration
pub fn insert(table: &str, values: &IndexMap<String, FieldValue>) -> Result<String> {
    ExplicitSqlGenerator::new(&GeneratorConfig::default()).insert(table, values)
}

/// [`ExplicitSqlGenerator::select`] with the default configuration
pub fn select(table: &str, columns: &[&str]) -> Result<String> {
    ExplicitSqlGenerator::new(&GeneratorConfig::default()).select(table, columns)
}

/// [`ExplicitSqlGenerator::update`] with the default configuration
pub fn update(table: &str, values: &IndexMap<String, FieldValue>, condition: &str) -> Result<String> {
    ExplicitSqlGenerator::new(&GeneratorConfig::default()).update(table, values, condition)
}

/// [`ExplicitSqlGenerator::delete`] with the default configuration
pub fn delete(table: &str, condition: &str) -> Result<String> {
    ExplicitSqlGenerator::new(&GeneratorConfig::default()).delete(table, condition)
}
