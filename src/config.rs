//! Configuration for the SQL generators
//!
//! Provides a builder pattern for configuring generation. The defaults
//! reproduce the plain, unquoted, unescaped statement forms.

use serde::{Deserialize, Serialize};

/// How UPDATE and DELETE locate the primary-key column
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PrimaryKeyStrategy {
    /// The first declared field, whatever its marker says
    #[default]
    FirstField,
    /// The field carrying the primary-key marker
    Marked,
}

/// Configuration for SQL generation
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Primary-key lookup for WHERE clauses (default: first field)
    #[serde(default)]
    pub primary_key: PrimaryKeyStrategy,
    /// Double embedded single quotes in text literals (default: false)
    #[serde(default)]
    pub escape_literals: bool,
    /// Wrap table and column names in double quotes (default: false)
    #[serde(default)]
    pub quote_identifiers: bool,
    /// Reject malformed or reserved table and column names (default: false)
    #[serde(default)]
    pub validate_identifiers: bool,
}

impl GeneratorConfig {
    /// Create a new configuration builder
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::new()
    }
}

/// Builder for GeneratorConfig
#[derive(Debug, Default)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the primary-key strategy (default: `FirstField`)
    pub fn primary_key(mut self, strategy: PrimaryKeyStrategy) -> Self {
        self.config.primary_key = strategy;
        self
    }

    /// Enable or disable escaping of text literals (default: false)
    pub fn escape_literals(mut self, enabled: bool) -> Self {
        self.config.escape_literals = enabled;
        self
    }

    /// Enable or disable identifier quoting (default: false)
    pub fn quote_identifiers(mut self, enabled: bool) -> Self {
        self.config.quote_identifiers = enabled;
        self
    }

    /// Enable or disable identifier validation (default: false)
    pub fn validate_identifiers(mut self, enabled: bool) -> Self {
        self.config.validate_identifiers = enabled;
        self
    }

    /// Escape, quote and validate everything, trusting the primary-key marker
    pub fn strict(self) -> Self {
        self.primary_key(PrimaryKeyStrategy::Marked)
            .escape_literals(true)
            .quote_identifiers(true)
            .validate_identifiers(true)
    }

    /// Build the configuration
    pub fn build(self) -> GeneratorConfig {
        self.config
    }
}
