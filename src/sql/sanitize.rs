//! SQL identifier utilities
//!
//! Quoting and validation of table and column names. Neither is applied by
//! default; see [`GeneratorConfig`](crate::config::GeneratorConfig).

use std::sync::LazyLock;

use regex::Regex;

/// Keywords that clash with the statement shapes this crate emits
pub const SQL_RESERVED_WORDS: &[&str] = &[
    "ALL", "AND", "AS", "ASC", "BY", "CASE", "CHECK", "COLUMN", "CONSTRAINT", "CREATE", "DEFAULT",
    "DELETE", "DESC", "DISTINCT", "DROP", "ELSE", "END", "FOREIGN", "FROM", "GROUP", "HAVING",
    "IN", "INSERT", "INTO", "IS", "JOIN", "KEY", "LIMIT", "NOT", "NULL", "ON", "OR", "ORDER",
    "PRIMARY", "REFERENCES", "SELECT", "SET", "TABLE", "THEN", "TO", "UNION", "UNIQUE", "UPDATE",
    "USER", "VALUES", "WHEN", "WHERE", "WITH",
];

static IDENTIFIER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("identifier pattern is valid"));

/// Quote a SQL identifier
///
/// Wraps the identifier in double quotes, doubling any embedded quotes.
///
/// # Example
/// ```
/// use entity_sqlgen::sql::quote_identifier;
///
/// assert_eq!(quote_identifier("cars"), "\"cars\"");
/// ```
pub fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// Validate a table or column name
///
/// Rules:
/// - Must start with a lowercase letter
/// - Can only contain lowercase letters, digits, and underscores
/// - Cannot be a reserved SQL word
///
/// # Example
/// ```
/// use entity_sqlgen::sql::validate_identifier;
///
/// assert!(validate_identifier("students").is_ok());
/// assert!(validate_identifier("select").is_err());
/// ```
pub fn validate_identifier(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Identifier cannot be empty".to_string());
    }

    if !IDENTIFIER_PATTERN.is_match(name) {
        return Err(format!(
            "Identifier '{}' is invalid. Must start with a lowercase letter and contain only lowercase letters, digits, and underscores.",
            name
        ));
    }

    if SQL_RESERVED_WORDS.contains(&name.to_uppercase().as_str()) {
        return Err(format!(
            "Identifier '{}' is a reserved SQL word and cannot be used.",
            name
        ));
    }

    Ok(())
}
