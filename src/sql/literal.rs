//! SQL literal formatting
//!
//! Text values are wrapped in single quotes; every other value is rendered
//! in its natural form and `Null` becomes the bare `NULL` keyword.

use crate::types::FieldValue;

/// Format a value as a SQL literal
///
/// With `escape` unset, embedded single quotes are left as they are, so the
/// output is not injection safe.
///
/// # Example
/// ```
/// use entity_sqlgen::{FieldValue, sql::format_literal};
///
/// assert_eq!(format_literal(&FieldValue::Text("Toyota".into()), false), "'Toyota'");
/// assert_eq!(format_literal(&FieldValue::Float(25000.0), false), "25000.0");
/// ```
pub fn format_literal(value: &FieldValue, escape: bool) -> String {
    match value {
        FieldValue::Text(s) if escape => format!("'{}'", s.replace('\'', "''")),
        FieldValue::Text(s) => format!("'{}'", s),
        other => other.to_string(),
    }
}
