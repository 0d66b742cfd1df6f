//! Core type definitions for SQL generation
//!
//! Includes semantic types, field descriptors, field values and the
//! conversions from Rust field types into values.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Semantic Types
// ============================================================================

/// Abstract category of a persisted field
///
/// Selects both the SQL column type emitted by CREATE TABLE and, for values,
/// whether a literal is quoted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    /// Whole numbers (maps to INT)
    Integer,

    /// Floating-point numbers (maps to DOUBLE)
    #[serde(rename = "float")]
    FloatingPoint,

    /// Character data (maps to VARCHAR(255))
    Text,

    /// Anything else (maps to TEXT)
    Other,
}

impl SemanticType {
    /// Convert semantic type to its SQL column type
    pub fn to_sql_type(self) -> &'static str {
        match self {
            SemanticType::Text => "VARCHAR(255)",
            SemanticType::Integer => "INT",
            SemanticType::FloatingPoint => "DOUBLE",
            SemanticType::Other => "TEXT",
        }
    }
}

// ============================================================================
// Field Descriptors
// ============================================================================

/// A single persisted column of an entity type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Column name in the table
    #[serde(rename = "columnName")]
    pub column_name: String,

    /// Semantic type of the field
    #[serde(rename = "type")]
    pub semantic_type: SemanticType,

    /// Whether the field carries the primary-key marker (default: false)
    #[serde(default, rename = "primaryKey")]
    pub primary_key: bool,
}

impl FieldDescriptor {
    /// Create a new field descriptor with a column name and type
    pub fn new(column_name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            column_name: column_name.into(),
            semantic_type,
            primary_key: false,
        }
    }

    /// Mark the field as the primary key
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// `column TYPE` fragment used by CREATE TABLE
    pub fn to_column_definition(&self) -> String {
        self.column_definition_as(&self.column_name)
    }

    /// `column TYPE` fragment with an already rendered (quoted) column name
    pub fn column_definition_as(&self, rendered_name: &str) -> String {
        format!("{} {}", rendered_name, self.semantic_type.to_sql_type())
    }
}

// ============================================================================
// Field Values
// ============================================================================

/// Value read from a persisted field of an entity instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
    /// Any other value, rendered verbatim
    Other(String),
    Null,
}

impl FieldValue {
    /// Semantic type of this value; `Null` counts as `Other`
    pub fn semantic_type(&self) -> SemanticType {
        match self {
            FieldValue::Integer(_) => SemanticType::Integer,
            FieldValue::Float(_) => SemanticType::FloatingPoint,
            FieldValue::Text(_) => SemanticType::Text,
            FieldValue::Other(_) | FieldValue::Null => SemanticType::Other,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

/// Natural (unquoted) string form of a value.
///
/// Floats always keep a fractional part or exponent, so `25000.0` stays
/// `25000.0` rather than collapsing to `25000`.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(v) => write!(f, "{:?}", v),
            FieldValue::Text(s) | FieldValue::Other(s) => f.write_str(s),
            FieldValue::Null => f.write_str("NULL"),
        }
    }
}

impl<T: ToFieldValue + ?Sized> From<&T> for FieldValue {
    fn from(value: &T) -> Self {
        value.to_field_value()
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        value.to_field_value()
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

// ============================================================================
// Rust type -> semantic type / value
// ============================================================================

/// Rust types that can be stored in a persisted entity field
///
/// `SEMANTIC_TYPE` is the static column category of the type; `to_field_value`
/// reads one value of it.
pub trait ToFieldValue {
    const SEMANTIC_TYPE: SemanticType;

    fn to_field_value(&self) -> FieldValue;
}

macro_rules! impl_integer {
    ($($ty:ty),*) => {
        $(
            impl ToFieldValue for $ty {
                const SEMANTIC_TYPE: SemanticType = SemanticType::Integer;

                fn to_field_value(&self) -> FieldValue {
                    FieldValue::Integer(i64::from(*self))
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, u8, u16, u32);

// Wider integers stay bare; values outside i64 fall back to their digits.
macro_rules! impl_wide_integer {
    ($($ty:ty),*) => {
        $(
            impl ToFieldValue for $ty {
                const SEMANTIC_TYPE: SemanticType = SemanticType::Integer;

                fn to_field_value(&self) -> FieldValue {
                    i64::try_from(*self)
                        .map_or_else(|_| FieldValue::Other(self.to_string()), FieldValue::Integer)
                }
            }
        )*
    };
}

impl_wide_integer!(u64, usize, isize, i128, u128);

impl ToFieldValue for f64 {
    const SEMANTIC_TYPE: SemanticType = SemanticType::FloatingPoint;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }
}

impl ToFieldValue for f32 {
    const SEMANTIC_TYPE: SemanticType = SemanticType::FloatingPoint;

    fn to_field_value(&self) -> FieldValue {
        // widen through the shortest decimal form so 0.1f32 stays 0.1
        let widened = self.to_string().parse().unwrap_or(f64::from(*self));
        FieldValue::Float(widened)
    }
}

impl ToFieldValue for String {
    const SEMANTIC_TYPE: SemanticType = SemanticType::Text;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.clone())
    }
}

impl ToFieldValue for str {
    const SEMANTIC_TYPE: SemanticType = SemanticType::Text;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.to_string())
    }
}

impl ToFieldValue for &str {
    const SEMANTIC_TYPE: SemanticType = SemanticType::Text;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text((*self).to_string())
    }
}

impl ToFieldValue for char {
    const SEMANTIC_TYPE: SemanticType = SemanticType::Text;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.to_string())
    }
}

impl ToFieldValue for bool {
    const SEMANTIC_TYPE: SemanticType = SemanticType::Other;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Other(self.to_string())
    }
}

impl<T: ToFieldValue> ToFieldValue for Option<T> {
    const SEMANTIC_TYPE: SemanticType = T::SEMANTIC_TYPE;

    fn to_field_value(&self) -> FieldValue {
        self.as_ref()
            .map_or(FieldValue::Null, ToFieldValue::to_field_value)
    }
}
