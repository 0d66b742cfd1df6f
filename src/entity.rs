//! Entity descriptor protocol
//!
//! An entity type exposes its table name and ordered persisted fields through
//! a static [`EntityDescriptor`], and its per-instance values through
//! [`Entity::field_values`]. Generators only ever talk to this protocol, so a
//! new entity type needs no generator changes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::PrimaryKeyStrategy;
use crate::error::{Result, SqlGenError};
use crate::types::{FieldDescriptor, FieldValue, SemanticType, ToFieldValue};

/// Structural summary of an entity type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityDescriptor {
    /// Rust type name, used in error messages
    #[serde(rename = "entityName")]
    pub entity_name: String,
    /// Table the entity is stored in; `None` if never bound to one
    #[serde(rename = "tableName", skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    /// Persisted fields in declaration order
    pub fields: Vec<FieldDescriptor>,
}

impl EntityDescriptor {
    /// Create a descriptor bound to a table, with no fields yet
    pub fn new(entity_name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            table_name: Some(table_name.into()),
            fields: Vec::new(),
        }
    }

    /// Create a descriptor for a type that has no table metadata
    pub fn unbound(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            table_name: None,
            fields: Vec::new(),
        }
    }

    /// Build a descriptor in one go; used by [`impl_entity!`](crate::impl_entity)
    pub fn declare(
        entity_name: &str,
        table_name: Option<&str>,
        fields: Vec<FieldDescriptor>,
    ) -> Self {
        let descriptor = Self {
            entity_name: entity_name.to_string(),
            table_name: table_name.map(str::to_string),
            fields,
        };
        tracing::trace!(
            entity = entity_name,
            table = ?descriptor.table_name,
            fields = descriptor.fields.len(),
            "declared entity descriptor"
        );
        descriptor
    }

    /// Append a field
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a plain column
    pub fn column(self, column_name: impl Into<String>, semantic_type: SemanticType) -> Self {
        self.with_field(FieldDescriptor::new(column_name, semantic_type))
    }

    /// Append a column carrying the primary-key marker
    pub fn id(self, column_name: impl Into<String>, semantic_type: SemanticType) -> Self {
        self.with_field(FieldDescriptor::new(column_name, semantic_type).primary_key())
    }

    /// Table name, or `MissingTableMetadata`
    pub fn table(&self) -> Result<&str> {
        self.table_name
            .as_deref()
            .ok_or_else(|| SqlGenError::missing_table(&self.entity_name))
    }

    /// Column names in declaration order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.column_name.as_str())
    }

    /// Locate the primary-key field and its position under `strategy`
    pub fn primary_key(&self, strategy: PrimaryKeyStrategy) -> Result<(usize, &FieldDescriptor)> {
        match strategy {
            PrimaryKeyStrategy::FirstField => self.fields.first().map(|f| (0, f)).ok_or_else(|| {
                SqlGenError::missing_primary_key(format!(
                    "{} declares no fields",
                    self.entity_name
                ))
            }),
            PrimaryKeyStrategy::Marked => self
                .fields
                .iter()
                .enumerate()
                .find(|(_, f)| f.primary_key)
                .ok_or_else(|| {
                    SqlGenError::missing_primary_key(format!(
                        "{} has no field marked as primary key",
                        self.entity_name
                    ))
                }),
        }
    }

    /// Check structural invariants
    ///
    /// - The table name, when present, is non-empty
    /// - Column names are non-empty and unique
    /// - At most one field is marked as primary key
    pub fn validate(&self) -> Result<()> {
        if self.table_name.as_deref() == Some("") {
            return Err(SqlGenError::validation(format!(
                "{} has an empty table name",
                self.entity_name
            )));
        }

        for (i, field) in self.fields.iter().enumerate() {
            if field.column_name.is_empty() {
                return Err(SqlGenError::validation(format!(
                    "{} field #{} has an empty column name",
                    self.entity_name, i
                )));
            }
            if self.fields[..i]
                .iter()
                .any(|f| f.column_name == field.column_name)
            {
                return Err(SqlGenError::validation(format!(
                    "{} declares column '{}' more than once",
                    self.entity_name, field.column_name
                )));
            }
        }

        let marked = self.fields.iter().filter(|f| f.primary_key).count();
        if marked > 1 {
            return Err(SqlGenError::validation(format!(
                "{} marks {} fields as primary key",
                self.entity_name, marked
            )));
        }

        Ok(())
    }

    /// Serialize the descriptor to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load a descriptor from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A type whose instances map to table rows
///
/// Usually implemented with [`impl_entity!`](crate::impl_entity). Hand-written
/// impls may fail in `field_values`, e.g. for lazily loaded fields.
pub trait Entity {
    /// Descriptor of the type; built once, immutable afterwards
    fn descriptor() -> &'static EntityDescriptor;

    /// Values of the persisted fields, aligned with `descriptor().fields`
    fn field_values(&self) -> Result<Vec<FieldValue>>;
}

/// Descriptor of `E`, failing if `E` has no table
pub fn describe<E: Entity>() -> Result<&'static EntityDescriptor> {
    let descriptor = E::descriptor();
    descriptor.table()?;
    Ok(descriptor)
}

/// Persisted fields of `E` in declaration order
pub fn fields_of<E: Entity>() -> &'static [FieldDescriptor] {
    &E::descriptor().fields
}

/// Values of an instance, checked against the descriptor's field list
pub fn values_of<E: Entity>(entity: &E) -> Result<Vec<FieldValue>> {
    let fields = fields_of::<E>();
    let values = entity.field_values()?;

    if values.len() != fields.len() {
        let column = fields
            .get(values.len())
            .map_or("<extra value>", |f| f.column_name.as_str());
        return Err(SqlGenError::field_access(
            column,
            format!(
                "{} yielded {} values for {} fields",
                E::descriptor().entity_name,
                values.len(),
                fields.len()
            ),
        ));
    }

    Ok(values)
}

/// Column name to value map of an instance, in declaration order
pub fn row_of<E: Entity>(entity: &E) -> Result<IndexMap<String, FieldValue>> {
    let values = values_of(entity)?;
    Ok(fields_of::<E>()
        .iter()
        .map(|f| f.column_name.clone())
        .zip(values)
        .collect())
}

#[doc(hidden)]
pub fn semantic_type_of<E, T, F>(_field: F) -> SemanticType
where
    T: ToFieldValue + ?Sized,
    F: Fn(&E) -> &T,
{
    T::SEMANTIC_TYPE
}

/// Implement [`Entity`] for an existing struct
///
/// Each listed field becomes a persisted column, in the listed order; struct
/// fields that are not listed are not persisted. The semantic type is taken
/// from the Rust field type unless overridden with `as <SemanticType>`, and
/// `[primary_key]` sets the primary-key marker. Omitting `#[table = ...]`
/// declares an entity with no table metadata.
///
/// ```
/// use entity_sqlgen::{impl_entity, generate_create};
///
/// struct Car {
///     id: i32,
///     model: String,
///     price: f64,
///     dirty: bool,
/// }
///
/// impl_entity! {
///     #[table = "cars"]
///     Car {
///         id: "id" [primary_key],
///         model: "model",
///         price: "price",
///     }
/// }
///
/// assert_eq!(
///     generate_create::<Car>().unwrap(),
///     "CREATE TABLE cars (id INT, model VARCHAR(255), price DOUBLE);"
/// );
/// ```
#[macro_export]
macro_rules! impl_entity {
    (@semantic $ty:ident, $field:ident) => {
        $crate::entity::semantic_type_of(|entity: &$ty| &entity.$field)
    };
    (@semantic $ty:ident, $field:ident, $sem:ident) => {
        $crate::SemanticType::$sem
    };
    (@primary_key) => {
        false
    };
    (@primary_key primary_key) => {
        true
    };
    (@impl $ty:ident, $table:expr, {
        $($field:ident : $column:literal $(as $sem:ident)? $([$marker:ident])?),* $(,)?
    }) => {
        impl $crate::Entity for $ty {
            fn descriptor() -> &'static $crate::EntityDescriptor {
                static DESCRIPTOR: ::std::sync::LazyLock<$crate::EntityDescriptor> =
                    ::std::sync::LazyLock::new(|| {
                        $crate::EntityDescriptor::declare(
                            stringify!($ty),
                            $table,
                            ::std::vec![$(
                                $crate::FieldDescriptor {
                                    column_name: ::std::string::String::from($column),
                                    semantic_type: $crate::impl_entity!(@semantic $ty, $field $(, $sem)?),
                                    primary_key: $crate::impl_entity!(@primary_key $($marker)?),
                                }
                            ),*],
                        )
                    });
                &DESCRIPTOR
            }

            fn field_values(&self) -> $crate::Result<::std::vec::Vec<$crate::FieldValue>> {
                ::std::result::Result::Ok(::std::vec![
                    $($crate::ToFieldValue::to_field_value(&self.$field)),*
                ])
            }
        }
    };
    (#[table = $table:literal] $ty:ident { $($body:tt)* }) => {
        $crate::impl_entity!(@impl $ty, ::std::option::Option::Some($table), { $($body)* });
    };
    ($ty:ident { $($body:tt)* }) => {
        $crate::impl_entity!(@impl $ty, ::std::option::Option::None, { $($body)* });
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Car {
        id: i32,
        model: String,
        price: f64,
        #[allow(dead_code)]
        cached_label: String,
    }

    crate::impl_entity! {
        #[table = "cars"]
        Car {
            id: "id" [primary_key],
            model: "model",
            price: "price",
        }
    }

    struct Note {
        body: String,
    }

    crate::impl_entity! {
        Note {
            body: "body",
        }
    }

    struct Tagged {
        code: i64,
        label: Option<String>,
    }

    crate::impl_entity! {
        #[table = "tags"]
        Tagged {
            code: "code" as Other [primary_key],
            label: "label",
        }
    }

    struct Upload {
        id: u64,
        size: usize,
        kind: char,
    }

    crate::impl_entity! {
        #[table = "uploads"]
        Upload {
            id: "id" [primary_key],
            size: "size",
            kind: "kind",
        }
    }

    struct Short;

    impl Entity for Short {
        fn descriptor() -> &'static EntityDescriptor {
            static DESCRIPTOR: std::sync::LazyLock<EntityDescriptor> =
                std::sync::LazyLock::new(|| {
                    EntityDescriptor::new("Short", "shorts")
                        .id("id", SemanticType::Integer)
                        .column("name", SemanticType::Text)
                });
            &DESCRIPTOR
        }

        fn field_values(&self) -> Result<Vec<FieldValue>> {
            Ok(vec![FieldValue::Integer(1)])
        }
    }

    fn car() -> Car {
        Car {
            id: 1,
            model: "Toyota".to_string(),
            price: 25000.0,
            cached_label: "unused".to_string(),
        }
    }

    // =========================================================================
    // Descriptor Derivation Tests
    // =========================================================================

    #[test]
    fn test_describe_reads_table_and_fields() {
        let descriptor = describe::<Car>().unwrap();

        assert_eq!(descriptor.entity_name, "Car");
        assert_eq!(descriptor.table_name.as_deref(), Some("cars"));
        assert_eq!(
            descriptor.column_names().collect::<Vec<_>>(),
            vec!["id", "model", "price"]
        );
        assert_eq!(descriptor.fields[0].semantic_type, SemanticType::Integer);
        assert_eq!(descriptor.fields[1].semantic_type, SemanticType::Text);
        assert_eq!(descriptor.fields[2].semantic_type, SemanticType::FloatingPoint);
        assert!(descriptor.fields[0].primary_key);
        assert!(!descriptor.fields[1].primary_key);
    }

    #[test]
    fn test_describe_is_stable_across_calls() {
        let first = describe::<Car>().unwrap();
        let second = describe::<Car>().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(fields_of::<Car>(), fields_of::<Car>());
    }

    #[test]
    fn test_describe_without_table_fails() {
        let err = describe::<Note>().unwrap_err();
        assert!(matches!(err, SqlGenError::MissingTableMetadata(ref name) if name == "Note"));
        // fields are still introspectable
        assert_eq!(fields_of::<Note>().len(), 1);
    }

    #[test]
    fn test_semantic_type_override_and_option_fields() {
        let fields = fields_of::<Tagged>();
        assert_eq!(fields[0].semantic_type, SemanticType::Other);
        assert_eq!(fields[1].semantic_type, SemanticType::Text);

        let tagged = Tagged {
            code: 9,
            label: None,
        };
        assert_eq!(
            values_of(&tagged).unwrap(),
            vec![FieldValue::Integer(9), FieldValue::Null]
        );
    }

    #[test]
    fn test_wide_integer_fields() {
        let fields = fields_of::<Upload>();
        assert_eq!(fields[0].semantic_type, SemanticType::Integer);
        assert_eq!(fields[1].semantic_type, SemanticType::Integer);
        assert_eq!(fields[2].semantic_type, SemanticType::Text);

        let upload = Upload {
            id: 7,
            size: 4096,
            kind: 'b',
        };
        assert_eq!(
            values_of(&upload).unwrap(),
            vec![
                FieldValue::Integer(7),
                FieldValue::Integer(4096),
                FieldValue::Text("b".to_string()),
            ]
        );

        let huge = Upload {
            id: u64::MAX,
            size: 0,
            kind: 'b',
        };
        assert_eq!(
            values_of(&huge).unwrap()[0],
            FieldValue::Other("18446744073709551615".to_string())
        );
    }

    // =========================================================================
    // Value Access Tests
    // =========================================================================

    #[test]
    fn test_values_are_aligned_with_fields() {
        let values = values_of(&car()).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::Integer(1),
                FieldValue::Text("Toyota".to_string()),
                FieldValue::Float(25000.0),
            ]
        );
    }

    #[test]
    fn test_misaligned_values_are_a_field_access_error() {
        let err = values_of(&Short).unwrap_err();
        match err {
            SqlGenError::FieldAccess { column, reason } => {
                assert_eq!(column, "name");
                assert!(reason.contains("1 values for 2 fields"));
            }
            other => panic!("Expected FieldAccess, got {:?}", other),
        }
    }

    #[test]
    fn test_row_of_keeps_declaration_order() {
        let row = row_of(&car()).unwrap();
        let keys: Vec<_> = row.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "model", "price"]);
        assert_eq!(row["model"], FieldValue::Text("Toyota".to_string()));
    }

    // =========================================================================
    // Primary Key Lookup Tests
    // =========================================================================

    #[test]
    fn test_primary_key_strategies() {
        let descriptor = EntityDescriptor::new("Swapped", "swapped")
            .column("name", SemanticType::Text)
            .id("id", SemanticType::Integer);

        let (pos, field) = descriptor.primary_key(PrimaryKeyStrategy::FirstField).unwrap();
        assert_eq!((pos, field.column_name.as_str()), (0, "name"));

        let (pos, field) = descriptor.primary_key(PrimaryKeyStrategy::Marked).unwrap();
        assert_eq!((pos, field.column_name.as_str()), (1, "id"));
    }

    #[test]
    fn test_primary_key_missing() {
        let empty = EntityDescriptor::new("Empty", "empty");
        assert!(matches!(
            empty.primary_key(PrimaryKeyStrategy::FirstField),
            Err(SqlGenError::MissingPrimaryKey(_))
        ));

        let unmarked = EntityDescriptor::new("Plain", "plain").column("a", SemanticType::Text);
        assert!(unmarked.primary_key(PrimaryKeyStrategy::FirstField).is_ok());
        assert!(matches!(
            unmarked.primary_key(PrimaryKeyStrategy::Marked),
            Err(SqlGenError::MissingPrimaryKey(_))
        ));
    }

    // =========================================================================
    // Validation Tests
    // =========================================================================

    #[test]
    fn test_validate_accepts_declared_entities() {
        assert!(describe::<Car>().unwrap().validate().is_ok());
        assert!(EntityDescriptor::new("Empty", "empty").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_two_primary_keys() {
        let descriptor = EntityDescriptor::new("Twice", "twice")
            .id("a", SemanticType::Integer)
            .id("b", SemanticType::Integer);
        let err = descriptor.validate().unwrap_err();
        assert!(err.to_string().contains("marks 2 fields"));
    }

    #[test]
    fn test_validate_rejects_duplicate_and_empty_columns() {
        let duplicate = EntityDescriptor::new("Dup", "dup")
            .column("a", SemanticType::Text)
            .column("a", SemanticType::Integer);
        assert!(duplicate.validate().is_err());

        let blank = EntityDescriptor::new("Blank", "blank").column("", SemanticType::Text);
        assert!(blank.validate().is_err());

        let no_table = EntityDescriptor::new("NoTable", "");
        assert!(no_table.validate().is_err());
    }

    // =========================================================================
    // Serialization Tests
    // =========================================================================

    #[test]
    fn test_descriptor_json_round_trip() {
        let json = describe::<Car>().unwrap().to_json().unwrap();
        assert!(json.contains("\"tableName\":\"cars\""));
        assert!(json.contains("\"columnName\":\"model\""));

        let loaded = EntityDescriptor::from_json(&json).unwrap();
        assert_eq!(&loaded, describe::<Car>().unwrap());
    }

    #[test]
    fn test_unbound_descriptor_json_omits_table() {
        let json = EntityDescriptor::unbound("Loose").to_json().unwrap();
        assert!(!json.contains("tableName"));
        assert!(EntityDescriptor::from_json("not json").is_err());
    }
}
