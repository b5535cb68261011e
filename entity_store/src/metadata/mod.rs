//! Entity metadata
//!
//! A mapped type describes itself through a static [`EntitySchema`], normally
//! generated by `#[derive(Entity)]`. The schema is resolved once into an
//! [`EntityDescriptor`] which every later operation consults.

pub mod descriptor;
pub mod registry;

pub use descriptor::{ColumnDescriptor, EntityDescriptor, FieldRef};
pub use registry::descriptor_for;

use type_mapping::{ConversionError, SemanticType, SqlValue};

/// Marker attached to a declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMarker {
    /// `#[primary_key(name = "...")]`
    PrimaryKey(&'static str),
    /// `#[column(name = "...")]`
    Column(&'static str),
}

impl FieldMarker {
    pub fn column_name(&self) -> &'static str {
        match self {
            FieldMarker::PrimaryKey(name) | FieldMarker::Column(name) => name,
        }
    }
}

/// One marked field of a mapped type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    /// Rust field name, used as the accessor handle
    pub field: &'static str,
    pub marker: FieldMarker,
    /// Field type as written in the source
    pub rust_type: &'static str,
    /// `None` when the field type has no column mapping
    pub semantic_type: Option<SemanticType>,
}

/// Static description of a mapped type, as declared by its markers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySchema {
    pub type_name: &'static str,
    /// Explicit `#[table(name = "...")]`, if any
    pub table_name: Option<&'static str>,
    /// Marked fields in declaration order
    pub fields: &'static [FieldSchema],
}

/// A plain data type mapped to a table.
///
/// Implemented by `#[derive(Entity)]`; can also be written by hand, which
/// acts as an explicit registration of the type's metadata.
pub trait Entity: Default + Send + Sync + 'static {
    fn entity_schema() -> &'static EntitySchema;

    /// Read a mapped field by its Rust field name
    fn read_field(&self, field: &str) -> Option<SqlValue>;

    /// Assign a mapped field by its Rust field name
    fn write_field(&mut self, field: &str, value: SqlValue) -> Result<(), ConversionError>;
}
