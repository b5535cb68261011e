//! Entity store
//!
//! Maps plain structs onto MySQL tables: metadata resolution, schema
//! synchronization, statement building, row materialization and the
//! per-type [`EntityContext`] that ties them together.

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod context;
pub mod errors;
pub mod executor;
pub mod materializer;
pub mod metadata;
pub mod prelude;
pub mod query_builder;
pub mod schema;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use context::EntityContext;
pub use errors::{ConfigurationError, EntityError};
pub use executor::{DatabaseExecutor, ExecOutcome, ResultRow};
pub use metadata::{
    descriptor_for, ColumnDescriptor, Entity, EntityDescriptor, EntitySchema, FieldMarker,
    FieldRef, FieldSchema,
};
pub use query_builder::{Predicate, QueryBuilder, Statement};
pub use schema::{SchemaSynchronizer, SyncAction, SyncReport};
pub use validation::{ValidatedIdentifier, ValidationError};

#[cfg(any(test, feature = "mock"))]
pub use executor::mock::{MockExecutor, MockResponse};

// Re-exported for generated code
pub use type_mapping;
