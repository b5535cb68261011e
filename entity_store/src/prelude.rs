//! Convenience re-exports for working with mapped types

pub use crate::context::EntityContext;
pub use crate::errors::{ConfigurationError, EntityError};
pub use crate::executor::{DatabaseExecutor, ExecOutcome, ResultRow};
pub use crate::metadata::{Entity, EntityDescriptor};
pub use crate::query_builder::Predicate;
pub use crate::schema::{SyncAction, SyncReport};
pub use type_mapping::SqlValue;

#[cfg(any(test, feature = "mock"))]
pub use crate::executor::mock::MockExecutor;
