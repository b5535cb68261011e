//! Convenience re-exports for common EntityHaus usage
//!
//! ```rust
//! use entityhaus::prelude::*;
//! ```

// Core EntityHaus components
pub use crate::core::EntityHaus;
pub use crate::errors::EntityHausError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig};

// Mapped-type operations
pub use entity_store::prelude::*;

// Re-export table derive for model creation
pub use table_derive::{model, Entity};

// Common external dependencies
pub use sqlx;
pub use tokio;
