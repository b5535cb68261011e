//! # EntityHaus
//!
//! Maps plain Rust structs onto MySQL tables. A mapped type declares its
//! primary key and columns with attributes; its table is created or extended
//! on first use, and values are persisted, queried and deleted through a
//! per-type context.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use entityhaus::prelude::*;
//!
//! #[model]
//! #[table(name = "employees")]
//! pub struct Employee {
//!     #[primary_key]
//!     pub id: i64,
//!
//!     #[column(name = "first_name")]
//!     pub first_name: String,
//!
//!     #[column(name = "last_name")]
//!     pub last_name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new(
//!         "localhost".to_string(), 3306, "company".to_string(),
//!         "root".to_string(), "password".to_string(),
//!         30,
//!     );
//!
//!     let mut haus = EntityHaus::new(config).await?;
//!     let mut employees = haus.context::<Employee>().await?;
//!
//!     let mut ann = Employee {
//!         first_name: "Ann".to_string(),
//!         last_name: "Lee".to_string(),
//!         ..Employee::default()
//!     };
//!     employees.persist(&mut ann).await?;
//!
//!     let found = employees.find_by_id(ann.id).await?;
//!     println!("Found {} {}", found.first_name, found.last_name);
//!
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use crate::core::EntityHaus;
pub use errors::EntityHausError;

// Re-export centralized config
pub use config::{AppConfig, ConfigError, DatabaseConfig};

// Re-export internal crates used by macros and public API
// These MUST be public for the generated macro code to work correctly
pub use entity_store;
pub use table_derive::{model, Entity};
pub use type_mapping;

// Re-export external dependencies used in public API
pub use sqlx;
