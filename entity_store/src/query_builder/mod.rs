//! Query builder utilities
//!
//! This module provides SQL statement construction for mapped types.
//! Values are always bound as `?` parameters; only validated identifiers and
//! caller predicates become statement text.

pub mod builder;
pub mod predicate;
pub mod statement;


pub use builder::QueryBuilder;
pub use predicate::Predicate;
pub use statement::Statement;
