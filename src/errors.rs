//! Error types for the EntityHaus crate
//!
//! This module contains the errors raised by the coordinator. Errors from
//! mapped-type operations pass through unchanged as `Entity`.

use entity_store::EntityError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EntityHausError {
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Timed out after {seconds}s connecting to the database")]
    ConnectTimeout { seconds: u64 },

    #[error(transparent)]
    Entity(#[from] EntityError),
}
