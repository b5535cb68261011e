//! Core EntityHaus functionality
//!
//! This module contains the `EntityHaus` coordinator: it owns the database
//! connection and hands out per-type entity contexts borrowing it.

use sqlx::mysql::MySqlConnectOptions;
use sqlx::{Connection, MySqlConnection};
use std::time::Duration;

use crate::errors::EntityHausError;
use config::DatabaseConfig;
use entity_store::{Entity, EntityContext};

/// Main EntityHaus coordinator that owns the database connection
pub struct EntityHaus {
    connection: MySqlConnection,
}

impl EntityHaus {
    /// Validate `config` and open a connection, bounded by its connect timeout
    pub async fn new(config: DatabaseConfig) -> Result<Self, EntityHausError> {
        config.validate()?;

        let options = connect_options(&config);
        let timeout = Duration::from_secs(config.connect_timeout_seconds);

        let connection = tokio::time::timeout(timeout, MySqlConnection::connect_with(&options))
            .await
            .map_err(|_| EntityHausError::ConnectTimeout {
                seconds: config.connect_timeout_seconds,
            })??;

        tracing::info!(
            "Connected to MySQL database {} at {}:{}",
            config.database,
            config.host,
            config.port
        );

        Ok(Self { connection })
    }

    /// Open a connection from a `mysql://` URL
    pub async fn connect(url: &str) -> Result<Self, EntityHausError> {
        let connection = MySqlConnection::connect(url).await?;
        Ok(Self { connection })
    }

    /// Get the underlying connection
    pub fn connection_mut(&mut self) -> &mut MySqlConnection {
        &mut self.connection
    }

    /// Build a context for `T`, synchronizing its table first
    pub async fn context<T: Entity>(
        &mut self,
    ) -> Result<EntityContext<'_, T, MySqlConnection>, EntityHausError> {
        Ok(EntityContext::new(&mut self.connection).await?)
    }

    /// Check database connection health
    pub async fn health_check(&mut self) -> Result<(), EntityHausError> {
        sqlx::query("SELECT 1").execute(&mut self.connection).await?;
        Ok(())
    }

    /// Close the connection gracefully
    pub async fn close(self) -> Result<(), EntityHausError> {
        self.connection.close().await?;
        Ok(())
    }
}

/// Connection options taken field by field, so credentials are never parsed out of a URL
fn connect_options(config: &DatabaseConfig) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.username)
        .password(&config.password)
        .database(&config.database)
}
