//! PostgreSQL-based notification store.
//!
//! Expects an existing table:
//!
//! ```sql
//! CREATE TABLE notifications (
//!     id      TEXT PRIMARY KEY,
//!     payload JSONB NOT NULL
//! );
//! ```
//!
//! `payload` holds the full JSON record, including its id.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;
use crate::notification::Notification;

use super::backend::{generate_id, NotificationStore, StoreError};

/// PostgreSQL-based notification store.
pub struct PostgresNotificationStore {
    pool: PgPool,
}

impl PostgresNotificationStore {
    /// Open a connection pool from configuration and create the store.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds as u64))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds as u64))
            .connect(&config.url)
            .await?;

        tracing::info!(
            pool_size = config.pool_size,
            url = %mask_database_url(&config.url),
            "PostgreSQL notification store connected"
        );

        Ok(Self { pool })
    }

    /// Create the store on an existing pool.
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Mask the password in a database URL for safe logging.
pub fn mask_database_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(colon_pos) = url[..at_pos].rfind(':') {
            // "postgres://user@..." has its only colon in the scheme
            if url[colon_pos..].starts_with("://") {
                return url.to_string();
            }
            let prefix = &url[..colon_pos + 1];
            let suffix = &url[at_pos..];
            return format!("{}***{}", prefix, suffix);
        }
    }
    url.to_string()
}

fn decode_row(payload: serde_json::Value) -> Result<Notification, StoreError> {
    Ok(serde_json::from_value(payload)?)
}

#[async_trait]
impl NotificationStore for PostgresNotificationStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, mut record: Notification) -> Result<Notification, StoreError> {
        let id = generate_id();
        record.id = Some(id.clone());
        let payload = serde_json::to_value(&record)?;

        sqlx::query("INSERT INTO notifications (id, payload) VALUES ($1, $2)")
            .bind(&id)
            .bind(payload)
            .execute(&self.pool)
            .await?;

        tracing::debug!(id = %id, "Notification inserted into PostgreSQL");

        Ok(record)
    }

    async fn overwrite(
        &self,
        id: &str,
        mut record: Notification,
    ) -> Result<Option<Notification>, StoreError> {
        record.id = Some(id.to_string());
        let payload = serde_json::to_value(&record)?;

        let result = sqlx::query("UPDATE notifications SET payload = $2 WHERE id = $1")
            .bind(id)
            .bind(payload)
            .execute(&self.pool)
            .await?;

        Ok((result.rows_affected() > 0).then_some(record))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Notification>, StoreError> {
        let payload: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT payload FROM notifications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        payload.map(decode_row).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Notification>, StoreError> {
        let payloads: Vec<serde_json::Value> =
            sqlx::query_scalar("SELECT payload FROM notifications")
                .fetch_all(&self.pool)
                .await?;

        payloads.into_iter().map(decode_row).collect()
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            tracing::debug!(id = %id, "Notification deleted from PostgreSQL");
        }

        Ok(())
    }
}
