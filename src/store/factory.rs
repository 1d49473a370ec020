//! Notification store factory

use std::sync::Arc;

use crate::config::Settings;

use super::backend::{NotificationStore, StoreError};
use super::memory_backend::MemoryNotificationStore;
use super::postgres_backend::PostgresNotificationStore;
use super::redis_backend::RedisNotificationStore;

/// Create a notification store based on configuration.
///
/// Returns the backend named by `store.backend`:
/// - `"postgres"`: connects a pool using the `database` section
/// - `"redis"`: connects using the `redis` section and `store.redis_key`
/// - `"memory"` (default): process-local storage
///
/// A persistent backend that cannot connect is an error; the service does not
/// silently fall back to memory and lose writes.
pub async fn create_notification_store(
    settings: &Settings,
) -> Result<Arc<dyn NotificationStore>, StoreError> {
    match settings.store.backend.as_str() {
        "postgres" => {
            tracing::info!(backend = "postgres", "Creating PostgreSQL notification store");
            let store = PostgresNotificationStore::connect(&settings.database).await?;
            Ok(Arc::new(store))
        }
        "redis" => {
            tracing::info!(
                backend = "redis",
                key = %settings.store.redis_key,
                "Creating Redis notification store"
            );
            let store =
                RedisNotificationStore::connect(&settings.redis, settings.store.redis_key.clone())
                    .await?;
            Ok(Arc::new(store))
        }
        "memory" => {
            tracing::info!(backend = "memory", "Creating memory notification store");
            Ok(Arc::new(MemoryNotificationStore::new()))
        }
        other => Err(StoreError::Unavailable(format!(
            "Unknown store backend: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_backend_is_memory() {
        let settings = Settings::default();
        let store = create_notification_store(&settings).await.unwrap();
        assert_eq!(store.backend_name(), "memory");
    }

    #[tokio::test]
    async fn test_unknown_backend_is_rejected() {
        let mut settings = Settings::default();
        settings.store.backend = "cassandra".to_string();

        let result = create_notification_store(&settings).await;
        assert!(matches!(result, Err(StoreError::Unavailable(msg)) if msg.contains("cassandra")));
    }
}
