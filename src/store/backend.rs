//! Backend trait for notification storage.
//!
//! This module defines the narrow persistence contract the registry depends on,
//! allowing different storage implementations (memory, Redis, PostgreSQL) to be
//! used interchangeably.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::notification::Notification;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend is not reachable or refused the operation
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Redis operation failed
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// PostgreSQL operation failed
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// Stored record could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Generate a fresh record identifier.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Key-addressable storage for notification records.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`) as they are shared
/// across request handlers.
///
/// # Consistency
///
/// A successful `insert` must be visible to a subsequent `find_by_id` from the
/// same caller. Concurrent writes to the same key are last-write-wins.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Backend type identifier, used for logging and metrics labels.
    fn backend_name(&self) -> &'static str;

    /// Persist a new record under a freshly assigned id.
    ///
    /// Any id carried by `record` is ignored. Returns the stored record with
    /// its assigned id.
    async fn insert(&self, record: Notification) -> Result<Notification, StoreError>;

    /// Replace the record stored under `id`.
    ///
    /// Returns `Ok(None)` if no record exists under `id`; nothing is created
    /// in that case.
    async fn overwrite(
        &self,
        id: &str,
        record: Notification,
    ) -> Result<Option<Notification>, StoreError>;

    /// Look up a record by id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Notification>, StoreError>;

    /// All stored records, in backend-defined order.
    async fn find_all(&self) -> Result<Vec<Notification>, StoreError>;

    /// Remove the record stored under `id`. Missing ids are a no-op.
    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_is_unique() {
        let a = generate_id();
        let b = generate_id();
        assert!(!a.is_empty());
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::Unavailable("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }
}
