//! Redis-based notification store.
//!
//! All records live in a single Redis hash: field = notification id, value =
//! the JSON-encoded record. Records survive service restarts.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, Script};

use crate::config::RedisConfig;
use crate::notification::Notification;

use super::backend::{generate_id, NotificationStore, StoreError};

/// Replace a hash field only if it already exists.
///
/// Returns 1 when the field was replaced, 0 when it was missing.
const OVERWRITE_IF_EXISTS: &str = r#"
if redis.call('HEXISTS', KEYS[1], ARGV[1]) == 1 then
    redis.call('HSET', KEYS[1], ARGV[1], ARGV[2])
    return 1
end
return 0
"#;

/// Redis-based notification store.
pub struct RedisNotificationStore {
    /// Auto-reconnecting multiplexed connection
    connection: ConnectionManager,

    /// Hash holding all records
    key: String,

    overwrite_script: Script,
}

impl RedisNotificationStore {
    /// Connect to Redis and create the store.
    pub async fn connect(config: &RedisConfig, key: String) -> Result<Self, StoreError> {
        let client = Client::open(config.url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!(key = %key, "Redis notification store connected");

        Ok(Self::with_connection(connection, key))
    }

    /// Create the store on an existing connection.
    pub fn with_connection(connection: ConnectionManager, key: String) -> Self {
        Self {
            connection,
            key,
            overwrite_script: Script::new(OVERWRITE_IF_EXISTS),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

fn encode(record: &Notification) -> Result<String, StoreError> {
    Ok(serde_json::to_string(record)?)
}

fn decode(json: &str) -> Result<Notification, StoreError> {
    Ok(serde_json::from_str(json)?)
}

#[async_trait]
impl NotificationStore for RedisNotificationStore {
    fn backend_name(&self) -> &'static str {
        "redis"
    }

    async fn insert(&self, mut record: Notification) -> Result<Notification, StoreError> {
        let id = generate_id();
        record.id = Some(id.clone());
        let json = encode(&record)?;

        let mut conn = self.connection.clone();
        let _: () = conn.hset(&self.key, &id, json).await?;

        tracing::debug!(id = %id, key = %self.key, "Notification written to Redis");

        Ok(record)
    }

    async fn overwrite(
        &self,
        id: &str,
        mut record: Notification,
    ) -> Result<Option<Notification>, StoreError> {
        record.id = Some(id.to_string());
        let json = encode(&record)?;

        let mut conn = self.connection.clone();
        let replaced: i64 = self
            .overwrite_script
            .key(&self.key)
            .arg(id)
            .arg(json)
            .invoke_async(&mut conn)
            .await?;

        Ok((replaced == 1).then_some(record))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Notification>, StoreError> {
        let mut conn = self.connection.clone();
        let json: Option<String> = conn.hget(&self.key, id).await?;

        json.as_deref().map(decode).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Notification>, StoreError> {
        let mut conn = self.connection.clone();
        let values: Vec<String> = conn.hvals(&self.key).await?;

        values.iter().map(|json| decode(json)).collect()
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        let removed: i64 = conn.hdel(&self.key, id).await?;

        if removed > 0 {
            tracing::debug!(id = %id, key = %self.key, "Notification removed from Redis");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_decode_keeps_id() {
        let record = Notification::new("alert1")
            .with_id("n1")
            .with_metadata(json!({"source": "billing"}));

        let decoded = decode(&encode(&record).unwrap()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode("not json"),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_overwrite_script_checks_existence() {
        assert!(OVERWRITE_IF_EXISTS.contains("HEXISTS"));
        assert!(OVERWRITE_IF_EXISTS.contains("return 0"));
    }
}
