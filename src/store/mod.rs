//! Persistent storage for notification records.
//!
//! The registry only talks to storage through the [`NotificationStore`] trait.
//! Three backends are provided:
//! - `memory`: DashMap, process-local
//! - `redis`: one hash, field per record
//! - `postgres`: `notifications` table with a JSONB payload

mod backend;
mod factory;
mod memory_backend;
mod postgres_backend;
mod redis_backend;

pub use backend::{generate_id, NotificationStore, StoreError};
pub use factory::create_notification_store;
pub use memory_backend::MemoryNotificationStore;
pub use postgres_backend::{mask_database_url, PostgresNotificationStore};
pub use redis_backend::RedisNotificationStore;
