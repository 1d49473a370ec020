//! In-memory notification store using DashMap.
//!
//! Records are held in process memory and are lost on service restart.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::notification::Notification;

use super::backend::{generate_id, NotificationStore, StoreError};

/// In-memory notification store.
pub struct MemoryNotificationStore {
    records: DashMap<String, Notification>,
}

impl Default for MemoryNotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryNotificationStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, mut record: Notification) -> Result<Notification, StoreError> {
        let id = generate_id();
        record.id = Some(id.clone());

        self.records.insert(id.clone(), record.clone());

        tracing::debug!(id = %id, "Notification inserted into memory store");

        Ok(record)
    }

    async fn overwrite(
        &self,
        id: &str,
        mut record: Notification,
    ) -> Result<Option<Notification>, StoreError> {
        record.id = Some(id.to_string());

        match self.records.entry(id.to_string()) {
            Entry::Occupied(mut entry) => {
                entry.insert(record.clone());
                Ok(Some(record))
            }
            Entry::Vacant(_) => Ok(None),
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Notification>, StoreError> {
        Ok(self.records.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_all(&self) -> Result<Vec<Notification>, StoreError> {
        Ok(self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        if self.records.remove(id).is_some() {
            tracing::debug!(id = %id, "Notification removed from memory store");
        }
        Ok(())
    }
}
