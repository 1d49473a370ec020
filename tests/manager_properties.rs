//! Manager behavior against healthy and failing stores.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio_test::{assert_err, assert_ok};

use ara_notification_registry::notification::{
    ManagerError, Notification, NotificationManager, Outcome, Priority, StoreErrorKind,
};
use ara_notification_registry::store::{MemoryNotificationStore, NotificationStore, StoreError};

/// Store that refuses every call and counts how often it was reached.
#[derive(Default)]
struct FailingStore {
    calls: AtomicUsize,
}

impl FailingStore {
    fn fail(&self) -> StoreError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        StoreError::Unavailable("connection refused".to_string())
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationStore for FailingStore {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    async fn insert(&self, _record: Notification) -> Result<Notification, StoreError> {
        Err(self.fail())
    }

    async fn overwrite(
        &self,
        _id: &str,
        _record: Notification,
    ) -> Result<Option<Notification>, StoreError> {
        Err(self.fail())
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<Notification>, StoreError> {
        Err(self.fail())
    }

    async fn find_all(&self) -> Result<Vec<Notification>, StoreError> {
        Err(self.fail())
    }

    async fn delete_by_id(&self, _id: &str) -> Result<(), StoreError> {
        Err(self.fail())
    }
}

fn assert_unavailable(err: ManagerError) {
    assert!(
        matches!(
            err,
            ManagerError::Store {
                kind: StoreErrorKind::Unavailable,
                source: Some(_),
                ..
            }
        ),
        "expected unavailable store error, got {:?}",
        err
    );
}

#[tokio::test]
async fn test_store_failures_surface_as_unavailable() {
    let store = Arc::new(FailingStore::default());
    let manager = NotificationManager::new(store.clone());

    assert_unavailable(assert_err!(manager.create(Notification::new("alert1")).await));
    assert_unavailable(assert_err!(
        manager
            .update(Notification::new("alert1").with_id("n1"))
            .await
    ));
    assert_unavailable(assert_err!(manager.list().await));
    assert_unavailable(assert_err!(manager.get("n1").await));
    assert_unavailable(assert_err!(manager.delete("n1").await));

    assert_eq!(store.calls(), 5);
}

#[tokio::test]
async fn test_validation_failures_never_reach_store() {
    let store = Arc::new(FailingStore::default());
    let manager = NotificationManager::new(store.clone());

    let err = assert_err!(manager.create(Notification::new("alert1").with_id("n1")).await);
    assert_eq!(err.kind(), "id-already-present");

    let err = assert_err!(manager.update(Notification::new("alert1")).await);
    assert_eq!(err.kind(), "id-missing");

    let err = assert_err!(manager.create(Notification::new("x".repeat(300))).await);
    assert_eq!(err.kind(), "invalid-record");

    assert_eq!(assert_err!(manager.get("").await).kind(), "id-missing");
    assert_eq!(assert_err!(manager.delete("").await).kind(), "id-missing");

    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_created_ids_are_unique() {
    let manager = NotificationManager::new(Arc::new(MemoryNotificationStore::new()));

    let mut ids = HashSet::new();
    for i in 0..100 {
        match assert_ok!(manager.create(Notification::new(format!("alert{}", i))).await) {
            Outcome::Created(record) => {
                let id = record.id.expect("created record carries an id");
                assert!(ids.insert(id), "duplicate id assigned");
            }
            other => panic!("expected Created, got {:?}", other),
        }
    }

    match assert_ok!(manager.list().await) {
        Outcome::Listed(records) => assert_eq!(records.len(), 100),
        other => panic!("expected Listed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_concurrent_creates() {
    let manager = NotificationManager::new(Arc::new(MemoryNotificationStore::new()));

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let manager = manager.clone();
            tokio::spawn(async move {
                manager
                    .create(Notification::new(format!("alert{}", i)).with_priority(Priority::High))
                    .await
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        if let Outcome::Created(record) = assert_ok!(handle.await.unwrap()) {
            ids.insert(record.id.unwrap());
        }
    }
    assert_eq!(ids.len(), 20);
}

#[tokio::test]
async fn test_update_preserves_id_and_stores_full_state() {
    let manager = NotificationManager::new(Arc::new(MemoryNotificationStore::new()));

    let Outcome::Created(created) = assert_ok!(
        manager
            .create(
                Notification::new("alert1")
                    .with_content("disk almost full")
                    .with_metadata(serde_json::json!({"host": "db-1"}))
            )
            .await
    ) else {
        panic!("expected Created");
    };
    let id = created.id.clone().unwrap();

    let replacement = Notification::new("alert1")
        .with_priority(Priority::Critical)
        .with_id(id.clone());
    let outcome = assert_ok!(manager.update(replacement.clone()).await);
    assert_eq!(outcome, Outcome::Updated(replacement.clone()));

    assert_eq!(
        assert_ok!(manager.get(&id).await),
        Outcome::Found(replacement)
    );
}
