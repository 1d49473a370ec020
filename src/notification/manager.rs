//! Resource lifecycle manager for notification records.
//!
//! Enforces the identity rules across create and update, delegates to the
//! store, and normalizes every result into an [`Outcome`] or a
//! [`ManagerError`]. HTTP status mapping happens at the API boundary only.

use std::future::Future;
use std::sync::Arc;

use tracing::Instrument;

use crate::metrics::{OperationMetrics, StoreMetrics};
use crate::store::{NotificationStore, StoreError};

use super::error::{ManagerError, StoreErrorKind, ValidationKind};
use super::types::Notification;

/// Successful outcome of a manager operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// New record stored, carrying its assigned id
    Created(Notification),
    /// Full persisted state after replacement
    Updated(Notification),
    /// All stored records, order unspecified
    Listed(Vec<Notification>),
    Found(Notification),
    /// No record under the requested id
    NotFound(String),
    /// Delete completed, whether or not the id existed
    Deleted(String),
}

impl Outcome {
    /// Label used for the operation metrics
    pub fn label(&self) -> &'static str {
        match self {
            Self::Created(_) => "created",
            Self::Updated(_) => "updated",
            Self::Listed(_) => "listed",
            Self::Found(_) => "found",
            Self::NotFound(_) => "not_found",
            Self::Deleted(_) => "deleted",
        }
    }
}

pub type ManagerResult = Result<Outcome, ManagerError>;

/// Stateless create/read/update/delete manager over a [`NotificationStore`].
///
/// Cloning is cheap; all clones share the same store.
#[derive(Clone)]
pub struct NotificationManager {
    store: Arc<dyn NotificationStore>,
}

impl NotificationManager {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// Name of the backing store
    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Store a new record. The record must not carry an id.
    pub async fn create(&self, record: Notification) -> ManagerResult {
        tracing::debug!(name = %record.name, "Request to create notification");

        let result = self.try_create(record).await;
        finish("create", result)
    }

    /// Replace an existing record. The record must carry the target id.
    pub async fn update(&self, record: Notification) -> ManagerResult {
        tracing::debug!(id = ?record.id, name = %record.name, "Request to update notification");

        let result = self.try_update(record).await;
        finish("update", result)
    }

    /// All stored records.
    pub async fn list(&self) -> ManagerResult {
        tracing::debug!("Request to list notifications");

        let result = self
            .call_store("find_all", self.store.find_all())
            .await
            .map(Outcome::Listed)
            .map_err(|e| ManagerError::store(StoreErrorKind::Unavailable, e));
        finish("list", result)
    }

    /// Look up one record. Absence is an outcome, not an error.
    pub async fn get(&self, id: &str) -> ManagerResult {
        tracing::debug!(id = %id, "Request to get notification");

        let result = self.try_get(id).await;
        finish("get", result)
    }

    /// Remove one record. Deleting a missing id still reports `Deleted`.
    pub async fn delete(&self, id: &str) -> ManagerResult {
        tracing::debug!(id = %id, "Request to delete notification");

        let result = self.try_delete(id).await;
        finish("delete", result)
    }

    async fn try_create(&self, record: Notification) -> ManagerResult {
        if let Some(id) = record.id() {
            return Err(ManagerError::validation(
                ValidationKind::IdAlreadyPresent,
                format!("A new notification cannot already have an id (got {})", id),
            ));
        }
        check_structure(&record)?;

        let stored = self
            .call_store("insert", self.store.insert(record))
            .await
            .map_err(|e| ManagerError::store(StoreErrorKind::Unavailable, e))?;

        tracing::info!(id = ?stored.id, "Notification created");
        Ok(Outcome::Created(stored))
    }

    async fn try_update(&self, record: Notification) -> ManagerResult {
        let id = match record.id() {
            Some(id) => id.to_string(),
            None => {
                return Err(ManagerError::validation(
                    ValidationKind::IdMissing,
                    "Invalid id: an updated notification must carry its id",
                ))
            }
        };
        check_structure(&record)?;

        let stored = self
            .call_store("overwrite", self.store.overwrite(&id, record))
            .await
            .map_err(|e| ManagerError::store(StoreErrorKind::Unavailable, e))?;

        match stored {
            Some(stored) => {
                tracing::info!(id = %id, "Notification updated");
                Ok(Outcome::Updated(stored))
            }
            None => Err(ManagerError::Store {
                kind: StoreErrorKind::UpdateFailed,
                message: format!("No notification with id {} to update", id),
                source: None,
            }),
        }
    }

    async fn try_get(&self, id: &str) -> ManagerResult {
        require_id(id)?;

        let found = self
            .call_store("find_by_id", self.store.find_by_id(id))
            .await
            .map_err(|e| ManagerError::store(StoreErrorKind::Unavailable, e))?;

        Ok(match found {
            Some(record) => Outcome::Found(record),
            None => Outcome::NotFound(id.to_string()),
        })
    }

    async fn try_delete(&self, id: &str) -> ManagerResult {
        require_id(id)?;

        self.call_store("delete_by_id", self.store.delete_by_id(id))
            .await
            .map_err(|e| ManagerError::store(StoreErrorKind::Unavailable, e))?;

        tracing::info!(id = %id, "Notification deleted");
        Ok(Outcome::Deleted(id.to_string()))
    }

    /// Run one store call inside a `store` span, recording latency and failures.
    async fn call_store<T, F>(&self, operation: &'static str, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        let backend = self.store.backend_name();
        let span = tracing::info_span!("store", backend = backend, operation = operation);

        let timer = StoreMetrics::start_timer(backend, operation);
        let result = call.instrument(span).await;
        timer.observe_duration();

        if let Err(e) = &result {
            StoreMetrics::record_error(backend, operation);
            tracing::error!(
                backend = backend,
                operation = operation,
                error = %e,
                "Notification store operation failed"
            );
        }

        result
    }
}

fn require_id(id: &str) -> Result<(), ManagerError> {
    if id.is_empty() {
        return Err(ManagerError::validation(
            ValidationKind::IdMissing,
            "Invalid id: identifier must not be empty",
        ));
    }
    Ok(())
}

fn check_structure(record: &Notification) -> Result<(), ManagerError> {
    record
        .validate()
        .map_err(|message| ManagerError::validation(ValidationKind::InvalidRecord, message))
}

fn finish(operation: &str, result: ManagerResult) -> ManagerResult {
    match &result {
        Ok(outcome) => OperationMetrics::record(operation, outcome.label()),
        Err(e) => {
            let outcome = match e {
                ManagerError::Validation { .. } => "validation_error",
                ManagerError::Store { .. } => "store_error",
            };
            OperationMetrics::record(operation, outcome);
        }
    }
    result
}
