//! Notification records and their lifecycle.
//!
//! This module provides:
//! - The [`Notification`] record and its structural rules
//! - [`NotificationManager`], which enforces identity rules and maps store
//!   results to [`Outcome`] values
//!
//! # Example
//!
//! ```ignore
//! let manager = NotificationManager::new(Arc::new(MemoryNotificationStore::new()));
//!
//! let Outcome::Created(created) = manager.create(Notification::new("alert1")).await? else {
//!     unreachable!()
//! };
//! let id = created.id.clone().unwrap();
//!
//! manager.update(Notification::new("alert1-v2").with_id(id.clone())).await?;
//! manager.delete(&id).await?;
//! ```

mod error;
mod manager;
mod types;

pub use error::{ManagerError, StoreErrorKind, ValidationKind};
pub use manager::{ManagerResult, NotificationManager, Outcome};
pub use types::{Notification, Priority, MAX_CONTENT_LEN, MAX_NAME_LEN};
