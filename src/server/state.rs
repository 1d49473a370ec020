use std::sync::Arc;

use crate::config::Settings;
use crate::error::Result;
use crate::notification::NotificationManager;
use crate::store::{create_notification_store, NotificationStore};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub manager: NotificationManager,
}

impl AppState {
    /// Build the state, connecting the store named in `settings`.
    pub async fn new(settings: Settings) -> Result<Self> {
        let store = create_notification_store(&settings).await?;
        Ok(Self::with_store(settings, store))
    }

    /// Build the state around an already constructed store.
    pub fn with_store(settings: Settings, store: Arc<dyn NotificationStore>) -> Self {
        Self {
            settings: Arc::new(settings),
            manager: NotificationManager::new(store),
        }
    }
}
