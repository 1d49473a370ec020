//! API layer - HTTP endpoint handlers.

mod alerts;
mod health;
mod metrics;
mod notification;
mod routes;

pub use alerts::{entity_alert, failure_alert, EntityAction, ENTITY_NAME};
pub use health::{health, HealthResponse};
pub use metrics::prometheus_metrics;
pub use notification::{
    create_notification, delete_notification, get_notification, list_notifications,
    update_notification, NOTIFICATIONS_PATH,
};
pub use routes::api_routes;
