use axum::{routing::get, Router};

use crate::server::AppState;

use super::health::health;
use super::metrics::prometheus_metrics;
use super::notification::{
    create_notification, delete_notification, get_notification, list_notifications,
    update_notification,
};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health & Metrics
        .route("/health", get(health))
        .route("/metrics", get(prometheus_metrics))
        // Notification resource
        .route(
            "/notifications",
            get(list_notifications)
                .post(create_notification)
                .put(update_notification),
        )
        .route(
            "/notifications/{id}",
            get(get_notification).delete(delete_notification),
        )
}
