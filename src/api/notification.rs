//! Notification CRUD endpoints.
//!
//! The handlers decode the request, call the manager, and translate the
//! returned [`Outcome`] or error into a response in [`render`].

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::error::AppError;
use crate::notification::{ManagerResult, Notification, Outcome};
use crate::server::AppState;

use super::alerts::{entity_alert, failure_alert, EntityAction};

/// Base path of the notification resource
pub const NOTIFICATIONS_PATH: &str = "/notifications";

/// POST /notifications - Create a new notification
#[tracing::instrument(name = "http.create_notification", skip(state, payload))]
pub async fn create_notification(
    State(state): State<AppState>,
    payload: Result<Json<Notification>, JsonRejection>,
) -> Response {
    let record = match decode_body(payload) {
        Ok(record) => record,
        Err(e) => return error_response(&state, e),
    };

    let result = state.manager.create(record).await;
    render(&state, result)
}

/// PUT /notifications - Replace an existing notification
#[tracing::instrument(name = "http.update_notification", skip(state, payload))]
pub async fn update_notification(
    State(state): State<AppState>,
    payload: Result<Json<Notification>, JsonRejection>,
) -> Response {
    let record = match decode_body(payload) {
        Ok(record) => record,
        Err(e) => return error_response(&state, e),
    };

    let result = state.manager.update(record).await;
    render(&state, result)
}

/// GET /notifications - List all notifications
#[tracing::instrument(name = "http.list_notifications", skip(state))]
pub async fn list_notifications(State(state): State<AppState>) -> Response {
    let result = state.manager.list().await;
    render(&state, result)
}

/// GET /notifications/{id} - Get a specific notification
#[tracing::instrument(name = "http.get_notification", skip(state))]
pub async fn get_notification(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let result = state.manager.get(&id).await;
    render(&state, result)
}

/// DELETE /notifications/{id} - Delete a notification
#[tracing::instrument(name = "http.delete_notification", skip(state))]
pub async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let result = state.manager.delete(&id).await;
    render(&state, result)
}

fn decode_body(payload: Result<Json<Notification>, JsonRejection>) -> Result<Notification, AppError> {
    payload
        .map(|Json(record)| record)
        .map_err(|rejection| match rejection.status() {
            // Body exceeded server.max_body_bytes while buffering
            StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(rejection.body_text()),
            _ => AppError::Validation {
                code: "malformed-body",
                message: rejection.body_text(),
            },
        })
}

/// Map a manager result onto status, headers and body.
fn render(state: &AppState, result: ManagerResult) -> Response {
    let app = state.settings.api.application_name.as_str();

    match result {
        Ok(Outcome::Created(record)) => {
            let id = record.id.clone().unwrap_or_default();
            let mut response = (StatusCode::CREATED, Json(record)).into_response();

            let location = format!("{}/{}", NOTIFICATIONS_PATH, id);
            if let Ok(v) = HeaderValue::from_str(&location) {
                response.headers_mut().insert(header::LOCATION, v);
            }
            entity_alert(response.headers_mut(), app, EntityAction::Created, &id);
            response
        }
        Ok(Outcome::Updated(record)) => {
            let id = record.id.clone().unwrap_or_default();
            let mut response = (StatusCode::OK, Json(record)).into_response();
            entity_alert(response.headers_mut(), app, EntityAction::Updated, &id);
            response
        }
        Ok(Outcome::Listed(records)) => (StatusCode::OK, Json(records)).into_response(),
        Ok(Outcome::Found(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(Outcome::NotFound(id)) => {
            AppError::NotFound(format!("Notification {} not found", id)).into_response()
        }
        Ok(Outcome::Deleted(id)) => {
            let mut response = StatusCode::NO_CONTENT.into_response();
            entity_alert(response.headers_mut(), app, EntityAction::Deleted, &id);
            response
        }
        Err(e) => error_response(state, e.into()),
    }
}

fn error_response(state: &AppState, err: AppError) -> Response {
    let code = err.code();
    let is_validation = matches!(err, AppError::Validation { .. });

    let mut response = err.into_response();
    if is_validation {
        failure_alert(
            response.headers_mut(),
            &state.settings.api.application_name,
            code,
        );
    }
    response
}
