//! Entity alert headers.
//!
//! Clients of the registry read these to show "created"/"updated"/"deleted"
//! banners without parsing the body:
//!
//! | Header | Value |
//! |--------|-------|
//! | `X-{app}-alert` | `{app}.notification.{action}` |
//! | `X-{app}-error` | `error.{code}` (validation failures only) |
//! | `X-{app}-params` | record id, or `notification` on failures |

use axum::http::{HeaderMap, HeaderName, HeaderValue};

/// Entity name used in alert values
pub const ENTITY_NAME: &str = "notification";

/// Lifecycle action reported in the alert header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityAction {
    Created,
    Updated,
    Deleted,
}

impl EntityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }
}

/// Add the success alert headers for `action` on record `id`.
pub fn entity_alert(headers: &mut HeaderMap, application_name: &str, action: EntityAction, id: &str) {
    insert(
        headers,
        &format!("X-{}-alert", application_name),
        &format!("{}.{}.{}", application_name, ENTITY_NAME, action.as_str()),
    );
    insert(headers, &format!("X-{}-params", application_name), id);
}

/// Add the failure alert headers for a rejected request.
pub fn failure_alert(headers: &mut HeaderMap, application_name: &str, code: &str) {
    insert(
        headers,
        &format!("X-{}-error", application_name),
        &format!("error.{}", code),
    );
    insert(headers, &format!("X-{}-params", application_name), ENTITY_NAME);
}

fn insert(headers: &mut HeaderMap, name: &str, value: &str) {
    let (Ok(name), Ok(value)) = (
        HeaderName::from_bytes(name.as_bytes()),
        HeaderValue::from_str(value),
    ) else {
        tracing::warn!(header = %name, "Skipping alert header with invalid name or value");
        return;
    };
    headers.insert(name, value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_alert_headers() {
        let mut headers = HeaderMap::new();
        entity_alert(&mut headers, "registry", EntityAction::Created, "n1");

        assert_eq!(
            headers.get("x-registry-alert").unwrap(),
            "registry.notification.created"
        );
        assert_eq!(headers.get("x-registry-params").unwrap(), "n1");
    }

    #[test]
    fn test_failure_alert_headers() {
        let mut headers = HeaderMap::new();
        failure_alert(&mut headers, "registry", "id-missing");

        assert_eq!(headers.get("x-registry-error").unwrap(), "error.id-missing");
        assert_eq!(headers.get("x-registry-params").unwrap(), "notification");
    }

    #[test]
    fn test_invalid_application_name_is_skipped() {
        let mut headers = HeaderMap::new();
        entity_alert(&mut headers, "bad name", EntityAction::Deleted, "n1");
        assert!(headers.is_empty());
    }
}
