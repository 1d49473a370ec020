//! Notification record types.

use serde::{Deserialize, Serialize};

/// Maximum length of a notification name
pub const MAX_NAME_LEN: usize = 256;

/// Maximum length of a notification body
pub const MAX_CONTENT_LEN: usize = 4096;

/// Priority levels for notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub enum Priority {
    /// Low priority, can be delayed
    Low,
    /// Normal priority (default)
    #[default]
    Normal,
    /// High priority, should be delivered promptly
    High,
    /// Critical priority, immediate delivery required
    Critical,
}

/// A persisted notification record.
///
/// The `id` is assigned by the store on insert and never changes afterwards.
/// Every other field is opaque to the registry beyond the structural checks
/// in [`Notification::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Store-assigned identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Human-readable notification name
    pub name: String,

    /// Notification body (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default)]
    pub priority: Priority,

    /// Free-form JSON object (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Notification {
    /// Create a record without an identifier, ready to be inserted.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            content: None,
            priority: Priority::default(),
            metadata: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The identifier, if one is set. An empty string counts as unset.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Check the structural rules on the payload fields.
    ///
    /// The name must be 1-256 characters and not whitespace only.
    /// Identity rules (create vs. update) are enforced by the manager, not here.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name must not be blank".to_string());
        }
        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(format!("Name must be 1-{} characters", MAX_NAME_LEN));
        }

        if let Some(content) = &self.content {
            if content.chars().count() > MAX_CONTENT_LEN {
                return Err(format!(
                    "Content must be at most {} characters",
                    MAX_CONTENT_LEN
                ));
            }
        }

        if let Some(metadata) = &self.metadata {
            if !metadata.is_object() {
                return Err("Metadata must be a JSON object".to_string());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_id_counts_as_unset() {
        assert_eq!(Notification::new("alert").id(), None);
        assert_eq!(Notification::new("alert").with_id("").id(), None);
        assert_eq!(Notification::new("alert").with_id("n1").id(), Some("n1"));
    }

    #[test]
    fn test_validate_accepts_minimal_record() {
        assert!(Notification::new("alert1").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        assert!(Notification::new("").validate().is_err());
        assert_eq!(
            Notification::new(" ").validate(),
            Err("Name must not be blank".to_string())
        );
        assert!(Notification::new(" a ").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_long_name() {
        let name = "x".repeat(MAX_NAME_LEN + 1);
        assert!(Notification::new(name).validate().is_err());
        assert!(Notification::new("x".repeat(MAX_NAME_LEN)).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_long_content() {
        let record = Notification::new("alert").with_content("y".repeat(MAX_CONTENT_LEN + 1));
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_object_metadata() {
        let record = Notification::new("alert").with_metadata(json!(["a", "b"]));
        assert!(record.validate().is_err());

        let record = Notification::new("alert").with_metadata(json!({"source": "billing"}));
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_deserialize_defaults() {
        let record: Notification = serde_json::from_value(json!({"name": "alert1"})).unwrap();
        assert_eq!(record.id, None);
        assert_eq!(record.priority, Priority::Normal);
        assert_eq!(record.content, None);
        assert_eq!(record.metadata, None);
    }

    #[test]
    fn test_serialize_omits_absent_fields() {
        let record = Notification::new("alert1").with_id("n1");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"id": "n1", "name": "alert1", "priority": "Normal"}));
    }

    #[test]
    fn test_deserialize_requires_name() {
        let result: Result<Notification, _> = serde_json::from_value(json!({"content": "x"}));
        assert!(result.is_err());
    }
}
