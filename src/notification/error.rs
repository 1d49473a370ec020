//! Failure kinds returned by the notification manager.

use std::fmt;

use thiserror::Error;

use crate::store::StoreError;

/// Client-caused identity or structure violation. Never reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    /// A record presented for creation already carries an id
    IdAlreadyPresent,
    /// An update, lookup or delete without an id
    IdMissing,
    /// Payload fields fail structural checks
    InvalidRecord,
}

impl ValidationKind {
    /// Stable machine-readable code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IdAlreadyPresent => "id-already-present",
            Self::IdMissing => "id-missing",
            Self::InvalidRecord => "invalid-record",
        }
    }
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store-caused failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The update target does not exist, or the overwrite failed
    UpdateFailed,
    /// The store could not be reached or rejected the operation
    Unavailable,
}

impl StoreErrorKind {
    /// Stable machine-readable code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpdateFailed => "update-failed",
            Self::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure outcome of a manager operation.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Validation error ({kind}): {message}")]
    Validation {
        kind: ValidationKind,
        message: String,
    },

    #[error("Store error ({kind}): {message}")]
    Store {
        kind: StoreErrorKind,
        message: String,
        #[source]
        source: Option<StoreError>,
    },
}

impl ManagerError {
    pub fn validation(kind: ValidationKind, message: impl Into<String>) -> Self {
        Self::Validation {
            kind,
            message: message.into(),
        }
    }

    /// Wrap a failed store call, keeping the underlying cause.
    pub fn store(kind: StoreErrorKind, source: StoreError) -> Self {
        Self::Store {
            kind,
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Stable machine-readable code
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { kind, .. } => kind.as_str(),
            Self::Store { kind, .. } => kind.as_str(),
        }
    }

    /// Human-readable description of the violated rule or store condition
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message, .. } | Self::Store { message, .. } => message,
        }
    }
}
