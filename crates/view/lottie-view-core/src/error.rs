//! Error types for the view adapter

use serde::{Deserialize, Serialize};

use crate::config::SourceKind;

/// Errors raised while mounting or driving a view.
///
/// Mount failures abort the attach and are meant for the host's own error
/// boundary; nothing in this crate retries. Runtime failures inside the
/// engine never show up here at all: they reach the caller only through the
/// `Error` event slot.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ViewError {
    /// No usable container element could be resolved at attach time
    #[error("view mounted without a container element")]
    MissingContainer,

    /// The animation-type discriminant named something unknown
    #[error("unknown animation source kind: {value}")]
    UnknownSourceKind { value: String },

    /// The discriminant and the supplied payload disagree
    #[error("{kind} animation source requires `{missing}`")]
    SourceMismatch { kind: SourceKind, missing: String },

    /// Attach ran on a view that already created its handle
    #[error("view {id} was already attached")]
    AlreadyAttached { id: String },

    /// A prop string did not parse
    #[error("invalid {field} value: {value}")]
    InvalidValue { field: String, value: String },

    /// The engine factory refused the configuration
    #[error("engine error: {message}")]
    Engine { message: String },
}

impl ViewError {
    /// Check whether this error aborts a mount (as opposed to rejecting a
    /// single prop value at the parsing boundary).
    #[inline]
    pub fn is_mount_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingContainer
                | Self::UnknownSourceKind { .. }
                | Self::SourceMismatch { .. }
                | Self::AlreadyAttached { .. }
                | Self::Engine { .. }
        )
    }

    /// Get error category for logging/metrics
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingContainer | Self::UnknownSourceKind { .. } | Self::SourceMismatch { .. } => {
                "mount"
            }
            Self::AlreadyAttached { .. } => "lifecycle",
            Self::InvalidValue { .. } => "validation",
            Self::Engine { .. } => "engine",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(ViewError::MissingContainer.category(), "mount");
        assert_eq!(
            ViewError::AlreadyAttached {
                id: "view-1".to_string()
            }
            .category(),
            "lifecycle"
        );
        assert_eq!(
            ViewError::InvalidValue {
                field: "playState".to_string(),
                value: "bouncing".to_string()
            }
            .category(),
            "validation"
        );
    }

    #[test]
    fn test_mount_failures() {
        assert!(ViewError::MissingContainer.is_mount_failure());
        assert!(ViewError::UnknownSourceKind {
            value: "inline".to_string()
        }
        .is_mount_failure());
        assert!(!ViewError::InvalidValue {
            field: "direction".to_string(),
            value: "sideways".to_string()
        }
        .is_mount_failure());
    }

    #[test]
    fn test_serialization() {
        let error = ViewError::UnknownSourceKind {
            value: "inline".to_string(),
        };
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: ViewError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }

    #[test]
    fn test_messages_name_the_offender() {
        let error = ViewError::UnknownSourceKind {
            value: "inline".to_string(),
        };
        assert!(error.to_string().contains("inline"));
    }
}
