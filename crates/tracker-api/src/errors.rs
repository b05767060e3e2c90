//! Error type shared by the contract layer and every backend binding.
//!
//! Bindings translate their transport failures into [`TrackerError`] so that
//! callers holding only a `dyn Client` can match on one set of variants
//! regardless of the backend behind it. No variant is retried by the core;
//! every failure is surfaced to the caller unmodified.

use thiserror::Error;

/// Convenience alias used throughout the tracker crates.
pub type Result<T, E = TrackerError> = std::result::Result<T, E>;

/// Errors produced by tracker lookups and client operations.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// No concrete backend has been bound to the requested operation.
    ///
    /// Produced by: the registry lookups before any factory is registered,
    /// and by provided [`crate::Client`] methods a binding does not override.
    #[error("Not implemented: {operation} has no registered backend")]
    NotImplemented {
        /// Name of the operation that was invoked (e.g. `"get_client"`).
        operation: &'static str,
    },

    /// An operation needed a credential that was never configured.
    ///
    /// Raised lazily, only when a request actually needs the credential.
    #[error("Missing credential: {name}")]
    MissingCredential {
        /// Human-readable description of the missing credential and where it
        /// is expected to come from.
        name: String,
    },

    /// The backing service answered with a non-success status, or the request
    /// never produced a response (connection failure, timeout).
    #[error("{}", request_failed_message(*status, message))]
    RequestFailed {
        /// HTTP status code, if a response was received.
        status: Option<u16>,
        /// Response body or transport error description, for diagnostics.
        message: String,
    },

    /// A lookup by id resolved to nothing.
    ///
    /// This is the not-found specialisation of [`TrackerError::RequestFailed`];
    /// see [`TrackerError::is_request_failure`].
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource path or id that did not resolve.
        resource: String,
    },

    /// The backing service answered successfully but the body did not have
    /// the expected shape (e.g. a record without an `id`).
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Description of the mismatch.
        message: String,
    },

    /// Local configuration could not be loaded (e.g. an unreadable credential
    /// file) or the transport could not be constructed.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },
}

fn request_failed_message(status: Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("Request failed (HTTP {code}): {message}"),
        None => format!("Request failed: {message}"),
    }
}

impl TrackerError {
    /// Returns `true` for failures reported by the backing service:
    /// [`TrackerError::RequestFailed`] and its [`TrackerError::NotFound`]
    /// specialisation.
    pub fn is_request_failure(&self) -> bool {
        matches!(self, Self::RequestFailed { .. } | Self::NotFound { .. })
    }

    /// Returns the HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => *status,
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_a_request_failure() {
        let err = TrackerError::NotFound {
            resource: "/cards/c1".into(),
        };
        assert!(err.is_request_failure());
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn credential_errors_are_not_request_failures() {
        let err = TrackerError::MissingCredential {
            name: "TRELLO_TOKEN".into(),
        };
        assert!(!err.is_request_failure());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn request_failed_display_includes_status() {
        let err = TrackerError::RequestFailed {
            status: Some(401),
            message: "invalid token".into(),
        };
        assert_eq!(err.to_string(), "Request failed (HTTP 401): invalid token");

        let err = TrackerError::RequestFailed {
            status: None,
            message: "operation timed out".into(),
        };
        assert_eq!(err.to_string(), "Request failed: operation timed out");
    }
}
