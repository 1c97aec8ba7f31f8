//! Error types for the backend crate.

use std::fmt;

/// Errors from setting up the HTTP backend.
///
/// Per-request failures are reported as
/// [`CollaboratorError`](flowcanvas_editor::CollaboratorError).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The configured base URL is not an absolute http(s) URL.
    InvalidBaseUrl { url: String, details: String },
    /// The HTTP client could not be constructed.
    ClientBuild { details: String },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBaseUrl { url, details } => {
                write!(f, "invalid backend URL '{url}': {details}")
            }
            Self::ClientBuild { details } => {
                write!(f, "failed to build HTTP client: {details}")
            }
        }
    }
}

impl std::error::Error for BackendError {}
