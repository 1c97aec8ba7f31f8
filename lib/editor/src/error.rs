//! Error types for the editor crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `ValidationError`: user-facing preconditions checked before any I/O
//! - `CollaboratorError`: what a persistence or execution backend reports
//! - `EditorError`: what the controller facade surfaces to the host

use crate::reducer::Rejection;
use std::fmt;

/// A precondition on save that failed locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The graph has no nodes.
    EmptyGraph,
    /// The workflow name is empty or whitespace.
    BlankName,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGraph => write!(f, "add at least one node before saving"),
            Self::BlankName => write!(f, "enter a workflow name before saving"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors reported by a persistence or execution collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    /// The collaborator could not be reached.
    Unavailable { details: String },
    /// The collaborator answered with a refusal.
    Rejected { status: u16, details: String },
    /// The collaborator's answer could not be understood.
    Decode { details: String },
}

impl fmt::Display for CollaboratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { details } => write!(f, "collaborator unavailable: {details}"),
            Self::Rejected { status, details } => {
                write!(f, "collaborator rejected the request ({status}): {details}")
            }
            Self::Decode { details } => {
                write!(f, "failed to decode collaborator response: {details}")
            }
        }
    }
}

impl std::error::Error for CollaboratorError {}

/// The asynchronous operations the editor hands to collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Save,
    Execute,
}

impl Operation {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Save => "save",
            Self::Execute => "execute",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by the graph controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// No catalog template has this ID.
    TemplateNotFound { template_id: String },
    /// A save precondition failed; nothing was sent.
    Validation(ValidationError),
    /// A loaded document violates a graph invariant.
    InvalidDocument { details: String },
    /// The editor refused the interaction; the state is unchanged.
    Rejected(Rejection),
    /// The same operation is already outstanding.
    AlreadyInFlight { operation: Operation },
    /// The persistence collaborator failed.
    Persistence { details: String },
    /// The execution collaborator failed.
    Execution { details: String },
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TemplateNotFound { template_id } => {
                write!(f, "node template '{template_id}' not found")
            }
            Self::Validation(reason) => write!(f, "{reason}"),
            Self::InvalidDocument { details } => {
                write!(f, "invalid workflow document: {details}")
            }
            Self::Rejected(rejection) => write!(f, "{rejection}"),
            Self::AlreadyInFlight { operation } => {
                write!(f, "{operation} is already in progress")
            }
            Self::Persistence { details } => write!(f, "failed to save workflow: {details}"),
            Self::Execution { details } => write!(f, "failed to execute workflow: {details}"),
        }
    }
}

impl std::error::Error for EditorError {}

impl From<ValidationError> for EditorError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_user_facing() {
        assert_eq!(
            EditorError::from(ValidationError::EmptyGraph).to_string(),
            "add at least one node before saving"
        );
    }

    #[test]
    fn in_flight_names_operation() {
        let err = EditorError::AlreadyInFlight {
            operation: Operation::Execute,
        };
        assert_eq!(err.to_string(), "execute is already in progress");
    }

    #[test]
    fn collaborator_rejection_includes_status() {
        let err = CollaboratorError::Rejected {
            status: 422,
            details: "name taken".to_string(),
        };
        assert!(err.to_string().contains("422"));
    }
}
