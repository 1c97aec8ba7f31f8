//! CLI error types.

use std::fmt;
use std::path::PathBuf;

/// Errors from running a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// A workflow file could not be read.
    Read { path: PathBuf, details: String },
    /// A workflow file is not a workflow document.
    Parse { path: PathBuf, details: String },
    /// An output file could not be written.
    Write { path: PathBuf, details: String },
    /// The document breaks a graph invariant.
    Integrity { details: String },
    /// `save` or `execute` without `FLOWCANVAS_BACKEND__BASE_URL`.
    MissingBackend,
    /// The backend client could not be set up.
    Backend { details: String },
    /// The editor refused or failed the operation.
    Editor { details: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, details } => {
                write!(f, "failed to read {}: {details}", path.display())
            }
            Self::Parse { path, details } => {
                write!(f, "{} is not a workflow document: {details}", path.display())
            }
            Self::Write { path, details } => {
                write!(f, "failed to write {}: {details}", path.display())
            }
            Self::Integrity { details } => write!(f, "workflow is inconsistent: {details}"),
            Self::MissingBackend => write!(
                f,
                "no backend configured; set FLOWCANVAS_BACKEND__BASE_URL"
            ),
            Self::Backend { details } => write!(f, "backend setup failed: {details}"),
            Self::Editor { details } => write!(f, "{details}"),
        }
    }
}

impl std::error::Error for CliError {}
