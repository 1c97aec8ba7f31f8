//! Catalog error types.

use std::fmt;

/// Errors from catalog lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No template with this ID is registered.
    TemplateNotFound { template_id: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TemplateNotFound { template_id } => {
                write!(f, "node template '{template_id}' not found")
            }
        }
    }
}

impl std::error::Error for CatalogError {}
