//! HTTP collaborators for the flowcanvas editor.
//!
//! [`HttpBackend`] implements both the persistence and the execution
//! collaborator against a REST backend:
//!
//! - `POST {base_url}/api/workflows` stores a named workflow
//! - `POST {base_url}/api/workflows/execute` queues a graph for execution

pub mod client;
pub mod config;
pub mod error;

pub use client::HttpBackend;
pub use config::BackendConfig;
pub use error::BackendError;
