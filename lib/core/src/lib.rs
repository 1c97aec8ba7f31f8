//! Core types shared by every flowcanvas crate.
//!
//! This crate provides the typed identifiers, canvas geometry and the
//! error-handling foundation used by the workflow graph editor.

pub mod error;
pub mod geometry;
pub mod id;

pub use error::Result;
pub use geometry::Point;
pub use id::{ConnectionId, NodeId, ParseIdError, RunId, WorkflowId};
