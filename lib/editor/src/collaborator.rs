//! External collaborators.
//!
//! The editor only produces and consumes workflow documents. Storing them
//! and running them is someone else's job; these traits are the boundary.

use crate::error::CollaboratorError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use flowcanvas_core::{RunId, WorkflowId};
use flowcanvas_workflow::{Workflow, WorkflowGraph};
use serde::{Deserialize, Serialize};

/// Acknowledgement of a stored workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveReceipt {
    pub workflow_id: WorkflowId,
    pub saved_at: DateTime<Utc>,
}

/// Acknowledgement of a workflow handed to the execution engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReceipt {
    pub run_id: RunId,
    pub queued_at: DateTime<Utc>,
}

/// Persistence collaborator.
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Stores a named workflow.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or refuses the document.
    async fn save(&self, workflow: &Workflow) -> Result<SaveReceipt, CollaboratorError>;
}

/// Execution collaborator.
///
/// The engine interprets node kinds and configuration; the editor never
/// does.
#[async_trait]
pub trait WorkflowRunner: Send + Sync {
    /// Queues a graph for execution.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is unreachable or refuses the graph.
    async fn execute(&self, graph: &WorkflowGraph) -> Result<RunReceipt, CollaboratorError>;
}
