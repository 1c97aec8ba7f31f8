//! In-memory collaborators for tests.

use crate::collaborator::{RunReceipt, SaveReceipt, WorkflowRunner, WorkflowStore};
use crate::error::CollaboratorError;
use async_trait::async_trait;
use chrono::Utc;
use flowcanvas_core::{RunId, WorkflowId};
use flowcanvas_workflow::{Workflow, WorkflowGraph};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Records every saved workflow; optionally fails or waits for a release.
#[derive(Clone, Default)]
pub(crate) struct InMemoryStore {
    pub saved: Arc<Mutex<Vec<Workflow>>>,
    pub failure: Option<CollaboratorError>,
    pub gate: Option<Arc<Notify>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(failure: CollaboratorError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn saved(&self) -> Vec<Workflow> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkflowStore for InMemoryStore {
    async fn save(&self, workflow: &Workflow) -> Result<SaveReceipt, CollaboratorError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        self.saved.lock().unwrap().push(workflow.clone());
        Ok(SaveReceipt {
            workflow_id: WorkflowId::new(),
            saved_at: Utc::now(),
        })
    }
}

/// Records every executed graph; optionally fails or waits for a release.
#[derive(Clone, Default)]
pub(crate) struct InMemoryRunner {
    pub executed: Arc<Mutex<Vec<WorkflowGraph>>>,
    pub failure: Option<CollaboratorError>,
    pub gate: Option<Arc<Notify>>,
}

impl InMemoryRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(failure: CollaboratorError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn executed(&self) -> Vec<WorkflowGraph> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkflowRunner for InMemoryRunner {
    async fn execute(&self, graph: &WorkflowGraph) -> Result<RunReceipt, CollaboratorError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        self.executed.lock().unwrap().push(graph.clone());
        Ok(RunReceipt {
            run_id: RunId::new(),
            queued_at: Utc::now(),
        })
    }
}
