//! Save and execute submission.
//!
//! Submission is split from the reducer: the controller validates and
//! snapshots the graph synchronously, then a [`Submitter`] (cheap to clone,
//! safe to move into a spawned task) performs the outbound call while the
//! interaction loop keeps running. At most one save and one execute are
//! outstanding at a time.

use crate::collaborator::{RunReceipt, SaveReceipt, WorkflowRunner, WorkflowStore};
use crate::error::{EditorError, Operation, ValidationError};
use flowcanvas_workflow::{Workflow, WorkflowGraph};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, instrument, warn};

/// Checks the local preconditions for saving.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyGraph`] if there are no nodes, or
/// [`ValidationError::BlankName`] if the name is blank.
pub fn validate_for_save(workflow: &Workflow) -> Result<(), ValidationError> {
    if workflow.graph.is_empty() {
        return Err(ValidationError::EmptyGraph);
    }
    if workflow.has_blank_name() {
        return Err(ValidationError::BlankName);
    }
    Ok(())
}

/// Marks an operation as outstanding until dropped.
struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>, operation: Operation) -> Result<Self, EditorError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| EditorError::AlreadyInFlight { operation })?;
        Ok(Self {
            flag: Arc::clone(flag),
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Hands workflows to the persistence and execution collaborators.
#[derive(Clone)]
pub struct Submitter {
    store: Arc<dyn WorkflowStore>,
    runner: Arc<dyn WorkflowRunner>,
    saving: Arc<AtomicBool>,
    executing: Arc<AtomicBool>,
}

impl Submitter {
    pub fn new(store: Arc<dyn WorkflowStore>, runner: Arc<dyn WorkflowRunner>) -> Self {
        Self {
            store,
            runner,
            saving: Arc::new(AtomicBool::new(false)),
            executing: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn is_executing(&self) -> bool {
        self.executing.load(Ordering::Acquire)
    }

    /// Sends a workflow to the persistence collaborator.
    ///
    /// Failures are reported as-is; nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails (before any call is made), a
    /// save is already outstanding, or the store fails.
    #[instrument(skip(self, workflow), fields(name = %workflow.name, nodes = workflow.graph.node_count()))]
    pub async fn save(
        &self,
        workflow: Workflow,
    ) -> flowcanvas_core::Result<SaveReceipt, EditorError> {
        validate_for_save(&workflow).map_err(EditorError::from)?;
        let _guard = InFlightGuard::acquire(&self.saving, Operation::Save)?;

        match self.store.save(&workflow).await {
            Ok(receipt) => {
                info!(workflow_id = %receipt.workflow_id, "workflow saved");
                Ok(receipt)
            }
            Err(err) => {
                warn!(error = %err, "workflow save failed");
                Err(EditorError::Persistence {
                    details: err.to_string(),
                }
                .into())
            }
        }
    }

    /// Sends a graph to the execution collaborator.
    ///
    /// Only the structural invariants the graph already upholds apply; the
    /// engine owns every semantic check.
    ///
    /// # Errors
    ///
    /// Returns an error if an execute is already outstanding or the engine
    /// fails.
    #[instrument(skip(self, graph), fields(nodes = graph.node_count(), connections = graph.connection_count()))]
    pub async fn execute(
        &self,
        graph: WorkflowGraph,
    ) -> flowcanvas_core::Result<RunReceipt, EditorError> {
        let _guard = InFlightGuard::acquire(&self.executing, Operation::Execute)?;

        match self.runner.execute(&graph).await {
            Ok(receipt) => {
                info!(run_id = %receipt.run_id, "workflow queued for execution");
                Ok(receipt)
            }
            Err(err) => {
                warn!(error = %err, "workflow execution failed");
                Err(EditorError::Execution {
                    details: err.to_string(),
                }
                .into())
            }
        }
    }
}
