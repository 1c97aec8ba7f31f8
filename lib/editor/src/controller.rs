//! The graph controller facade.
//!
//! Owns the current [`EditorState`] and advances it through [`reduce`].
//! Each UI operation is a thin wrapper that builds the matching event, so
//! the controller and a host that dispatches events directly see exactly
//! the same transitions. `create_node` calls the reducer's node insertion
//! step directly so it can hand back the new id.

use crate::collaborator::{RunReceipt, SaveReceipt};
use crate::error::EditorError;
use crate::event::{EditorEvent, PointerTarget};
use crate::reducer::{Outcome, Rejection, insert_node, reduce};
use crate::state::EditorState;
use crate::submit::{Submitter, validate_for_save};
use flowcanvas_catalog::{CategoryFilter, NodeTemplate, NodeTypeCatalog};
use flowcanvas_core::{ConnectionId, NodeId, Point, Result};
use flowcanvas_workflow::{NodePatch, Workflow, WorkflowGraph};
use tracing::debug;

/// The single owner and mutator of editor state.
pub struct GraphController {
    catalog: NodeTypeCatalog,
    state: EditorState,
    submitter: Submitter,
}

impl GraphController {
    pub fn new(catalog: NodeTypeCatalog, submitter: Submitter) -> Self {
        Self {
            catalog,
            state: EditorState::new(),
            submitter,
        }
    }

    #[must_use]
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    #[must_use]
    pub fn catalog(&self) -> &NodeTypeCatalog {
        &self.catalog
    }

    /// Returns a handle that can submit without borrowing the controller,
    /// for hosts that run I/O on a separate task.
    #[must_use]
    pub fn submitter(&self) -> Submitter {
        self.submitter.clone()
    }

    /// Applies one event.
    pub fn dispatch(&mut self, event: EditorEvent) -> Outcome {
        let state = std::mem::take(&mut self.state);
        let transition = reduce(state, event, &self.catalog);
        self.state = transition.state;
        transition.outcome
    }

    /// Templates for the node picker.
    #[must_use]
    pub fn picker_templates(
        &self,
        category: CategoryFilter,
        search: Option<&str>,
    ) -> Vec<&NodeTemplate> {
        self.catalog.filter(category, search)
    }

    /// Creates a node from a template at a screen position.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::TemplateNotFound`] if the catalog has no such
    /// template, or [`EditorError::Rejected`] if the graph refuses the node.
    pub fn create_node(
        &mut self,
        template_id: &str,
        screen: Point,
    ) -> Result<NodeId, EditorError> {
        let node_id = insert_node(&mut self.state, template_id, screen, &self.catalog)
            .map_err(rejection_error)?;
        debug!(%node_id, template_id, "node created");
        Ok(node_id)
    }

    /// Creates a node where the picker was opened, or at the canvas origin
    /// on screen if it is closed.
    ///
    /// # Errors
    ///
    /// See [`create_node`](Self::create_node).
    pub fn create_from_picker(&mut self, template_id: &str) -> Result<NodeId, EditorError> {
        let screen = self
            .state
            .picker
            .map_or(self.state.viewport_offset, |picker| picker.screen);
        self.create_node(template_id, screen)
    }

    pub fn delete_node(&mut self, node_id: NodeId) -> Outcome {
        self.dispatch(EditorEvent::DeleteNode { node_id })
    }

    /// Merges a patch into a node; a missing node is absorbed.
    pub fn update_node(&mut self, node_id: NodeId, patch: NodePatch) -> Outcome {
        self.dispatch(EditorEvent::UpdateNode { node_id, patch })
    }

    pub fn start_connection(&mut self, node_id: NodeId, output: &str) -> Outcome {
        self.dispatch(EditorEvent::StartConnection {
            node_id,
            output: output.to_string(),
        })
    }

    pub fn complete_connection(&mut self, node_id: NodeId, input: &str) -> Outcome {
        self.dispatch(EditorEvent::CompleteConnection {
            node_id,
            input: input.to_string(),
        })
    }

    pub fn delete_connection(&mut self, connection_id: ConnectionId) -> Outcome {
        self.dispatch(EditorEvent::DeleteConnection { connection_id })
    }

    pub fn pointer_down(&mut self, target: PointerTarget, screen: Point) -> Outcome {
        self.dispatch(EditorEvent::PointerDown { target, screen })
    }

    pub fn pointer_move(&mut self, screen: Point) -> Outcome {
        self.dispatch(EditorEvent::PointerMove { screen })
    }

    pub fn pointer_up(&mut self) -> Outcome {
        self.dispatch(EditorEvent::PointerUp)
    }

    pub fn pointer_leave(&mut self) -> Outcome {
        self.dispatch(EditorEvent::PointerLeave)
    }

    pub fn canvas_click(&mut self) -> Outcome {
        self.dispatch(EditorEvent::CanvasClick)
    }

    pub fn double_click(&mut self, screen: Point) -> Outcome {
        self.dispatch(EditorEvent::DoubleClick { screen })
    }

    pub fn close_picker(&mut self) -> Outcome {
        self.dispatch(EditorEvent::ClosePicker)
    }

    /// Drops every node and connection. Confirmation is the caller's job.
    pub fn clear(&mut self) -> Outcome {
        self.dispatch(EditorEvent::Clear)
    }

    /// Replaces the graph with a reloaded document.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidDocument`] if the document breaks a
    /// graph invariant; the current graph is kept.
    pub fn load(&mut self, workflow: Workflow) -> Result<(), EditorError> {
        match self.dispatch(EditorEvent::Load { workflow }) {
            Outcome::Rejected(rejection) => Err(rejection_error(rejection).into()),
            _ => Ok(()),
        }
    }

    /// Validates and snapshots the graph for saving.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Validation`] if the graph is empty or the name
    /// is blank.
    pub fn prepare_save(&self, name: &str) -> Result<Workflow, EditorError> {
        let workflow = self.state.to_workflow(name);
        validate_for_save(&workflow).map_err(EditorError::from)?;
        Ok(workflow)
    }

    /// Snapshots the graph for execution.
    #[must_use]
    pub fn prepare_execute(&self) -> WorkflowGraph {
        self.state.graph.clone()
    }

    /// Validates, then saves through the persistence collaborator.
    ///
    /// The local graph is kept whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns validation errors before any call is made, or the
    /// collaborator's failure.
    pub async fn save(&self, name: &str) -> Result<SaveReceipt, EditorError> {
        let workflow = self.prepare_save(name)?;
        debug!(name, "submitting save");
        self.submitter.save(workflow).await
    }

    /// Sends the current graph to the execution collaborator.
    ///
    /// # Errors
    ///
    /// Returns the collaborator's failure, or
    /// [`EditorError::AlreadyInFlight`] if an execute is outstanding.
    pub async fn execute(&self) -> Result<RunReceipt, EditorError> {
        self.submitter.execute(self.prepare_execute()).await
    }
}

fn rejection_error(rejection: Rejection) -> EditorError {
    match rejection {
        Rejection::TemplateNotFound { template_id } => EditorError::TemplateNotFound { template_id },
        Rejection::InvalidDocument(err) => EditorError::InvalidDocument {
            details: err.to_string(),
        },
        rejection @ (Rejection::UnknownNode { .. }
        | Rejection::DuplicateNode { .. }
        | Rejection::UnknownConnection { .. }
        | Rejection::UnknownPort { .. }
        | Rejection::SelfLoop { .. }
        | Rejection::Duplicate { .. }
        | Rejection::NotConnecting
        | Rejection::GestureInProgress { .. }) => EditorError::Rejected(rejection),
    }
}
