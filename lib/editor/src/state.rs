//! Editor state snapshots.

use flowcanvas_core::{NodeId, Point};
use flowcanvas_workflow::{Connection, Node, PortRef, Workflow, WorkflowGraph};
use serde::Serialize;

/// The interaction state machine.
///
/// `Idle` is both initial and terminal; every other mode is a gesture in
/// progress and blocks the start of a second one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum InteractionMode {
    #[default]
    Idle,
    /// Dragging the viewport. `anchor` is the last pointer position seen.
    Panning { anchor: Point },
    /// Drawing a connection out of `source`.
    Connecting { source: PortRef },
    /// Moving a node. `anchor` is the last pointer position seen.
    DraggingNode { node_id: NodeId, anchor: Point },
}

impl InteractionMode {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Panning { .. } => "panning",
            Self::Connecting { .. } => "connecting",
            Self::DraggingNode { .. } => "dragging_node",
        }
    }
}

/// An open node picker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PickerState {
    /// Screen position the picker was opened at; new nodes land here.
    pub screen: Point,
}

/// One immutable snapshot of everything the editor tracks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EditorState {
    pub graph: WorkflowGraph,
    pub selected_node_id: Option<NodeId>,
    pub mode: InteractionMode,
    /// Pan offset between canvas-local and screen coordinates.
    pub viewport_offset: Point,
    pub picker: Option<PickerState>,
}

impl EditorState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing graph with a fresh interaction state.
    #[must_use]
    pub fn with_graph(graph: WorkflowGraph) -> Self {
        Self {
            graph,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.graph.nodes
    }

    #[must_use]
    pub fn connections(&self) -> &[Connection] {
        &self.graph.connections
    }

    /// The output port a connection is being drawn from, while connecting.
    #[must_use]
    pub fn pending_connection_source(&self) -> Option<&PortRef> {
        match &self.mode {
            InteractionMode::Connecting { source } => Some(source),
            _ => None,
        }
    }

    #[must_use]
    pub fn selected_node(&self) -> Option<&Node> {
        self.selected_node_id.and_then(|id| self.graph.node(id))
    }

    /// Converts a screen position to canvas-local coordinates.
    #[must_use]
    pub fn to_canvas(&self, screen: Point) -> Point {
        screen - self.viewport_offset
    }

    /// Converts a canvas-local position to screen coordinates.
    #[must_use]
    pub fn to_screen(&self, canvas: Point) -> Point {
        canvas + self.viewport_offset
    }

    /// Snapshot of the graph as a named workflow document.
    #[must_use]
    pub fn to_workflow(&self, name: impl Into<String>) -> Workflow {
        Workflow::with_graph(name, self.graph.clone())
    }
}
