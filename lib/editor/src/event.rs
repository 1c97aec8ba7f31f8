//! Events the editor reacts to.
//!
//! The host event loop translates raw input into these and dispatches them
//! one at a time. Positions named `screen` are in screen coordinates; the
//! reducer converts them with the current viewport offset.

use flowcanvas_core::{ConnectionId, NodeId, Point};
use flowcanvas_workflow::{NodePatch, Workflow};

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Empty canvas.
    Canvas,
    /// The body of a node (not one of its ports).
    Node(NodeId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    CreateNode { template_id: String, screen: Point },
    DeleteNode { node_id: NodeId },
    UpdateNode { node_id: NodeId, patch: NodePatch },
    /// Pointer pressed on an output port.
    StartConnection { node_id: NodeId, output: String },
    /// Pointer released on an input port.
    CompleteConnection { node_id: NodeId, input: String },
    DeleteConnection { connection_id: ConnectionId },
    PointerDown { target: PointerTarget, screen: Point },
    PointerMove { screen: Point },
    PointerUp,
    PointerLeave,
    /// A click on empty canvas.
    CanvasClick,
    /// A double-click on empty canvas.
    DoubleClick { screen: Point },
    ClosePicker,
    Clear,
    /// Replace the graph with a reloaded document.
    Load { workflow: Workflow },
}

impl EditorEvent {
    /// Short name used in log fields.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateNode { .. } => "create_node",
            Self::DeleteNode { .. } => "delete_node",
            Self::UpdateNode { .. } => "update_node",
            Self::StartConnection { .. } => "start_connection",
            Self::CompleteConnection { .. } => "complete_connection",
            Self::DeleteConnection { .. } => "delete_connection",
            Self::PointerDown { .. } => "pointer_down",
            Self::PointerMove { .. } => "pointer_move",
            Self::PointerUp => "pointer_up",
            Self::PointerLeave => "pointer_leave",
            Self::CanvasClick => "canvas_click",
            Self::DoubleClick { .. } => "double_click",
            Self::ClosePicker => "close_picker",
            Self::Clear => "clear",
            Self::Load { .. } => "load",
        }
    }
}
