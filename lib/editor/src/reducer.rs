//! The editor reducer: `(state, event) -> state`.
//!
//! Every transition is synchronous and total. Attempts that cannot apply
//! (releasing a connection over nothing, updating a node another event
//! already deleted) leave the state as it was, apart from ending the
//! gesture, and report a [`Rejection`] instead of failing.

use crate::event::{EditorEvent, PointerTarget};
use crate::state::{EditorState, InteractionMode, PickerState};
use flowcanvas_catalog::{CatalogError, NodeTypeCatalog};
use flowcanvas_core::{ConnectionId, NodeId, Point};
use flowcanvas_workflow::{GraphError, NodePatch, PortDirection, PortRef, Workflow};
use std::fmt;
use tracing::debug;

/// Why an event was absorbed without effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    TemplateNotFound { template_id: String },
    UnknownNode { node_id: NodeId },
    /// A node with this id is already on the canvas.
    DuplicateNode { node_id: NodeId },
    UnknownConnection { connection_id: ConnectionId },
    UnknownPort {
        node_id: NodeId,
        port: String,
        direction: PortDirection,
    },
    /// The connection would start and end on the same node.
    SelfLoop { node_id: NodeId },
    /// An identical connection already exists.
    Duplicate { existing: ConnectionId },
    /// A connection was completed while none was being drawn.
    NotConnecting,
    /// Another gesture is already in progress.
    GestureInProgress { mode: &'static str },
    /// A loaded document failed the integrity check.
    InvalidDocument(GraphError),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TemplateNotFound { template_id } => {
                write!(f, "node template '{template_id}' not found")
            }
            Self::UnknownNode { node_id } => write!(f, "node not found: {node_id}"),
            Self::DuplicateNode { node_id } => write!(f, "node already exists: {node_id}"),
            Self::UnknownConnection { connection_id } => {
                write!(f, "connection not found: {connection_id}")
            }
            Self::UnknownPort {
                node_id,
                port,
                direction,
            } => {
                let side = match direction {
                    PortDirection::Input => "input",
                    PortDirection::Output => "output",
                };
                write!(f, "node {node_id} has no {side} port '{port}'")
            }
            Self::SelfLoop { node_id } => {
                write!(f, "node {node_id} cannot be connected to itself")
            }
            Self::Duplicate { existing } => write!(f, "connection already exists: {existing}"),
            Self::NotConnecting => write!(f, "no connection is being drawn"),
            Self::GestureInProgress { mode } => write!(f, "editor is busy {mode}"),
            Self::InvalidDocument(err) => write!(f, "invalid workflow document: {err}"),
        }
    }
}

impl From<GraphError> for Rejection {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::NodeNotFound { node_id } => Self::UnknownNode { node_id },
            GraphError::DuplicateNodeId { node_id } => Self::DuplicateNode { node_id },
            GraphError::SourcePortNotFound { node_id, port_name } => Self::UnknownPort {
                node_id,
                port: port_name,
                direction: PortDirection::Output,
            },
            GraphError::TargetPortNotFound { node_id, port_name } => Self::UnknownPort {
                node_id,
                port: port_name,
                direction: PortDirection::Input,
            },
            GraphError::SelfLoop { node_id } => Self::SelfLoop { node_id },
            GraphError::DuplicateConnection { existing } => Self::Duplicate { existing },
            other => Self::InvalidDocument(other),
        }
    }
}

impl From<CatalogError> for Rejection {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::TemplateNotFound { template_id } => {
                Self::TemplateNotFound { template_id }
            }
        }
    }
}

/// What a reducer step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The state changed.
    Applied,
    /// A node was created.
    NodeCreated(NodeId),
    /// A connection was created and the editor returned to idle.
    ConnectionCreated(ConnectionId),
    /// The event has no meaning in the current state.
    Ignored,
    /// The event was absorbed. Any gesture it ended is over; nothing else
    /// changed.
    Rejected(Rejection),
}

impl Outcome {
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

/// The next state and what produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: EditorState,
    pub outcome: Outcome,
}

impl Transition {
    fn new(state: EditorState, outcome: Outcome) -> Self {
        Self { state, outcome }
    }

    fn applied(state: EditorState) -> Self {
        Self::new(state, Outcome::Applied)
    }

    fn ignored(state: EditorState) -> Self {
        Self::new(state, Outcome::Ignored)
    }

    fn rejected(state: EditorState, rejection: impl Into<Rejection>) -> Self {
        Self::new(state, Outcome::Rejected(rejection.into()))
    }
}

/// Folds one event into the state.
#[must_use]
pub fn reduce(state: EditorState, event: EditorEvent, catalog: &NodeTypeCatalog) -> Transition {
    let event_name = event.name();
    let transition = match event {
        EditorEvent::CreateNode {
            template_id,
            screen,
        } => create_node(state, &template_id, screen, catalog),
        EditorEvent::DeleteNode { node_id } => delete_node(state, node_id),
        EditorEvent::UpdateNode { node_id, patch } => update_node(state, node_id, patch),
        EditorEvent::StartConnection { node_id, output } => {
            start_connection(state, PortRef::new(node_id, output))
        }
        EditorEvent::CompleteConnection { node_id, input } => {
            complete_connection(state, PortRef::new(node_id, input))
        }
        EditorEvent::DeleteConnection { connection_id } => delete_connection(state, connection_id),
        EditorEvent::PointerDown { target, screen } => pointer_down(state, target, screen),
        EditorEvent::PointerMove { screen } => pointer_move(state, screen),
        EditorEvent::PointerUp | EditorEvent::PointerLeave => end_drag(state),
        EditorEvent::CanvasClick => canvas_click(state),
        EditorEvent::DoubleClick { screen } => double_click(state, screen),
        EditorEvent::ClosePicker => close_picker(state),
        EditorEvent::Clear => clear(state),
        EditorEvent::Load { workflow } => load(state, workflow),
    };

    match &transition.outcome {
        Outcome::Rejected(rejection) => {
            debug!(event = event_name, %rejection, "event rejected");
        }
        Outcome::Ignored => {}
        outcome => {
            debug!(
                event = event_name,
                ?outcome,
                mode = transition.state.mode.name(),
                "event applied"
            );
        }
    }
    transition
}

fn create_node(
    mut state: EditorState,
    template_id: &str,
    screen: Point,
    catalog: &NodeTypeCatalog,
) -> Transition {
    match insert_node(&mut state, template_id, screen, catalog) {
        Ok(node_id) => Transition::new(state, Outcome::NodeCreated(node_id)),
        Err(rejection) => Transition::rejected(state, rejection),
    }
}

/// Instantiates a template at a screen position and adds it to the graph,
/// closing the picker. The state is untouched on rejection.
pub(crate) fn insert_node(
    state: &mut EditorState,
    template_id: &str,
    screen: Point,
    catalog: &NodeTypeCatalog,
) -> Result<NodeId, Rejection> {
    let node = catalog.instantiate(template_id, state.to_canvas(screen))?;
    let node_id = state.graph.add_node(node)?;
    state.picker = None;
    Ok(node_id)
}

fn delete_node(mut state: EditorState, node_id: NodeId) -> Transition {
    if state.graph.remove_node(node_id).is_none() {
        return Transition::rejected(state, Rejection::UnknownNode { node_id });
    }
    if state.selected_node_id == Some(node_id) {
        state.selected_node_id = None;
    }
    let gesture_on_node = match &state.mode {
        InteractionMode::Connecting { source } => source.node_id == node_id,
        InteractionMode::DraggingNode { node_id: dragged, .. } => *dragged == node_id,
        _ => false,
    };
    if gesture_on_node {
        state.mode = InteractionMode::Idle;
    }
    Transition::applied(state)
}

fn update_node(mut state: EditorState, node_id: NodeId, patch: NodePatch) -> Transition {
    if state.graph.update_node(node_id, patch).is_none() {
        return Transition::rejected(state, Rejection::UnknownNode { node_id });
    }
    // A port edit may have removed the port a connection is being drawn from.
    let source_gone = state.pending_connection_source().is_some_and(|source| {
        source.node_id == node_id
            && state
                .graph
                .node(node_id)
                .is_none_or(|n| !n.has_output(&source.port))
    });
    if source_gone {
        state.mode = InteractionMode::Idle;
    }
    Transition::applied(state)
}

fn start_connection(state: EditorState, source: PortRef) -> Transition {
    if !state.mode.is_idle() {
        let mode = state.mode.name();
        return Transition::rejected(state, Rejection::GestureInProgress { mode });
    }
    let Some(node) = state.graph.node(source.node_id) else {
        let node_id = source.node_id;
        return Transition::rejected(state, Rejection::UnknownNode { node_id });
    };
    if !node.has_output(&source.port) {
        return Transition::rejected(
            state,
            Rejection::UnknownPort {
                node_id: source.node_id,
                port: source.port,
                direction: PortDirection::Output,
            },
        );
    }
    let mut state = state;
    state.mode = InteractionMode::Connecting { source };
    Transition::applied(state)
}

fn complete_connection(mut state: EditorState, target: PortRef) -> Transition {
    let source = match std::mem::take(&mut state.mode) {
        InteractionMode::Connecting { source } => source,
        other => {
            state.mode = other;
            return Transition::rejected(state, Rejection::NotConnecting);
        }
    };
    // The gesture is over whatever happens next; `mode` is already idle.
    match state.graph.connect(source, target) {
        Ok(connection_id) => Transition::new(state, Outcome::ConnectionCreated(connection_id)),
        Err(err) => Transition::rejected(state, err),
    }
}

fn delete_connection(mut state: EditorState, connection_id: ConnectionId) -> Transition {
    match state.graph.remove_connection(connection_id) {
        Some(_) => Transition::applied(state),
        None => Transition::rejected(state, Rejection::UnknownConnection { connection_id }),
    }
}

fn pointer_down(mut state: EditorState, target: PointerTarget, screen: Point) -> Transition {
    if !state.mode.is_idle() {
        let mode = state.mode.name();
        return Transition::rejected(state, Rejection::GestureInProgress { mode });
    }
    match target {
        PointerTarget::Canvas => {
            state.mode = InteractionMode::Panning { anchor: screen };
        }
        PointerTarget::Node(node_id) => {
            if !state.graph.contains_node(node_id) {
                return Transition::rejected(state, Rejection::UnknownNode { node_id });
            }
            state.selected_node_id = Some(node_id);
            state.mode = InteractionMode::DraggingNode {
                node_id,
                anchor: screen,
            };
        }
    }
    Transition::applied(state)
}

fn pointer_move(mut state: EditorState, screen: Point) -> Transition {
    match state.mode {
        InteractionMode::Panning { anchor } => {
            state.viewport_offset = state.viewport_offset + (screen - anchor);
            state.mode = InteractionMode::Panning { anchor: screen };
            Transition::applied(state)
        }
        InteractionMode::DraggingNode { node_id, anchor } => {
            let Some(node) = state.graph.node_mut(node_id) else {
                state.mode = InteractionMode::Idle;
                return Transition::rejected(state, Rejection::UnknownNode { node_id });
            };
            node.position = node.position + (screen - anchor);
            state.mode = InteractionMode::DraggingNode {
                node_id,
                anchor: screen,
            };
            Transition::applied(state)
        }
        InteractionMode::Idle | InteractionMode::Connecting { .. } => Transition::ignored(state),
    }
}

fn end_drag(mut state: EditorState) -> Transition {
    match state.mode {
        InteractionMode::Panning { .. } | InteractionMode::DraggingNode { .. } => {
            state.mode = InteractionMode::Idle;
            Transition::applied(state)
        }
        InteractionMode::Idle | InteractionMode::Connecting { .. } => Transition::ignored(state),
    }
}

fn canvas_click(mut state: EditorState) -> Transition {
    match state.mode {
        InteractionMode::Idle | InteractionMode::Connecting { .. } => {
            if state.selected_node_id.is_none() && state.mode.is_idle() {
                return Transition::ignored(state);
            }
            state.selected_node_id = None;
            state.mode = InteractionMode::Idle;
            Transition::applied(state)
        }
        InteractionMode::Panning { .. } | InteractionMode::DraggingNode { .. } => {
            Transition::ignored(state)
        }
    }
}

fn double_click(mut state: EditorState, screen: Point) -> Transition {
    if !state.mode.is_idle() {
        let mode = state.mode.name();
        return Transition::rejected(state, Rejection::GestureInProgress { mode });
    }
    state.picker = Some(PickerState { screen });
    Transition::applied(state)
}

fn close_picker(mut state: EditorState) -> Transition {
    if state.picker.take().is_none() {
        return Transition::ignored(state);
    }
    Transition::applied(state)
}

fn clear(mut state: EditorState) -> Transition {
    state.graph.clear();
    state.selected_node_id = None;
    state.mode = InteractionMode::Idle;
    state.picker = None;
    Transition::applied(state)
}

fn load(state: EditorState, workflow: Workflow) -> Transition {
    if let Err(err) = workflow.graph.check_integrity() {
        return Transition::rejected(state, Rejection::InvalidDocument(err));
    }
    let viewport_offset = state.viewport_offset;
    Transition::applied(EditorState {
        viewport_offset,
        ..EditorState::with_graph(workflow.graph)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowcanvas_workflow::{Connection, WorkflowGraph};
    use serde_json::json;

    struct Harness {
        state: EditorState,
        catalog: NodeTypeCatalog,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                state: EditorState::new(),
                catalog: NodeTypeCatalog::builtin(),
            }
        }

        fn send(&mut self, event: EditorEvent) -> Outcome {
            let state = std::mem::take(&mut self.state);
            let transition = reduce(state, event, &self.catalog);
            self.state = transition.state;
            transition.outcome
        }

        fn create(&mut self, template_id: &str, x: f64, y: f64) -> NodeId {
            match self.send(EditorEvent::CreateNode {
                template_id: template_id.to_string(),
                screen: Point::new(x, y),
            }) {
                Outcome::NodeCreated(node_id) => node_id,
                other => panic!("expected node creation, got {other:?}"),
            }
        }

        fn start(&mut self, node_id: NodeId, output: &str) -> Outcome {
            self.send(EditorEvent::StartConnection {
                node_id,
                output: output.to_string(),
            })
        }

        fn complete(&mut self, node_id: NodeId, input: &str) -> Outcome {
            self.send(EditorEvent::CompleteConnection {
                node_id,
                input: input.to_string(),
            })
        }

        fn connect(&mut self, from: NodeId, output: &str, to: NodeId, input: &str) -> ConnectionId {
            self.start(from, output);
            match self.complete(to, input) {
                Outcome::ConnectionCreated(id) => id,
                other => panic!("expected connection, got {other:?}"),
            }
        }

        fn assert_no_dangling(&self) {
            for conn in self.state.connections() {
                assert!(self.state.graph.contains_node(conn.from_node_id));
                assert!(self.state.graph.contains_node(conn.to_node_id));
            }
        }
    }

    #[test]
    fn delay_to_email_scenario() {
        let mut h = Harness::new();
        let delay = h.create("delay", 100.0, 100.0);
        let email = h.create("email", 400.0, 100.0);

        assert_eq!(h.start(delay, "output"), Outcome::Applied);
        assert!(matches!(h.state.mode, InteractionMode::Connecting { .. }));
        assert!(matches!(
            h.complete(email, "input"),
            Outcome::ConnectionCreated(_)
        ));

        assert_eq!(h.state.connections().len(), 1);
        let conn = &h.state.connections()[0];
        assert_eq!(conn.from_node_id, delay);
        assert_eq!(conn.from_output, "output");
        assert_eq!(conn.to_node_id, email);
        assert_eq!(conn.to_input, "input");
        assert!(h.state.mode.is_idle());
    }

    #[test]
    fn create_node_subtracts_viewport_offset() {
        let mut h = Harness::new();
        h.state.viewport_offset = Point::new(50.0, 20.0);
        let id = h.create("delay", 100.0, 100.0);

        let node = h.state.graph.node(id).expect("created");
        assert_eq!(node.position, Point::new(50.0, 80.0));
        assert_eq!(node.config.get("duration"), Some(&json!(1000)));
    }

    #[test]
    fn create_node_closes_picker() {
        let mut h = Harness::new();
        h.send(EditorEvent::DoubleClick {
            screen: Point::new(10.0, 10.0),
        });
        assert_eq!(
            h.state.picker,
            Some(PickerState {
                screen: Point::new(10.0, 10.0)
            })
        );

        h.create("webhook_trigger", 10.0, 10.0);
        assert!(h.state.picker.is_none());
    }

    #[test]
    fn unknown_template_is_rejected_without_change() {
        let mut h = Harness::new();
        let before = h.state.clone();
        let outcome = h.send(EditorEvent::CreateNode {
            template_id: "teleport".to_string(),
            screen: Point::ZERO,
        });
        assert_eq!(
            outcome,
            Outcome::Rejected(Rejection::TemplateNotFound {
                template_id: "teleport".to_string()
            })
        );
        assert_eq!(h.state, before);
    }

    #[test]
    fn delete_node_cascades_connections() {
        let mut h = Harness::new();
        let a = h.create("manual_trigger", 0.0, 0.0);
        let b = h.create("email", 300.0, 0.0);
        h.connect(a, "output", b, "input");

        assert_eq!(h.send(EditorEvent::DeleteNode { node_id: a }), Outcome::Applied);
        assert_eq!(h.state.nodes().len(), 1);
        assert_eq!(h.state.nodes()[0].id, b);
        assert!(h.state.connections().is_empty());
    }

    #[test]
    fn delete_node_removes_connections_in_both_directions() {
        let mut h = Harness::new();
        let a = h.create("manual_trigger", 0.0, 0.0);
        let b = h.create("delay", 200.0, 0.0);
        let c = h.create("email", 400.0, 0.0);
        let d = h.create("notification", 400.0, 200.0);
        h.connect(a, "output", b, "input");
        h.connect(b, "output", c, "input");
        let kept = h.connect(c, "output", d, "input");

        h.send(EditorEvent::DeleteNode { node_id: b });
        let ids: Vec<_> = h.state.connections().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![kept]);
        assert!(h.state.connections().iter().all(|c| !c.involves_node(b)));
        h.assert_no_dangling();
    }

    #[test]
    fn delete_node_clears_selection_and_gestures_on_it() {
        let mut h = Harness::new();
        let a = h.create("delay", 0.0, 0.0);
        h.send(EditorEvent::PointerDown {
            target: PointerTarget::Node(a),
            screen: Point::new(10.0, 10.0),
        });
        assert_eq!(h.state.selected_node_id, Some(a));

        h.send(EditorEvent::DeleteNode { node_id: a });
        assert_eq!(h.state.selected_node_id, None);
        assert!(h.state.mode.is_idle());
    }

    #[test]
    fn deleting_missing_node_is_absorbed() {
        let mut h = Harness::new();
        let ghost = NodeId::new();
        let outcome = h.send(EditorEvent::DeleteNode { node_id: ghost });
        assert_eq!(
            outcome,
            Outcome::Rejected(Rejection::UnknownNode { node_id: ghost })
        );
    }

    #[test]
    fn self_loop_is_rejected_and_returns_to_idle() {
        let mut h = Harness::new();
        let a = h.create("delay", 0.0, 0.0);
        h.start(a, "output");
        let outcome = h.complete(a, "input");

        assert_eq!(outcome, Outcome::Rejected(Rejection::SelfLoop { node_id: a }));
        assert!(h.state.connections().is_empty());
        assert!(h.state.mode.is_idle());
    }

    #[test]
    fn bad_target_port_returns_to_idle() {
        let mut h = Harness::new();
        let a = h.create("delay", 0.0, 0.0);
        let b = h.create("email", 300.0, 0.0);
        h.start(a, "output");
        let outcome = h.complete(b, "nope");

        assert!(matches!(
            outcome,
            Outcome::Rejected(Rejection::UnknownPort {
                direction: PortDirection::Input,
                ..
            })
        ));
        assert!(h.state.connections().is_empty());
        assert!(h.state.mode.is_idle());
    }

    #[test]
    fn unknown_target_node_returns_to_idle() {
        let mut h = Harness::new();
        let a = h.create("delay", 0.0, 0.0);
        h.start(a, "output");
        let ghost = NodeId::new();
        assert_eq!(
            h.complete(ghost, "input"),
            Outcome::Rejected(Rejection::UnknownNode { node_id: ghost })
        );
        assert!(h.state.mode.is_idle());
    }

    #[test]
    fn duplicate_connection_is_rejected() {
        let mut h = Harness::new();
        let a = h.create("delay", 0.0, 0.0);
        let b = h.create("email", 300.0, 0.0);
        let first = h.connect(a, "output", b, "input");

        h.start(a, "output");
        assert_eq!(
            h.complete(b, "input"),
            Outcome::Rejected(Rejection::Duplicate { existing: first })
        );
        assert_eq!(h.state.connections().len(), 1);
    }

    #[test]
    fn start_connection_requires_existing_output() {
        let mut h = Harness::new();
        let a = h.create("email", 0.0, 0.0);
        assert!(h.start(a, "input").is_rejected());
        assert!(h.start(NodeId::new(), "output").is_rejected());
        assert!(h.state.mode.is_idle());
    }

    #[test]
    fn complete_without_start_is_rejected() {
        let mut h = Harness::new();
        let a = h.create("email", 0.0, 0.0);
        assert_eq!(
            h.complete(a, "input"),
            Outcome::Rejected(Rejection::NotConnecting)
        );
    }

    #[test]
    fn connection_gestures_are_ignored_while_panning() {
        let mut h = Harness::new();
        let a = h.create("delay", 0.0, 0.0);
        h.send(EditorEvent::PointerDown {
            target: PointerTarget::Canvas,
            screen: Point::ZERO,
        });
        assert_eq!(
            h.start(a, "output"),
            Outcome::Rejected(Rejection::GestureInProgress { mode: "panning" })
        );
        assert!(matches!(h.state.mode, InteractionMode::Panning { .. }));
    }

    #[test]
    fn pan_accumulates_pointer_delta() {
        let mut h = Harness::new();
        h.send(EditorEvent::PointerDown {
            target: PointerTarget::Canvas,
            screen: Point::new(100.0, 100.0),
        });
        h.send(EditorEvent::PointerMove {
            screen: Point::new(110.0, 95.0),
        });
        h.send(EditorEvent::PointerMove {
            screen: Point::new(130.0, 90.0),
        });
        assert_eq!(h.state.viewport_offset, Point::new(30.0, -10.0));

        assert_eq!(h.send(EditorEvent::PointerLeave), Outcome::Applied);
        assert!(h.state.mode.is_idle());

        // Moves after the gesture ended do nothing.
        h.send(EditorEvent::PointerMove {
            screen: Point::new(500.0, 500.0),
        });
        assert_eq!(h.state.viewport_offset, Point::new(30.0, -10.0));
    }

    #[test]
    fn panning_does_not_move_nodes() {
        let mut h = Harness::new();
        let a = h.create("delay", 100.0, 100.0);
        h.send(EditorEvent::PointerDown {
            target: PointerTarget::Canvas,
            screen: Point::ZERO,
        });
        h.send(EditorEvent::PointerMove {
            screen: Point::new(40.0, 40.0),
        });
        h.send(EditorEvent::PointerUp);

        let node = h.state.graph.node(a).expect("node");
        assert_eq!(node.position, Point::new(100.0, 100.0));
        assert_eq!(h.state.to_screen(node.position), Point::new(140.0, 140.0));
    }

    #[test]
    fn dragging_moves_node_by_pointer_delta() {
        let mut h = Harness::new();
        let a = h.create("delay", 100.0, 100.0);
        h.send(EditorEvent::PointerDown {
            target: PointerTarget::Node(a),
            screen: Point::new(120.0, 120.0),
        });
        assert!(matches!(
            h.state.mode,
            InteractionMode::DraggingNode { node_id, .. } if node_id == a
        ));
        h.send(EditorEvent::PointerMove {
            screen: Point::new(170.0, 140.0),
        });
        h.send(EditorEvent::PointerUp);

        let node = h.state.graph.node(a).expect("node");
        assert_eq!(node.position, Point::new(150.0, 120.0));
        assert!(h.state.mode.is_idle());
        assert_eq!(h.state.selected_node_id, Some(a));
    }

    #[test]
    fn canvas_click_clears_selection_and_aborts_connecting() {
        let mut h = Harness::new();
        let a = h.create("delay", 0.0, 0.0);
        h.send(EditorEvent::PointerDown {
            target: PointerTarget::Node(a),
            screen: Point::ZERO,
        });
        h.send(EditorEvent::PointerUp);
        h.start(a, "output");

        assert_eq!(h.send(EditorEvent::CanvasClick), Outcome::Applied);
        assert_eq!(h.state.selected_node_id, None);
        assert!(h.state.mode.is_idle());
        assert!(h.state.connections().is_empty());
    }

    #[test]
    fn double_click_only_opens_picker_when_idle() {
        let mut h = Harness::new();
        h.send(EditorEvent::PointerDown {
            target: PointerTarget::Canvas,
            screen: Point::ZERO,
        });
        assert!(
            h.send(EditorEvent::DoubleClick { screen: Point::ZERO })
                .is_rejected()
        );
        assert!(h.state.picker.is_none());

        h.send(EditorEvent::PointerUp);
        h.send(EditorEvent::DoubleClick { screen: Point::ZERO });
        assert!(h.state.picker.is_some());
        assert!(h.state.mode.is_idle());

        assert_eq!(h.send(EditorEvent::ClosePicker), Outcome::Applied);
        assert_eq!(h.send(EditorEvent::ClosePicker), Outcome::Ignored);
    }

    #[test]
    fn update_node_merges_patch() {
        let mut h = Harness::new();
        let a = h.create("delay", 0.0, 0.0);
        let patch = NodePatch::new()
            .with_display_name("Wait a bit")
            .with_position(Point::new(5.0, 6.0))
            .with_config_entry("duration", json!(5000));

        assert_eq!(
            h.send(EditorEvent::UpdateNode { node_id: a, patch }),
            Outcome::Applied
        );
        let node = h.state.graph.node(a).expect("node");
        assert_eq!(node.display_name, "Wait a bit");
        assert_eq!(node.position, Point::new(5.0, 6.0));
        assert_eq!(node.config.get("duration"), Some(&json!(5000)));
        assert_eq!(node.config.get("unit"), Some(&json!("ms")));
        assert_eq!(node.inputs, vec!["input"]);
    }

    #[test]
    fn update_missing_node_is_absorbed() {
        let mut h = Harness::new();
        h.create("delay", 0.0, 0.0);
        let before = h.state.clone();
        let ghost = NodeId::new();

        let outcome = h.send(EditorEvent::UpdateNode {
            node_id: ghost,
            patch: NodePatch::new().with_display_name("late"),
        });
        assert_eq!(
            outcome,
            Outcome::Rejected(Rejection::UnknownNode { node_id: ghost })
        );
        assert_eq!(h.state, before);
    }

    #[test]
    fn port_edit_prunes_connections_and_pending_source() {
        let mut h = Harness::new();
        let cond = h.create("condition", 0.0, 0.0);
        let yes = h.create("email", 300.0, 0.0);
        let no = h.create("notification", 300.0, 200.0);
        h.connect(cond, "true", yes, "input");
        let kept = h.connect(cond, "false", no, "input");

        h.start(cond, "true");
        h.send(EditorEvent::UpdateNode {
            node_id: cond,
            patch: NodePatch::new().with_outputs(["false"]),
        });

        let ids: Vec<_> = h.state.connections().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![kept]);
        assert!(h.state.mode.is_idle());
    }

    #[test]
    fn delete_connection_has_no_cascade() {
        let mut h = Harness::new();
        let a = h.create("delay", 0.0, 0.0);
        let b = h.create("email", 300.0, 0.0);
        let conn = h.connect(a, "output", b, "input");

        assert_eq!(
            h.send(EditorEvent::DeleteConnection { connection_id: conn }),
            Outcome::Applied
        );
        assert!(h.state.connections().is_empty());
        assert_eq!(h.state.nodes().len(), 2);

        assert_eq!(
            h.send(EditorEvent::DeleteConnection { connection_id: conn }),
            Outcome::Rejected(Rejection::UnknownConnection {
                connection_id: conn
            })
        );
    }

    #[test]
    fn clear_resets_graph_and_selection() {
        let mut h = Harness::new();
        let a = h.create("delay", 0.0, 0.0);
        let b = h.create("email", 300.0, 0.0);
        h.connect(a, "output", b, "input");
        h.state.selected_node_id = Some(a);
        h.state.viewport_offset = Point::new(7.0, 7.0);

        h.send(EditorEvent::Clear);
        assert!(h.state.nodes().is_empty());
        assert!(h.state.connections().is_empty());
        assert_eq!(h.state.selected_node_id, None);
        assert_eq!(h.state.viewport_offset, Point::new(7.0, 7.0));
    }

    #[test]
    fn load_replaces_graph_and_keeps_viewport() {
        let mut h = Harness::new();
        h.create("delay", 0.0, 0.0);
        h.state.viewport_offset = Point::new(3.0, 4.0);

        let mut other = Harness::new();
        let x = other.create("manual_trigger", 0.0, 0.0);
        let y = other.create("email", 300.0, 0.0);
        other.connect(x, "output", y, "input");
        let workflow = other.state.to_workflow("Reloaded");

        assert_eq!(h.send(EditorEvent::Load { workflow }), Outcome::Applied);
        assert_eq!(h.state.graph, other.state.graph);
        assert_eq!(h.state.viewport_offset, Point::new(3.0, 4.0));
        assert!(h.state.mode.is_idle());
    }

    #[test]
    fn load_rejects_dangling_document() {
        let mut h = Harness::new();
        let a = h.create("delay", 0.0, 0.0);
        let before = h.state.clone();

        let mut graph = WorkflowGraph::new();
        graph.nodes.push(h.state.nodes()[0].clone());
        graph.connections.push(Connection::new(
            PortRef::new(a, "output"),
            PortRef::new(NodeId::new(), "input"),
        ));
        let outcome = h.send(EditorEvent::Load {
            workflow: Workflow::with_graph("broken", graph),
        });

        assert!(matches!(
            outcome,
            Outcome::Rejected(Rejection::InvalidDocument(GraphError::DanglingConnection { .. }))
        ));
        assert_eq!(h.state, before);
    }

    #[test]
    fn random_sequences_never_leave_dangling_connections() {
        let mut h = Harness::new();
        let kinds = ["manual_trigger", "delay", "email", "condition", "switch"];
        let mut nodes = Vec::new();
        for (i, kind) in kinds.iter().enumerate() {
            nodes.push(h.create(kind, i as f64 * 200.0, 0.0));
        }
        let outputs = ["output", "output", "output", "true", "default"];

        // Deterministic pseudo-random walk over connect and delete operations.
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for _ in 0..200 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            let i = (seed % nodes.len() as u64) as usize;
            let j = ((seed >> 8) % nodes.len() as u64) as usize;
            match (seed >> 16) % 4 {
                0 => {
                    h.send(EditorEvent::DeleteNode { node_id: nodes[i] });
                    let kind = kinds[i];
                    nodes[i] = h.create(kind, 0.0, 0.0);
                }
                1 => {
                    if let Some(conn) = h.state.connections().first() {
                        let connection_id = conn.id;
                        h.send(EditorEvent::DeleteConnection { connection_id });
                    }
                }
                _ => {
                    h.start(nodes[i], outputs[i]);
                    h.complete(nodes[j], "input");
                }
            }
            assert!(h.state.mode.is_idle());
            h.assert_no_dangling();
            assert!(h.state.graph.check_integrity().is_ok());
        }
    }

    #[test]
    fn graph_errors_map_to_matching_rejections() {
        let node_id = NodeId::new();
        assert_eq!(
            Rejection::from(GraphError::DuplicateNodeId { node_id }),
            Rejection::DuplicateNode { node_id }
        );
        assert_eq!(
            Rejection::from(GraphError::NodeNotFound { node_id }),
            Rejection::UnknownNode { node_id }
        );
    }

    #[test]
    fn failed_insert_keeps_picker_open() {
        let mut h = Harness::new();
        h.send(EditorEvent::DoubleClick {
            screen: Point::new(10.0, 10.0),
        });
        let before = h.state.clone();

        let result = insert_node(&mut h.state, "teleport", Point::ZERO, &h.catalog);
        assert_eq!(
            result,
            Err(Rejection::TemplateNotFound {
                template_id: "teleport".to_string()
            })
        );
        assert_eq!(h.state, before);
    }
}
