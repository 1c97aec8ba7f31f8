//! Connection types for workflow graphs.
//!
//! A connection carries data from a source node's output port to a target
//! node's input port. Connections are created through the editor's
//! two-phase connect gesture and deleted individually or by cascade.

use crate::port::PortRef;
use flowcanvas_core::{ConnectionId, NodeId};
use serde::{Deserialize, Serialize};

/// A directed edge between two ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Unique identifier for this connection.
    pub id: ConnectionId,
    /// The source node.
    pub from_node_id: NodeId,
    /// The output port on the source node.
    pub from_output: String,
    /// The target node.
    pub to_node_id: NodeId,
    /// The input port on the target node.
    pub to_input: String,
}

impl Connection {
    /// Creates a new connection with a fresh ID.
    ///
    /// This does not validate anything; use
    /// [`WorkflowGraph::connect`](crate::WorkflowGraph::connect) to add a
    /// checked connection to a graph.
    #[must_use]
    pub fn new(from: PortRef, to: PortRef) -> Self {
        Self {
            id: ConnectionId::new(),
            from_node_id: from.node_id,
            from_output: from.port,
            to_node_id: to.node_id,
            to_input: to.port,
        }
    }

    /// Returns the source port reference.
    #[must_use]
    pub fn source(&self) -> PortRef {
        PortRef::new(self.from_node_id, self.from_output.clone())
    }

    /// Returns the target port reference.
    #[must_use]
    pub fn target(&self) -> PortRef {
        PortRef::new(self.to_node_id, self.to_input.clone())
    }

    /// Returns true if either end of this connection is the given node.
    #[must_use]
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.from_node_id == node_id || self.to_node_id == node_id
    }

    /// Returns true if this connection joins the same two ports as `other`.
    #[must_use]
    pub fn same_endpoints(&self, other: &Self) -> bool {
        self.from_node_id == other.from_node_id
            && self.from_output == other.from_output
            && self.to_node_id == other.to_node_id
            && self.to_input == other.to_input
    }

    /// Returns the label drawn at the connection's midpoint.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} → {}", self.from_output, self.to_input)
    }
}
