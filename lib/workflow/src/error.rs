//! Error types for the workflow crate.
//!
//! `GraphError` describes structural violations: a connection or node that
//! would break one of the graph invariants. Callers that cross a layer
//! boundary wrap it in a rootcause `Report`.

use flowcanvas_core::{ConnectionId, NodeId};
use std::fmt;

/// Errors from graph operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Node with the given ID was not found in the graph.
    NodeNotFound { node_id: NodeId },
    /// Source port not found on node.
    SourcePortNotFound { node_id: NodeId, port_name: String },
    /// Target port not found on node.
    TargetPortNotFound { node_id: NodeId, port_name: String },
    /// A connection would start and end on the same node.
    SelfLoop { node_id: NodeId },
    /// An identical connection already exists.
    DuplicateConnection { existing: ConnectionId },
    /// Two nodes share an ID.
    DuplicateNodeId { node_id: NodeId },
    /// Two connections share an ID.
    DuplicateConnectionId { connection_id: ConnectionId },
    /// A connection references a node that is not in the graph.
    DanglingConnection {
        connection_id: ConnectionId,
        node_id: NodeId,
    },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeNotFound { node_id } => {
                write!(f, "node not found: {node_id}")
            }
            Self::SourcePortNotFound { node_id, port_name } => {
                write!(f, "source port '{port_name}' not found on node {node_id}")
            }
            Self::TargetPortNotFound { node_id, port_name } => {
                write!(f, "target port '{port_name}' not found on node {node_id}")
            }
            Self::SelfLoop { node_id } => {
                write!(f, "node {node_id} cannot be connected to itself")
            }
            Self::DuplicateConnection { existing } => {
                write!(f, "connection already exists: {existing}")
            }
            Self::DuplicateNodeId { node_id } => {
                write!(f, "duplicate node id: {node_id}")
            }
            Self::DuplicateConnectionId { connection_id } => {
                write!(f, "duplicate connection id: {connection_id}")
            }
            Self::DanglingConnection {
                connection_id,
                node_id,
            } => {
                write!(
                    f,
                    "connection {connection_id} references missing node {node_id}"
                )
            }
        }
    }
}

impl std::error::Error for GraphError {}
