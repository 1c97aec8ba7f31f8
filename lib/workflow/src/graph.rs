//! The workflow graph: nodes plus the connections between their ports.
//!
//! Invariants maintained by every mutating method:
//! - every connection endpoint names a node currently in the graph
//! - no connection starts and ends on the same node
//! - every connection's ports exist on its nodes
//! - node and connection IDs are unique
//!
//! Node and connection order is insertion order; the editor draws in that
//! order and the serialized document preserves it.

use crate::connection::Connection;
use crate::error::GraphError;
use crate::node::{Node, NodePatch};
use crate::port::PortRef;
use flowcanvas_core::{ConnectionId, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A workflow graph as ordered node and connection lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowGraph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl WorkflowGraph {
    /// Creates a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Returns a node by its ID.
    #[must_use]
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    /// Returns a mutable node by its ID.
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == node_id)
    }

    #[must_use]
    pub fn contains_node(&self, node_id: NodeId) -> bool {
        self.node(node_id).is_some()
    }

    /// Returns a connection by its ID.
    #[must_use]
    pub fn connection(&self, connection_id: ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == connection_id)
    }

    /// Appends a node.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNodeId`] if a node with the same ID is
    /// already present.
    pub fn add_node(&mut self, node: Node) -> Result<NodeId, GraphError> {
        if self.contains_node(node.id) {
            return Err(GraphError::DuplicateNodeId { node_id: node.id });
        }
        let node_id = node.id;
        self.nodes.push(node);
        Ok(node_id)
    }

    /// Removes a node together with every connection that touches it.
    ///
    /// Returns the removed node and the cascaded connections, or `None` if
    /// the node was not present (in which case nothing changes).
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<(Node, Vec<Connection>)> {
        let index = self.nodes.iter().position(|n| n.id == node_id)?;
        let node = self.nodes.remove(index);
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.connections)
            .into_iter()
            .partition(|c| c.involves_node(node_id));
        self.connections = kept;
        Some((node, removed))
    }

    /// Checks whether a connection from `from` to `to` may be added.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the two ends are the same node
    /// - either node doesn't exist
    /// - the output port doesn't exist on the source node
    /// - the input port doesn't exist on the target node
    /// - an identical connection already exists
    pub fn validate_connection(&self, from: &PortRef, to: &PortRef) -> Result<(), GraphError> {
        if from.node_id == to.node_id {
            return Err(GraphError::SelfLoop {
                node_id: from.node_id,
            });
        }

        let source = self.node(from.node_id).ok_or(GraphError::NodeNotFound {
            node_id: from.node_id,
        })?;
        let target = self.node(to.node_id).ok_or(GraphError::NodeNotFound {
            node_id: to.node_id,
        })?;

        if !source.has_output(&from.port) {
            return Err(GraphError::SourcePortNotFound {
                node_id: from.node_id,
                port_name: from.port.clone(),
            });
        }
        if !target.has_input(&to.port) {
            return Err(GraphError::TargetPortNotFound {
                node_id: to.node_id,
                port_name: to.port.clone(),
            });
        }

        if let Some(existing) = self.connections.iter().find(|c| {
            c.from_node_id == from.node_id
                && c.from_output == from.port
                && c.to_node_id == to.node_id
                && c.to_input == to.port
        }) {
            return Err(GraphError::DuplicateConnection {
                existing: existing.id,
            });
        }

        Ok(())
    }

    /// Adds a validated connection and returns its fresh ID.
    ///
    /// # Errors
    ///
    /// See [`validate_connection`](Self::validate_connection).
    pub fn connect(&mut self, from: PortRef, to: PortRef) -> Result<ConnectionId, GraphError> {
        self.validate_connection(&from, &to)?;
        let connection = Connection::new(from, to);
        let id = connection.id;
        self.connections.push(connection);
        Ok(id)
    }

    /// Removes a connection by ID. No cascade.
    pub fn remove_connection(&mut self, connection_id: ConnectionId) -> Option<Connection> {
        let index = self
            .connections
            .iter()
            .position(|c| c.id == connection_id)?;
        Some(self.connections.remove(index))
    }

    /// Merges a patch into a node.
    ///
    /// If the patch replaces a port list, connections attached to ports that
    /// no longer exist are removed and returned. Returns `None` if the node
    /// was not present.
    pub fn update_node(&mut self, node_id: NodeId, patch: NodePatch) -> Option<Vec<Connection>> {
        let edits_ports = patch.edits_ports();
        self.node_mut(node_id)?.apply(patch);

        if !edits_ports {
            return Some(Vec::new());
        }

        let node = self.node(node_id)?.clone();
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.connections)
            .into_iter()
            .partition(|c| {
                (c.from_node_id == node_id && !node.has_output(&c.from_output))
                    || (c.to_node_id == node_id && !node.has_input(&c.to_input))
            });
        self.connections = kept;
        Some(removed)
    }

    /// Returns connections that leave or enter the given node.
    pub fn connections_of(&self, node_id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections
            .iter()
            .filter(move |c| c.involves_node(node_id))
    }

    /// Returns nodes that have no incoming connections (entry points).
    pub fn entry_nodes(&self) -> Vec<&Node> {
        self.nodes
            .iter()
            .filter(|n| !self.connections.iter().any(|c| c.to_node_id == n.id))
            .collect()
    }

    /// Returns nodes that have no outgoing connections (terminal nodes).
    pub fn terminal_nodes(&self) -> Vec<&Node> {
        self.nodes
            .iter()
            .filter(|n| !self.connections.iter().any(|c| c.from_node_id == n.id))
            .collect()
    }

    /// Removes every node and connection.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.connections.clear();
    }

    /// Checks every structural invariant.
    ///
    /// Used on documents that did not come through the editor's own
    /// operations, such as a reloaded workflow.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn check_integrity(&self) -> Result<(), GraphError> {
        let mut node_ids = HashSet::new();
        for node in &self.nodes {
            if !node_ids.insert(node.id) {
                return Err(GraphError::DuplicateNodeId { node_id: node.id });
            }
        }

        let mut connection_ids = HashSet::new();
        for (index, conn) in self.connections.iter().enumerate() {
            if !connection_ids.insert(conn.id) {
                return Err(GraphError::DuplicateConnectionId {
                    connection_id: conn.id,
                });
            }

            let source = self
                .node(conn.from_node_id)
                .ok_or(GraphError::DanglingConnection {
                    connection_id: conn.id,
                    node_id: conn.from_node_id,
                })?;
            let target = self
                .node(conn.to_node_id)
                .ok_or(GraphError::DanglingConnection {
                    connection_id: conn.id,
                    node_id: conn.to_node_id,
                })?;

            if source.id == target.id {
                return Err(GraphError::SelfLoop { node_id: source.id });
            }
            if !source.has_output(&conn.from_output) {
                return Err(GraphError::SourcePortNotFound {
                    node_id: source.id,
                    port_name: conn.from_output.clone(),
                });
            }
            if !target.has_input(&conn.to_input) {
                return Err(GraphError::TargetPortNotFound {
                    node_id: target.id,
                    port_name: conn.to_input.clone(),
                });
            }

            if let Some(earlier) = self.connections[..index]
                .iter()
                .find(|c| c.same_endpoints(conn))
            {
                return Err(GraphError::DuplicateConnection {
                    existing: earlier.id,
                });
            }
        }

        Ok(())
    }
}
