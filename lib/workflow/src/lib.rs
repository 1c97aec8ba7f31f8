//! Workflow graph data model for the flowcanvas editor.
//!
//! This crate provides the document the editor produces and consumes:
//!
//! - **Nodes**: typed workflow steps with a position, configuration and named ports
//! - **Node kinds**: the closed set of trigger, action and condition types
//! - **Connections**: directed edges from an output port to an input port
//! - **Graph**: the node and connection lists with their structural invariants
//! - **Workflow**: the named graph handed to persistence and execution

pub mod connection;
pub mod definition;
pub mod error;
pub mod graph;
pub mod node;
pub mod port;

pub use connection::Connection;
pub use definition::Workflow;
pub use error::GraphError;
pub use graph::WorkflowGraph;
pub use node::{ConfigMap, Node, NodeCategory, NodeKind, NodePatch, UnknownNodeKind};
pub use port::{PortDirection, PortRef};
