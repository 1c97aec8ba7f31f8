//! Port references.
//!
//! Ports are named attachment points on a node. A node stores its port
//! names as ordered lists; a [`PortRef`] names one port on one node.

use flowcanvas_core::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a node a port sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortDirection {
    /// Left edge; connections arrive here.
    Input,
    /// Right edge; connections leave from here.
    Output,
}

/// A reference to a single named port on a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortRef {
    pub node_id: NodeId,
    pub port: String,
}

impl PortRef {
    #[must_use]
    pub fn new(node_id: NodeId, port: impl Into<String>) -> Self {
        Self {
            node_id,
            port: port.into(),
        }
    }
}

impl fmt::Display for PortRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.node_id, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_node_and_port() {
        let node_id = NodeId::new();
        let port = PortRef::new(node_id, "output");
        assert_eq!(port.to_string(), format!("{node_id}:output"));
    }
}
