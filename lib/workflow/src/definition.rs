//! The workflow document.
//!
//! A workflow is the serialization unit handed to external collaborators:
//! a name plus the graph of nodes and connections, serialized flat as
//! `{ "name": ..., "nodes": [...], "connections": [...] }`.

use crate::graph::WorkflowGraph;
use serde::{Deserialize, Serialize};

/// A named workflow graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    /// Human-readable name for this workflow.
    #[serde(default)]
    pub name: String,
    /// The nodes and connections.
    #[serde(flatten)]
    pub graph: WorkflowGraph,
}

impl Workflow {
    /// Creates an empty workflow with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graph: WorkflowGraph::new(),
        }
    }

    /// Wraps an existing graph.
    #[must_use]
    pub fn with_graph(name: impl Into<String>, graph: WorkflowGraph) -> Self {
        Self {
            name: name.into(),
            graph,
        }
    }

    /// Returns the workflow name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the name is empty or whitespace only.
    #[must_use]
    pub fn has_blank_name(&self) -> bool {
        self.name.trim().is_empty()
    }

    /// Parses a workflow document from JSON.
    ///
    /// # Errors
    ///
    /// Returns the serde error if the text is not a workflow document.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serializes this workflow as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serde error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
