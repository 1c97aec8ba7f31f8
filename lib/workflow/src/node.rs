//! Workflow node types.
//!
//! Nodes are the building blocks of workflows. Each node has:
//! - A unique ID, generated when the node is created
//! - A kind naming the template it was created from
//! - A canvas-local position
//! - Free-form configuration seeded from the template
//! - Ordered input and output port names

use flowcanvas_core::{NodeId, Point};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

/// Node configuration: a JSON object keyed by option name.
pub type ConfigMap = serde_json::Map<String, JsonValue>;

/// The category a node kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    /// Entry points that start a workflow run.
    Trigger,
    /// Steps that do something (send mail, call a URL, wait).
    Action,
    /// Steps that route the flow based on data.
    Condition,
}

impl NodeCategory {
    /// All categories in display order.
    pub const ALL: [Self; 3] = [Self::Trigger, Self::Action, Self::Condition];

    /// Returns the serialized name of this category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trigger => "trigger",
            Self::Action => "action",
            Self::Condition => "condition",
        }
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeCategory {
    type Err = UnknownNodeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownNodeKind { name: s.to_string() })
    }
}

/// The closed set of node types the editor knows about.
///
/// Adding a kind forces every exhaustive `match` over it (category, template
/// defaults) to be updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    ManualTrigger,
    ScheduleTrigger,
    WebhookTrigger,
    Email,
    HttpRequest,
    Delay,
    Notification,
    SetVariable,
    Condition,
    Switch,
}

impl NodeKind {
    /// Every node kind, in catalog order.
    pub const ALL: [Self; 10] = [
        Self::ManualTrigger,
        Self::ScheduleTrigger,
        Self::WebhookTrigger,
        Self::Email,
        Self::HttpRequest,
        Self::Delay,
        Self::Notification,
        Self::SetVariable,
        Self::Condition,
        Self::Switch,
    ];

    /// Returns the template id string for this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ManualTrigger => "manual_trigger",
            Self::ScheduleTrigger => "schedule_trigger",
            Self::WebhookTrigger => "webhook_trigger",
            Self::Email => "email",
            Self::HttpRequest => "http_request",
            Self::Delay => "delay",
            Self::Notification => "notification",
            Self::SetVariable => "set_variable",
            Self::Condition => "condition",
            Self::Switch => "switch",
        }
    }

    /// Returns the category of this kind.
    #[must_use]
    pub const fn category(&self) -> NodeCategory {
        match self {
            Self::ManualTrigger | Self::ScheduleTrigger | Self::WebhookTrigger => {
                NodeCategory::Trigger
            }
            Self::Email
            | Self::HttpRequest
            | Self::Delay
            | Self::Notification
            | Self::SetVariable => NodeCategory::Action,
            Self::Condition | Self::Switch => NodeCategory::Condition,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = UnknownNodeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownNodeKind { name: s.to_string() })
    }
}

/// Returned when a string names no known node kind or category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNodeKind {
    pub name: String,
}

impl fmt::Display for UnknownNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown node kind '{}'", self.name)
    }
}

impl std::error::Error for UnknownNodeKind {}

/// A workflow node placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node within the workflow.
    pub id: NodeId,
    /// The template this node was created from (by value).
    pub type_id: NodeKind,
    /// Human-readable label shown on the node.
    pub display_name: String,
    /// Canvas-local position, independent of the viewport offset.
    pub position: Point,
    /// Node configuration, seeded from the template defaults.
    #[serde(default)]
    pub config: ConfigMap,
    /// Ordered input port names.
    #[serde(default)]
    pub inputs: Vec<String>,
    /// Ordered output port names.
    #[serde(default)]
    pub outputs: Vec<String>,
}

impl Node {
    /// Returns the index of the named input port, if the node has it.
    #[must_use]
    pub fn input_index(&self, port: &str) -> Option<usize> {
        self.inputs.iter().position(|p| p == port)
    }

    /// Returns the index of the named output port, if the node has it.
    #[must_use]
    pub fn output_index(&self, port: &str) -> Option<usize> {
        self.outputs.iter().position(|p| p == port)
    }

    #[must_use]
    pub fn has_input(&self, port: &str) -> bool {
        self.input_index(port).is_some()
    }

    #[must_use]
    pub fn has_output(&self, port: &str) -> bool {
        self.output_index(port).is_some()
    }

    /// Returns the category of this node's kind.
    #[must_use]
    pub fn category(&self) -> NodeCategory {
        self.type_id.category()
    }

    /// Merges a patch into this node.
    ///
    /// Config entries in the patch overwrite existing keys; a `null` value
    /// removes the key. Port lists change only when the patch names them.
    pub fn apply(&mut self, patch: NodePatch) {
        if let Some(display_name) = patch.display_name {
            self.display_name = display_name;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(config) = patch.config {
            for (key, value) in config {
                if value.is_null() {
                    self.config.remove(&key);
                } else {
                    self.config.insert(key, value);
                }
            }
        }
        if let Some(inputs) = patch.inputs {
            self.inputs = inputs;
        }
        if let Some(outputs) = patch.outputs {
            self.outputs = outputs;
        }
    }
}

/// A partial update to a node's mutable fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigMap>,
    /// Explicit replacement of the input port list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<String>>,
    /// Explicit replacement of the output port list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<String>>,
}

impl NodePatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Moves the node.
    #[must_use]
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets (or, with `null`, removes) a single config entry.
    #[must_use]
    pub fn with_config_entry(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.config
            .get_or_insert_with(ConfigMap::new)
            .insert(key.into(), value);
        self
    }

    /// Replaces the input port list.
    #[must_use]
    pub fn with_inputs<I, S>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs = Some(inputs.into_iter().map(Into::into).collect());
        self
    }

    /// Replaces the output port list.
    #[must_use]
    pub fn with_outputs<I, S>(mut self, outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outputs = Some(outputs.into_iter().map(Into::into).collect());
        self
    }

    /// Returns true if the patch edits either port list.
    #[must_use]
    pub fn edits_ports(&self) -> bool {
        self.inputs.is_some() || self.outputs.is_some()
    }
}
