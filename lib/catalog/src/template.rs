//! Node templates.
//!
//! A template describes the default shape of a node kind: its label,
//! description, category, default configuration and default ports.
//! Built-in defaults are produced by an exhaustive match over
//! [`NodeKind`], so a new kind cannot be added without its defaults.

use flowcanvas_workflow::{ConfigMap, NodeCategory, NodeKind};
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTemplate {
    /// The kind this template instantiates; serialized as the template id.
    pub id: NodeKind,
    pub display_name: String,
    pub description: String,
    pub category: NodeCategory,
    #[serde(default)]
    pub default_config: ConfigMap,
    #[serde(default)]
    pub default_inputs: Vec<String>,
    #[serde(default)]
    pub default_outputs: Vec<String>,
}

impl NodeTemplate {
    /// Returns the built-in template for a node kind.
    #[must_use]
    pub fn builtin(kind: NodeKind) -> Self {
        let (display_name, description) = Self::builtin_labels(kind);
        let (inputs, outputs) = Self::builtin_ports(kind);
        Self {
            id: kind,
            display_name: display_name.to_string(),
            description: description.to_string(),
            category: kind.category(),
            default_config: Self::builtin_config(kind),
            default_inputs: inputs.into_iter().map(String::from).collect(),
            default_outputs: outputs.into_iter().map(String::from).collect(),
        }
    }

    /// Returns true if the name or description contains `needle`,
    /// ignoring case. `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.display_name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    fn builtin_labels(kind: NodeKind) -> (&'static str, &'static str) {
        match kind {
            NodeKind::ManualTrigger => (
                "Manual Trigger",
                "Starts the workflow when a user runs it by hand",
            ),
            NodeKind::ScheduleTrigger => ("Schedule", "Starts the workflow on a cron schedule"),
            NodeKind::WebhookTrigger => (
                "Webhook",
                "Starts the workflow when an HTTP request arrives",
            ),
            NodeKind::Email => ("Send Email", "Sends an email message"),
            NodeKind::HttpRequest => ("HTTP Request", "Calls an external URL"),
            NodeKind::Delay => ("Delay", "Pauses the workflow for a fixed time"),
            NodeKind::Notification => (
                "Notification",
                "Sends an in-portal notification to a user",
            ),
            NodeKind::SetVariable => ("Set Variable", "Stores a value for later steps"),
            NodeKind::Condition => (
                "Condition",
                "Routes the flow by evaluating a boolean expression",
            ),
            NodeKind::Switch => (
                "Switch",
                "Routes the flow by matching a value against cases",
            ),
        }
    }

    fn builtin_ports(kind: NodeKind) -> (Vec<&'static str>, Vec<&'static str>) {
        match kind {
            // Triggers have no inputs, one output
            NodeKind::ManualTrigger | NodeKind::ScheduleTrigger | NodeKind::WebhookTrigger => {
                (vec![], vec!["output"])
            }
            NodeKind::Email
            | NodeKind::Delay
            | NodeKind::Notification
            | NodeKind::SetVariable => (vec!["input"], vec!["output"]),
            NodeKind::HttpRequest => (vec!["input"], vec!["response", "error"]),
            NodeKind::Condition => (vec!["input"], vec!["true", "false"]),
            NodeKind::Switch => (vec!["input"], vec!["case_1", "case_2", "default"]),
        }
    }

    fn builtin_config(kind: NodeKind) -> ConfigMap {
        let value = match kind {
            NodeKind::ManualTrigger => json!({}),
            NodeKind::ScheduleTrigger => json!({ "cron": "0 9 * * 1-5", "timezone": "UTC" }),
            NodeKind::WebhookTrigger => json!({ "path": "/hooks/workflow", "method": "POST" }),
            NodeKind::Email => json!({ "to": "", "subject": "", "body": "" }),
            NodeKind::HttpRequest => json!({ "url": "", "method": "GET", "headers": {} }),
            NodeKind::Delay => json!({ "duration": 1000, "unit": "ms" }),
            NodeKind::Notification => json!({ "recipient": "", "message": "" }),
            NodeKind::SetVariable => json!({ "name": "", "value": "" }),
            NodeKind::Condition => json!({ "expression": "" }),
            NodeKind::Switch => json!({ "field": "", "cases": ["", ""] }),
        };
        match value {
            JsonValue::Object(map) => map,
            _ => ConfigMap::new(),
        }
    }
}
