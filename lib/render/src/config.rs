//! Rendering configuration.

use serde::Deserialize;

/// Fixed layout constants for nodes and connection curves.
///
/// Every field has a default, so a partial configuration source works.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RenderConfig {
    /// Width of a node box; output anchors sit on its right edge.
    #[serde(default = "default_node_width")]
    pub node_width: f64,

    /// Vertical distance from the node's top edge to its first port.
    #[serde(default = "default_port_top_offset")]
    pub port_top_offset: f64,

    /// Vertical distance between consecutive ports on one side.
    #[serde(default = "default_port_spacing")]
    pub port_spacing: f64,

    /// Horizontal distance from each anchor to its curve control point.
    #[serde(default = "default_control_offset")]
    pub control_offset: f64,

    /// Visible stroke width of a connection.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,

    /// Stroke width of the invisible hit-test path.
    #[serde(default = "default_hit_stroke_width")]
    pub hit_stroke_width: f64,
}

fn default_node_width() -> f64 {
    160.0
}

fn default_port_top_offset() -> f64 {
    40.0
}

fn default_port_spacing() -> f64 {
    24.0
}

fn default_control_offset() -> f64 {
    80.0
}

fn default_stroke_width() -> f64 {
    2.0
}

fn default_hit_stroke_width() -> f64 {
    12.0
}

impl RenderConfig {
    /// Height of a node box with the given port counts.
    #[must_use]
    pub fn node_height(&self, inputs: usize, outputs: usize) -> f64 {
        let rows = inputs.max(outputs).max(1) as f64;
        self.port_top_offset + rows * self.port_spacing
    }

    /// Vertical offset of the port at `index` from the node's top edge.
    #[must_use]
    pub fn port_offset(&self, index: usize) -> f64 {
        self.port_top_offset + index as f64 * self.port_spacing
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            node_width: default_node_width(),
            port_top_offset: default_port_top_offset(),
            port_spacing: default_port_spacing(),
            control_offset: default_control_offset(),
            stroke_width: default_stroke_width(),
            hit_stroke_width: default_hit_stroke_width(),
        }
    }
}
