//! Connection geometry.
//!
//! A rendered connection is a cubic curve from the source node's output
//! anchor to the target node's input anchor, a label at the curve's
//! midpoint, and a wider invisible copy of the path that receives pointer
//! events. Rendering never mutates the graph; a connection whose endpoint
//! node is missing simply renders nothing.

use crate::config::RenderConfig;
use crate::curve::CubicCurve;
use flowcanvas_core::{ConnectionId, NodeId, Point};
use flowcanvas_workflow::{Connection, Node, PortRef};
use serde::Serialize;

/// Text drawn at the midpoint of a connection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionLabel {
    pub position: Point,
    pub text: String,
}

/// The invisible, wide stroke that makes a thin connection clickable.
///
/// It shares the visible path's geometry exactly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HitArea {
    pub path: String,
    pub stroke_width: f64,
}

/// Everything the host needs to draw one connection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderResult {
    pub connection_id: ConnectionId,
    pub curve: CubicCurve,
    /// SVG path data for the visible stroke.
    pub path: String,
    pub stroke_width: f64,
    pub label: ConnectionLabel,
    pub hit_area: HitArea,
}

impl RenderResult {
    /// Output anchor on the source node.
    #[must_use]
    pub fn source(&self) -> Point {
        self.curve.start
    }

    /// Input anchor on the target node.
    #[must_use]
    pub fn target(&self) -> Point {
        self.curve.end
    }
}

/// Computes connection geometry from node positions and port lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionRenderer {
    config: RenderConfig,
}

impl ConnectionRenderer {
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Anchor of an output port: the node's right edge, at the port's row.
    #[must_use]
    pub fn output_anchor(&self, node: &Node, port: &str) -> Option<Point> {
        let index = node.output_index(port)?;
        Some(node.position + Point::new(self.config.node_width, self.config.port_offset(index)))
    }

    /// Anchor of an input port: the node's left edge, at the port's row.
    #[must_use]
    pub fn input_anchor(&self, node: &Node, port: &str) -> Option<Point> {
        let index = node.input_index(port)?;
        Some(node.position + Point::new(0.0, self.config.port_offset(index)))
    }

    /// Renders one connection.
    ///
    /// Returns `None` if either endpoint node is absent from `nodes`, or no
    /// longer declares the connected port.
    #[must_use]
    pub fn render(&self, connection: &Connection, nodes: &[Node]) -> Option<RenderResult> {
        let source_node = find(nodes, connection.from_node_id)?;
        let target_node = find(nodes, connection.to_node_id)?;

        let start = self.output_anchor(source_node, &connection.from_output)?;
        let end = self.input_anchor(target_node, &connection.to_input)?;
        let curve = CubicCurve::horizontal(start, end, self.config.control_offset);
        let path = curve.to_svg_path();

        Some(RenderResult {
            connection_id: connection.id,
            curve,
            label: ConnectionLabel {
                position: curve.midpoint(),
                text: connection.label(),
            },
            hit_area: HitArea {
                path: path.clone(),
                stroke_width: self.config.hit_stroke_width,
            },
            stroke_width: self.config.stroke_width,
            path,
        })
    }

    /// Renders every connection that has both endpoints, in drawing order.
    #[must_use]
    pub fn render_all(&self, connections: &[Connection], nodes: &[Node]) -> Vec<RenderResult> {
        connections
            .iter()
            .filter_map(|c| self.render(c, nodes))
            .collect()
    }

    /// Returns the topmost connection whose hit area contains `point`.
    ///
    /// Connections drawn later sit on top, so they are tested first.
    #[must_use]
    pub fn hit_test(
        &self,
        connections: &[Connection],
        nodes: &[Node],
        point: Point,
    ) -> Option<ConnectionId> {
        let reach = self.config.hit_stroke_width / 2.0;
        connections
            .iter()
            .rev()
            .filter_map(|c| self.render(c, nodes))
            .find(|r| r.curve.distance_to(point) <= reach)
            .map(|r| r.connection_id)
    }

    /// Curve for a connection still being drawn, from an output port to
    /// the pointer.
    ///
    /// Returns `None` if the source node is absent or no longer has the
    /// output port.
    #[must_use]
    pub fn render_pending(
        &self,
        source: &PortRef,
        nodes: &[Node],
        cursor: Point,
    ) -> Option<CubicCurve> {
        let node = find(nodes, source.node_id)?;
        let start = self.output_anchor(node, &source.port)?;
        Some(CubicCurve::horizontal(start, cursor, self.config.control_offset))
    }
}

/// Renders one connection with the default layout.
#[must_use]
pub fn render(connection: &Connection, nodes: &[Node]) -> Option<RenderResult> {
    ConnectionRenderer::default().render(connection, nodes)
}

fn find(nodes: &[Node], node_id: NodeId) -> Option<&Node> {
    nodes.iter().find(|n| n.id == node_id)
}
