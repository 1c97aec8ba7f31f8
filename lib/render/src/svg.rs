//! Static SVG export of a workflow graph.

use crate::renderer::ConnectionRenderer;
use flowcanvas_workflow::{Node, WorkflowGraph};
use std::fmt::Write;

const MARGIN: f64 = 24.0;

/// Renders the graph as a standalone SVG document.
///
/// Nodes are drawn as boxes with their ports; connections are drawn with
/// their label and the transparent hit stroke the editor uses, so the
/// output can be inspected with the same geometry the canvas sees.
#[must_use]
pub fn render_svg(graph: &WorkflowGraph, renderer: &ConnectionRenderer) -> String {
    if graph.nodes.is_empty() {
        return r#"<svg xmlns="http://www.w3.org/2000/svg" width="0" height="0"></svg>"#
            .to_string();
    }

    let config = renderer.config();
    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;
    for node in &graph.nodes {
        let height = config.node_height(node.inputs.len(), node.outputs.len());
        min_x = min_x.min(node.position.x);
        min_y = min_y.min(node.position.y);
        max_x = max_x.max(node.position.x + config.node_width);
        max_y = max_y.max(node.position.y + height);
    }

    let width = max_x - min_x + 2.0 * MARGIN;
    let height = max_y - min_y + 2.0 * MARGIN;
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="{} {} {width} {height}">"#,
        min_x - MARGIN,
        min_y - MARGIN,
    );

    for result in renderer.render_all(&graph.connections, &graph.nodes) {
        let _ = writeln!(
            out,
            r#"  <g class="connection" data-id="{}">"#,
            result.connection_id
        );
        let _ = writeln!(
            out,
            r##"    <path d="{}" fill="none" stroke="#64748b" stroke-width="{}"/>"##,
            result.path, result.stroke_width
        );
        let _ = writeln!(
            out,
            r#"    <path d="{}" fill="none" stroke="transparent" stroke-width="{}"/>"#,
            result.hit_area.path, result.hit_area.stroke_width
        );
        let _ = writeln!(
            out,
            r#"    <text x="{}" y="{}" text-anchor="middle" font-size="10">{}</text>"#,
            result.label.position.x,
            result.label.position.y,
            escape(&result.label.text)
        );
        out.push_str("  </g>\n");
    }

    for node in &graph.nodes {
        write_node(&mut out, node, renderer);
    }

    out.push_str("</svg>\n");
    out
}

fn write_node(out: &mut String, node: &Node, renderer: &ConnectionRenderer) {
    let config = renderer.config();
    let height = config.node_height(node.inputs.len(), node.outputs.len());
    let _ = writeln!(
        out,
        r#"  <g class="node {}" data-id="{}">"#,
        node.category(),
        node.id
    );
    let _ = writeln!(
        out,
        r##"    <rect x="{}" y="{}" width="{}" height="{height}" rx="6" fill="#ffffff" stroke="#334155"/>"##,
        node.position.x, node.position.y, config.node_width
    );
    let _ = writeln!(
        out,
        r#"    <text x="{}" y="{}" font-size="12">{}</text>"#,
        node.position.x + 8.0,
        node.position.y + 20.0,
        escape(&node.display_name)
    );
    for port in &node.inputs {
        let Some(anchor) = renderer.input_anchor(node, port) else {
            continue;
        };
        let _ = writeln!(
            out,
            r#"    <circle class="port input" cx="{}" cy="{}" r="4"/>"#,
            anchor.x, anchor.y
        );
    }
    for port in &node.outputs {
        let Some(anchor) = renderer.output_anchor(node, port) else {
            continue;
        };
        let _ = writeln!(
            out,
            r#"    <circle class="port output" cx="{}" cy="{}" r="4"/>"#,
            anchor.x, anchor.y
        );
    }
    out.push_str("  </g>\n");
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
