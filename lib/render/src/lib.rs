//! Connection rendering for the workflow canvas.
//!
//! Everything here is a pure read of the graph: given nodes and a
//! connection, compute the port anchors, the cubic curve between them, the
//! midpoint label and the wide hit-test stroke used for click-to-delete.

pub mod config;
pub mod curve;
pub mod renderer;
pub mod svg;

pub use config::RenderConfig;
pub use curve::CubicCurve;
pub use renderer::{ConnectionLabel, ConnectionRenderer, HitArea, RenderResult, render};
pub use svg::render_svg;
