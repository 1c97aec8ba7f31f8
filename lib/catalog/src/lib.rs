//! Node template catalog.
//!
//! The catalog is a read-only registry of node templates. It answers list,
//! filter and lookup queries for the node picker and acts as the factory
//! for fresh [`Node`](flowcanvas_workflow::Node) instances.

pub mod catalog;
pub mod error;
pub mod template;

pub use catalog::{CategoryFilter, NodeTypeCatalog};
pub use error::CatalogError;
pub use template::NodeTemplate;
