//! The node type catalog: lookup, filtering and node instantiation.

use crate::error::CatalogError;
use crate::template::NodeTemplate;
use flowcanvas_core::{NodeId, Point};
use flowcanvas_workflow::{Node, NodeCategory, NodeKind, UnknownNodeKind};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Category restriction for [`NodeTypeCatalog::filter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Identity filter.
    #[default]
    All,
    /// Only templates in this category.
    Only(NodeCategory),
}

impl CategoryFilter {
    #[must_use]
    pub fn admits(&self, category: NodeCategory) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => write!(f, "{category}"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownNodeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

impl From<NodeCategory> for CategoryFilter {
    fn from(category: NodeCategory) -> Self {
        Self::Only(category)
    }
}

/// Read-only registry of node templates.
///
/// Templates keep their registration order, which is the order the node
/// picker shows them in.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTypeCatalog {
    templates: Vec<NodeTemplate>,
}

impl NodeTypeCatalog {
    /// Builds the compiled-in catalog with one template per [`NodeKind`].
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            templates: NodeKind::ALL.into_iter().map(NodeTemplate::builtin).collect(),
        }
    }

    /// Builds a catalog from an externally supplied template list.
    ///
    /// When two templates share an ID the later one wins, keeping the
    /// position of the first.
    #[must_use]
    pub fn from_templates(templates: impl IntoIterator<Item = NodeTemplate>) -> Self {
        let mut catalog = Self {
            templates: Vec::new(),
        };
        for template in templates {
            catalog.insert(template);
        }
        catalog
    }

    /// Adds a template, replacing any existing template with the same ID.
    pub fn insert(&mut self, template: NodeTemplate) {
        match self.templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template,
            None => self.templates.push(template),
        }
    }

    /// Removes a template. Nodes already created from it are unaffected.
    pub fn remove(&mut self, kind: NodeKind) -> Option<NodeTemplate> {
        let index = self.templates.iter().position(|t| t.id == kind)?;
        Some(self.templates.remove(index))
    }

    /// Returns every template.
    #[must_use]
    pub fn list(&self) -> &[NodeTemplate] {
        &self.templates
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Returns the template for a kind, if registered.
    #[must_use]
    pub fn template(&self, kind: NodeKind) -> Option<&NodeTemplate> {
        self.templates.iter().find(|t| t.id == kind)
    }

    /// Looks a template up by its string ID.
    #[must_use]
    pub fn get(&self, template_id: &str) -> Option<&NodeTemplate> {
        let kind = template_id.parse::<NodeKind>().ok()?;
        self.template(kind)
    }

    /// Returns the categories that have at least one template, in
    /// category order.
    #[must_use]
    pub fn categories(&self) -> Vec<NodeCategory> {
        NodeCategory::ALL
            .into_iter()
            .filter(|c| self.templates.iter().any(|t| t.category == *c))
            .collect()
    }

    /// Filters templates by category and search text.
    ///
    /// Search text matches case-insensitively against the display name or
    /// the description; blank search text matches everything. Both filters
    /// must pass.
    #[must_use]
    pub fn filter(&self, category: CategoryFilter, search: Option<&str>) -> Vec<&NodeTemplate> {
        let needle = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        self.templates
            .iter()
            .filter(|t| category.admits(t.category))
            .filter(|t| needle.as_deref().is_none_or(|n| t.matches_lowercase(n)))
            .collect()
    }

    /// Creates a fresh node from a template.
    ///
    /// The node gets a new ID, the given canvas-local position, and its own
    /// copies of the template's config and port lists.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::TemplateNotFound`] if no registered template
    /// has this ID.
    pub fn instantiate(&self, template_id: &str, position: Point) -> Result<Node, CatalogError> {
        let template = self
            .get(template_id)
            .ok_or_else(|| CatalogError::TemplateNotFound {
                template_id: template_id.to_string(),
            })?;

        let node = Node {
            id: NodeId::new(),
            type_id: template.id,
            display_name: template.display_name.clone(),
            position,
            config: template.default_config.clone(),
            inputs: template.default_inputs.clone(),
            outputs: template.default_outputs.clone(),
        };
        debug!(node_id = %node.id, template = %template.id, "instantiated node");
        Ok(node)
    }
}

impl Default for NodeTypeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
