//! Element builder
//!
//! Turns an [`ElementSpec`] into a node in the host document. Everything is
//! fail-soft: bad class tokens, unknown style properties and non-scalar
//! style values are skipped, and an unresolvable target just leaves the
//! node detached.

use std::collections::BTreeMap;

use jsn_dom::{Document, ElementQuery, NodeId, NodeOperations};
use serde::Deserialize;

use crate::class_name;

/// A style value as callers may hand it over
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    Text(String),
    Flag(bool),
    List(Vec<StyleValue>),
    Map(BTreeMap<String, StyleValue>),
    Null,
}

impl StyleValue {
    /// CSS text for scalar values; `None` for everything else
    pub fn as_css(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => Some(format!("{}", *n as i64)),
            Self::Number(n) if n.is_finite() => Some(n.to_string()),
            _ => None,
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// What to build
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSpec {
    pub tag: String,
    pub class_list: Vec<String>,
    pub style_list: Vec<(String, StyleValue)>,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            class_list: Vec::new(),
            style_list: Vec::new(),
        }
    }

    /// A `div`, the builder's default tag
    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.class_list.extend(classes.into_iter().map(Into::into));
        self
    }

    pub fn style(mut self, property: &str, value: impl Into<StyleValue>) -> Self {
        self.style_list.push((property.to_string(), value.into()));
        self
    }
}

impl Default for ElementSpec {
    fn default() -> Self {
        Self::div()
    }
}

/// Where a freshly built node goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// Resolved with `query_selector` at build time
    Selector(&'a str),
    /// Used only while it is still connected to the document
    Node(NodeId),
}

/// Result of [`build`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Built {
    pub node: NodeId,
    /// An existing node with the requested id was returned as-is
    pub reused: bool,
    /// The node is connected to the document
    pub attached: bool,
}

/// Build (or find) one element.
///
/// With a non-empty `existing_id` that already names a connected node,
/// that node is returned untouched.
pub fn build(doc: &mut Document, spec: &ElementSpec, existing_id: Option<&str>, target: Option<Target<'_>>) -> Built {
    let existing_id = existing_id.filter(|id| !id.is_empty());

    if let Some(node) = existing_id.and_then(|id| doc.get_element_by_id(id)) {
        return Built { node, reused: true, attached: true };
    }

    let node = doc.create_element(&spec.tag);
    if let Some(id) = existing_id {
        // Freshly created element: these calls only fail for non-elements.
        let _ = doc.set_id(node, id);
    }

    for class in class_name::valid_tokens(&spec.class_list) {
        let _ = doc.add_class(node, &class);
    }

    for (property, value) in &spec.style_list {
        let applied = match value.as_css() {
            Some(css) => doc.set_style_property(node, property, &css).unwrap_or(false),
            None => false,
        };
        if !applied {
            tracing::trace!("Ignoring style entry {:?} = {:?}", property, value);
        }
    }

    let parent = match target {
        Some(Target::Selector(selector)) => doc.query_selector(selector),
        Some(Target::Node(parent)) if doc.is_connected(parent) => Some(parent),
        Some(Target::Node(parent)) => {
            tracing::debug!("Target {:?} is not connected, leaving <{}> detached", parent, spec.tag);
            None
        }
        None => None,
    };

    if let Some(parent) = parent {
        if let Err(err) = doc.append_child(parent, node) {
            tracing::warn!("Could not append <{}> to {:?}: {}", spec.tag, parent, err);
        }
    }

    Built {
        node,
        reused: false,
        attached: doc.is_connected(node),
    }
}
