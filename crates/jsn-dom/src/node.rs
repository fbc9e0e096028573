//! DOM Node - arena representation
//!
//! Nodes link to relatives through `NodeId` indices instead of pointers,
//! so detaching a subtree never invalidates ids held by callers.

use crate::{CssStyleDeclaration, DOMTokenList, NamedNodeMap, NodeId};

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: String) -> Self {
        Self::with_data(NodeData::Text(content))
    }

    /// Create a comment node
    pub fn comment(content: String) -> Self {
        Self::with_data(NodeData::Comment(content))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Whether children may be appended to this node
    #[inline]
    pub fn accepts_children(&self) -> bool {
        matches!(self.data, NodeData::Element(_) | NodeData::Document)
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
///
/// `id`, `class` and `style` live outside the generic attribute map so the
/// common lookups don't have to reparse strings.
#[derive(Debug)]
pub struct ElementData {
    /// Lowercase tag name
    pub tag: String,
    /// Remaining attributes
    pub attrs: NamedNodeMap,
    /// Cached id attribute
    pub id: Option<String>,
    /// Class tokens
    pub class_list: DOMTokenList,
    /// Inline style declarations
    pub style: CssStyleDeclaration,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: NamedNodeMap::new(),
            id: None,
            class_list: DOMTokenList::new(),
            style: CssStyleDeclaration::new(),
        }
    }

    /// Get an attribute value, including the reflected `id`/`class`/`style`
    pub fn get_attr(&self, name: &str) -> Option<String> {
        match name {
            "id" => self.id.clone(),
            "class" if self.class_list.length() > 0 => Some(self.class_list.value()),
            "class" => None,
            "style" if !self.style.is_empty() => Some(self.style.css_text()),
            "style" => None,
            _ => self.attrs.get_attribute(name).map(str::to_string),
        }
    }

    /// Set an attribute, routing `id`/`class`/`style` to their caches
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match name {
            "id" => self.id = Some(value.to_string()),
            "class" => self.class_list.set_value(value),
            "style" => self.style.set_css_text(value),
            _ => self.attrs.set_attribute(name, value),
        }
    }

    /// Check for a class token
    pub fn has_class(&self, class: &str) -> bool {
        self.class_list.contains(class)
    }
}
