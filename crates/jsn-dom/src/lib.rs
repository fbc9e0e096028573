//! jsn DOM - host document for notices
//!
//! Arena-based DOM tree with the small surface the notice pipeline needs:
//! id lookup, simple selectors, class token lists, inline styles,
//! markup fragments, click listeners and HTML serialization.

mod node;
mod tree;
mod document;
mod attributes;
mod classlist;
mod style;
mod element;
mod operations;
mod dom_events;
mod fragment;
mod serialize;

pub use node::{Node, NodeData, ElementData};
pub use tree::{DomTree, Children};
pub use document::Document;
pub use attributes::{Attr, NamedNodeMap};
pub use classlist::DOMTokenList;
pub use style::{CssStyleDeclaration, PropertyId};
pub use element::{ElementQuery, Selector, SimpleSelector};
pub use operations::{DomError, DomResult, NodeOperations};
pub use dom_events::{DomEventType, EventListener, ListenerRegistry};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Whether this refers to a node at all
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}
