//! Document - High-level document API
//!
//! The host tree notices are rendered into. All lookups (`get_element_by_id`,
//! selectors) only see nodes connected to the document root.

use crate::dom_events::ListenerRegistry;
use crate::element::Selector;
use crate::{
    fragment, serialize, CssStyleDeclaration, DomError, DomEventType, DomResult, DomTree, ElementData,
    ElementQuery, Node, NodeId, NodeOperations,
};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Click listeners
    listeners: ListenerRegistry,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
}

impl Document {
    /// Create a document with an html/head/body skeleton
    pub fn new() -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Freshly created nodes under the root cannot violate hierarchy rules.
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            listeners: ListenerRegistry::new(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Get a node
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.tree.get(id)
    }

    /// Element data of a node, if it is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.tree.get(id).and_then(Node::as_element)
    }

    fn element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        let node = self.tree.get_mut(id).ok_or(DomError::NotFound)?;
        node.as_element_mut().ok_or(DomError::InvalidNodeType)
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag)
    }

    /// Create a detached text node
    pub fn create_text_node(&mut self, text: &str) -> NodeId {
        self.tree.create_text(text)
    }

    /// Whether the node is part of the document
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.tree.is_connected(id)
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.parent(id)
    }

    /// Element children of a node, in order
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.tree
            .children(id)
            .filter(|(_, n)| n.is_element())
            .map(|(child, _)| child)
            .collect()
    }

    /// First element child of a node
    pub fn first_element_child(&self, id: NodeId) -> Option<NodeId> {
        self.tree.children(id).find(|(_, n)| n.is_element()).map(|(child, _)| child)
    }

    /// Get attribute value (reflected `id`/`class`/`style` included)
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.element(id).and_then(|e| e.get_attr(name))
    }

    /// Set attribute
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.element_mut(id)?.set_attr(name, value);
        Ok(())
    }

    /// Set the element's id
    pub fn set_id(&mut self, id: NodeId, value: &str) -> DomResult<()> {
        self.element_mut(id)?.id = Some(value.to_string());
        Ok(())
    }

    /// Add a class token. Returns `true` if it was newly added.
    pub fn add_class(&mut self, id: NodeId, token: &str) -> DomResult<bool> {
        Ok(self.element_mut(id)?.class_list.add(token))
    }

    /// Class tokens of an element
    pub fn class_names(&self, id: NodeId) -> Vec<String> {
        self.element(id)
            .map(|e| e.class_list.iter().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Inline style of an element
    pub fn style(&self, id: NodeId) -> Option<&CssStyleDeclaration> {
        self.element(id).map(|e| &e.style)
    }

    /// Set one inline style property. Returns `false` if the element's style
    /// does not recognize the property.
    pub fn set_style_property(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<bool> {
        Ok(self.element_mut(id)?.style.set_property(name, value))
    }

    /// Append a text node (`Element.append(string)`)
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> DomResult<NodeId> {
        let node = self.tree.create_text(text);
        self.tree.append_child(parent, node)
    }

    /// Concatenated descendant text
    pub fn text_content(&self, id: NodeId) -> String {
        self.tree.text_content(id)
    }

    /// Replace the children of `id` with the parsed markup.
    ///
    /// The markup is trusted as given; callers are responsible for
    /// sanitizing anything that did not originate from themselves.
    pub fn set_inner_html(&mut self, id: NodeId, html: &str) -> DomResult<Vec<NodeId>> {
        self.element_mut(id)?;
        let old: Vec<NodeId> = self.tree.children(id).map(|(child, _)| child).collect();
        for child in old {
            self.destroy(child)?;
        }
        fragment::append_fragment(&mut self.tree, id, html)
    }

    /// Detach a node and release it with its subtree and their listeners.
    ///
    /// The html/head/body skeleton cannot be destroyed. Returns the number
    /// of released nodes.
    pub fn destroy(&mut self, id: NodeId) -> DomResult<usize> {
        if [self.html_element, self.head_element, self.body_element].contains(&id) {
            return Err(DomError::HierarchyRequest);
        }
        self.tree.get(id).ok_or(DomError::NotFound)?;
        self.remove_event_listeners_in(id);
        self.tree.free_subtree(id)
    }

    /// Serialize the children of a node
    pub fn inner_html(&self, id: NodeId) -> String {
        serialize::inner_html(&self.tree, id)
    }

    /// Serialize a node with its subtree
    pub fn outer_html(&self, id: NodeId) -> String {
        serialize::outer_html(&self.tree, id)
    }

    /// Register a listener on a node
    pub fn add_event_listener(&mut self, id: NodeId, event_type: DomEventType, callback_id: u32) -> DomResult<()> {
        self.tree.get(id).ok_or(DomError::NotFound)?;
        self.listeners.add(id, event_type, callback_id);
        Ok(())
    }

    /// Remove a listener. Returns `true` if it existed.
    pub fn remove_event_listener(&mut self, id: NodeId, event_type: DomEventType, callback_id: u32) -> bool {
        self.listeners.remove(id, event_type, callback_id)
    }

    /// Drop every listener on `id` and its descendants
    pub fn remove_event_listeners_in(&mut self, id: NodeId) -> usize {
        let mut nodes = self.tree.descendants(id);
        nodes.push(id);
        self.listeners.remove_all_for(&nodes)
    }

    /// Dispatch an event at `target`, bubbling to the root.
    ///
    /// Returns the callback ids of every listener hit, target first.
    pub fn dispatch_event(&self, target: NodeId, event_type: DomEventType) -> Vec<u32> {
        let mut fired = Vec::new();
        let mut current = self.tree.get(target).map(|_| target);
        while let Some(id) = current {
            fired.extend(self.listeners.callbacks_for(id, event_type));
            current = self.tree.parent(id);
        }
        tracing::trace!("Dispatched {:?} at {:?}: {} listeners", event_type, target, fired.len());
        fired
    }

    fn connected_elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .filter(|id| self.tree.get(*id).is_some_and(Node::is_element))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementQuery for Document {
    fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.connected_elements()
            .find(|node| self.element(*node).and_then(|e| e.id.as_deref()) == Some(id))
    }

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector)?;
        self.connected_elements().find(|node| selector.matches(&self.tree, *node))
    }

    fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.connected_elements()
            .filter(|node| selector.matches(&self.tree, *node))
            .collect()
    }

    fn get_elements_by_class_name(&self, class: &str) -> Vec<NodeId> {
        self.connected_elements()
            .filter(|node| self.element(*node).is_some_and(|e| e.has_class(class)))
            .collect()
    }

    fn closest(&self, element: NodeId, selector: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector)?;
        let mut current = Some(element);
        while let Some(id) = current {
            if selector.matches(&self.tree, id) {
                return Some(id);
            }
            current = self.tree.parent(id);
        }
        None
    }

    fn matches(&self, element: NodeId, selector: &str) -> bool {
        Selector::parse(selector).is_some_and(|s| s.matches(&self.tree, element))
    }
}

impl NodeOperations for Document {
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.tree.append_child(parent, child)
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.tree.remove_child(parent, child)
    }

    fn remove(&mut self, node: NodeId) -> DomResult<()> {
        self.tree.detach(node)
    }
}
