//! DOM Tree (arena-based allocation)
//!
//! Removing a node only unlinks it: a detached node keeps its id and its own
//! subtree and can be re-attached later. [`DomTree::free_subtree`] releases
//! the slots of a subtree for reuse; ids into a freed subtree are dangling
//! and may later name an unrelated node.

use crate::{DomError, DomResult, Node, NodeId};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Option<Node>>,
    /// Released slots, reused before the arena grows
    free_list: Vec<NodeId>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Node::document())],
            free_list: Vec::new(),
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize).and_then(Option::as_ref)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize).and_then(Option::as_mut)
    }

    /// Number of live nodes (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of allocated slots, live or free
    pub fn slots(&self) -> usize {
        self.nodes.len()
    }

    fn push(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.free_list.pop() {
            self.nodes[id.0 as usize] = Some(node);
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(node));
        id
    }

    /// Allocate a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Allocate a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(Node::text(text.to_string()))
    }

    /// Allocate a detached comment
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(Node::comment(text.to_string()))
    }

    /// Detach `id` and release it together with all of its descendants.
    ///
    /// Returns the number of released slots.
    pub fn free_subtree(&mut self, id: NodeId) -> DomResult<usize> {
        if id == NodeId::ROOT {
            return Err(DomError::HierarchyRequest);
        }
        self.detach(id)?;

        let mut doomed = self.descendants(id);
        doomed.push(id);
        for node in &doomed {
            self.nodes[node.0 as usize] = None;
            self.free_list.push(*node);
        }
        tracing::trace!("Freed {} nodes from {:?}", doomed.len(), id);
        Ok(doomed.len())
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound)
    }

    fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.get_mut(id).ok_or(DomError::NotFound)
    }

    /// Parent of a node, if linked
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Whether the node is reachable from the document root
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.get(id).is_some() && self.is_inclusive_ancestor(NodeId::ROOT, id)
    }

    /// Append `child` as last child of `parent`, unlinking it from any
    /// previous position first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if !self.node(parent)?.accepts_children() {
            return Err(DomError::InvalidNodeType);
        }
        self.node(child)?;
        if child == NodeId::ROOT || self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest);
        }

        self.detach(child)?;

        let last = self.node(parent)?.last_child;
        {
            let node = self.node_mut(child)?;
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.node_mut(last)?.next_sibling = child;
        } else {
            self.node_mut(parent)?.first_child = child;
        }
        self.node_mut(parent)?.last_child = child;

        Ok(child)
    }

    /// Remove `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if self.node(child)?.parent != parent {
            return Err(DomError::NotAChild);
        }
        self.detach(child)?;
        Ok(child)
    }

    /// Unlink a node from its parent. Detached nodes are left untouched.
    pub fn detach(&mut self, id: NodeId) -> DomResult<()> {
        let (parent, prev, next) = {
            let node = self.node(id)?;
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if !parent.is_valid() {
            return Ok(());
        }

        if prev.is_valid() {
            self.node_mut(prev)?.next_sibling = next;
        } else {
            self.node_mut(parent)?.first_child = next;
        }
        if next.is_valid() {
            self.node_mut(next)?.prev_sibling = prev;
        } else {
            self.node_mut(parent)?.last_child = prev;
        }

        let node = self.node_mut(id)?;
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
        Ok(())
    }

    /// Iterate over direct children
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let first = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next: first }
    }

    /// Pre-order list of all descendants, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).map(|(c, _)| c).collect();
        stack.reverse();
        while let Some(current) = stack.pop() {
            out.push(current);
            let mut kids: Vec<NodeId> = self.children(current).map(|(c, _)| c).collect();
            kids.reverse();
            stack.extend(kids);
        }
        out
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            return text.to_string();
        }
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.get(d).and_then(Node::as_text))
            .collect()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}
