//! DOM Node Operations
//!
//! Core node manipulation: appendChild, removeChild, remove.

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node not found")]
    NotFound,
    /// Hierarchy error (e.g., inserting ancestor)
    #[error("Hierarchy request error")]
    HierarchyRequest,
    /// Invalid node type
    #[error("Invalid node type")]
    InvalidNodeType,
    /// Node is not a child
    #[error("Node is not a child")]
    NotAChild,
}

/// Node operations trait
pub trait NodeOperations {
    /// Append a child node
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId>;

    /// Remove a child node
    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId>;

    /// Detach a node from wherever it is linked; no-op when already detached
    fn remove(&mut self, node: NodeId) -> DomResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(DomError::NotFound.to_string(), "Node not found");
        assert_eq!(DomError::NotAChild.to_string(), "Node is not a child");
    }
}
