//! DOM Events
//!
//! Listener registry keyed by node and event type. Listeners carry an
//! opaque `callback_id` owned by whoever registered them; dispatch only
//! reports which ids fire, in bubbling order, and never runs code itself.

use crate::NodeId;

/// DOM event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomEventType {
    Click,
}

/// A registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventListener {
    pub node: NodeId,
    pub event_type: DomEventType,
    pub callback_id: u32,
}

/// All listeners of one document
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    listeners: Vec<EventListener>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; duplicates are ignored
    pub fn add(&mut self, node: NodeId, event_type: DomEventType, callback_id: u32) {
        let listener = EventListener { node, event_type, callback_id };
        if !self.listeners.contains(&listener) {
            self.listeners.push(listener);
        }
    }

    /// Drop one listener. Returns `true` if it existed.
    pub fn remove(&mut self, node: NodeId, event_type: DomEventType, callback_id: u32) -> bool {
        let before = self.listeners.len();
        self.listeners
            .retain(|l| !(l.node == node && l.event_type == event_type && l.callback_id == callback_id));
        self.listeners.len() != before
    }

    /// Drop every listener attached to any of `nodes`
    pub fn remove_all_for(&mut self, nodes: &[NodeId]) -> usize {
        let before = self.listeners.len();
        self.listeners.retain(|l| !nodes.contains(&l.node));
        before - self.listeners.len()
    }

    /// Callback ids registered on `node` for `event_type`, in registration order
    pub fn callbacks_for(&self, node: NodeId, event_type: DomEventType) -> impl Iterator<Item = u32> + '_ {
        self.listeners
            .iter()
            .filter(move |l| l.node == node && l.event_type == event_type)
            .map(|l| l.callback_id)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
