//! Change notification: tree events and the subscriber hub.
//!
//! A [`Document`](crate::document::Document) publishes one [`TreeEvent`]
//! per applied, undone, or redone edit. Subscribers are plain closures
//! registered with an [`EventHub`]; delivery is synchronous and in
//! registration order.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crease_tree::{NodePath, Value};

// ============================================================================
// Events
// ============================================================================

/// What just changed in the tree.
///
/// Paths are valid at publish time; an event does not keep them valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TreeEvent {
    /// A node appeared at `at`.
    Inserted { at: NodePath },
    /// The node at `at` was detached.
    Removed { at: NodePath },
    /// The leaf at `at` changed from `previous` to `value`.
    ValueChanged {
        at: NodePath,
        previous: Value,
        value: Value,
    },
    /// The branch at `at` was relabeled from `previous` to `label`.
    Renamed {
        at: NodePath,
        previous: String,
        label: String,
    },
    /// An undo reverted the edit that touched `at`.
    Reverted { at: NodePath },
    /// A redo reapplied the edit that touched `at`.
    Reapplied { at: NodePath },
}

impl TreeEvent {
    /// Path of the affected node.
    pub fn path(&self) -> &NodePath {
        match self {
            TreeEvent::Inserted { at }
            | TreeEvent::Removed { at }
            | TreeEvent::ValueChanged { at, .. }
            | TreeEvent::Renamed { at, .. }
            | TreeEvent::Reverted { at }
            | TreeEvent::Reapplied { at } => at,
        }
    }

    /// Short tag for logs and demos.
    pub fn name(&self) -> &'static str {
        match self {
            TreeEvent::Inserted { .. } => "inserted",
            TreeEvent::Removed { .. } => "removed",
            TreeEvent::ValueChanged { .. } => "value_changed",
            TreeEvent::Renamed { .. } => "renamed",
            TreeEvent::Reverted { .. } => "reverted",
            TreeEvent::Reapplied { .. } => "reapplied",
        }
    }
}

impl fmt::Display for TreeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at '{}'", self.name(), self.path())
    }
}

// ============================================================================
// Subscriptions
// ============================================================================

/// Handle returned by [`EventHub::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriberId(u64);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub_{}", self.0)
    }
}

type Callback = Box<dyn FnMut(&TreeEvent)>;

struct Subscriber {
    id: SubscriberId,
    callback: Callback,
}

/// Synchronous fan-out of [`TreeEvent`]s.
///
/// Subscribers are invoked in registration order. Unsubscribing never
/// rewinds anything already delivered.
#[derive(Default)]
pub struct EventHub {
    subscribers: Vec<Subscriber>,
    next_id: u64,
}

impl EventHub {
    pub fn new() -> EventHub {
        EventHub::default()
    }

    /// Register a callback; the returned id identifies it for
    /// [`EventHub::unsubscribe`].
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriberId
    where
        F: FnMut(&TreeEvent) + 'static,
    {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            callback: Box::new(callback),
        });
        debug!(%id, "subscribed");
        id
    }

    /// Remove a subscriber. Returns `false` when the id is unknown (or
    /// already removed), which is not an error.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        let removed = self.subscribers.len() != before;
        if removed {
            debug!(%id, "unsubscribed");
        }
        removed
    }

    /// Deliver `event` to every current subscriber, in registration order.
    pub fn publish(&mut self, event: &TreeEvent) {
        debug!(%event, subscribers = self.subscribers.len(), "publish");
        for subscriber in &mut self.subscribers {
            (subscriber.callback)(event);
        }
    }

    pub fn is_subscribed(&self, id: SubscriberId) -> bool {
        self.subscribers.iter().any(|s| s.id == id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Drop every subscriber. Ids already handed out stay retired.
    pub fn clear(&mut self) {
        if !self.subscribers.is_empty() {
            debug!(dropped = self.subscribers.len(), "cleared subscribers");
        }
        self.subscribers.clear();
    }
}

impl fmt::Debug for EventHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("subscribers", &self.subscribers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
