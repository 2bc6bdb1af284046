//! The document: a tree plus its edit history and subscribers.
//!
//! [`Document`] is the editing facade. Every mutation goes through
//! [`Document::apply`] (or the queue, or a [`Transaction`]), which keeps
//! the undo/redo stacks honest, bumps the revision counter, and publishes
//! a [`TreeEvent`] to subscribers. Read access hands out plain borrows of
//! the root, so traversal, selection, and rendering come straight from
//! `crease-tree`.

use serde::Serialize;
use tracing::debug;

use crease_tree::cursor::{TraversalOrder, TreeCursor};
use crease_tree::node::{Branch, Node};
use crease_tree::path::{NodePath, PathError};
use crease_tree::select::Selector;

use crate::edit::{AppliedEdit, Edit, EditError, EditStack};
use crate::notify::{EventHub, SubscriberId, TreeEvent};
use crate::txn::Transaction;

/// A tree with undoable edits, change events, and a revision counter.
///
/// The revision increments on every successful mutation, including undo
/// and redo. [`Transaction`]s use it to detect interleaved edits.
#[derive(Debug)]
pub struct Document {
    root: Branch,
    history: EditStack,
    hub: EventHub,
    revision: u64,
}

impl Document {
    /// An empty document whose root branch carries `label`.
    pub fn new(label: impl Into<String>) -> Document {
        Document::from_root(Branch::new(label))
    }

    /// Wrap an existing tree. History starts empty; the adoption itself
    /// is not undoable.
    pub fn from_root(root: Branch) -> Document {
        Document {
            root,
            history: EditStack::new(),
            hub: EventHub::new(),
            revision: 0,
        }
    }

    // ========================================================================
    // Reading
    // ========================================================================

    pub fn root(&self) -> &Branch {
        &self.root
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn node_at(&self, path: &NodePath) -> Result<&Node, PathError> {
        self.root.node_at(path)
    }

    /// Cursor over the root's descendants.
    pub fn cursor(&self, order: TraversalOrder) -> TreeCursor<'_> {
        self.root.cursor(order)
    }

    /// All descendants matching `selector`, in `order`.
    pub fn select(&self, selector: &Selector, order: TraversalOrder) -> Vec<&Node> {
        selector.find_all(&self.root, order)
    }

    /// Indented outline of the whole tree.
    pub fn render(&self) -> String {
        self.root.render()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        self.root.to_json_pretty()
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Apply one edit. Returns the path the edit landed on (for an
    /// append-style insert this is where the node ended up).
    pub fn apply(&mut self, edit: Edit) -> Result<NodePath, EditError> {
        let applied = self.history.apply(&mut self.root, &edit)?;
        self.revision += 1;
        let at = applied.path().clone();
        let event = forward_event(&edit, &applied);
        self.hub.publish(&event);
        Ok(at)
    }

    /// Undo the most recent edit. Returns `false` when history is empty.
    pub fn undo(&mut self) -> Result<bool, EditError> {
        let Some(applied) = self.history.undo(&mut self.root)? else {
            return Ok(false);
        };
        self.revision += 1;
        self.hub.publish(&TreeEvent::Reverted {
            at: applied.path().clone(),
        });
        Ok(true)
    }

    /// Redo the most recently undone edit. Returns `false` when there is
    /// nothing to redo.
    pub fn redo(&mut self) -> Result<bool, EditError> {
        let Some(applied) = self.history.redo(&mut self.root)? else {
            return Ok(false);
        };
        self.revision += 1;
        self.hub.publish(&TreeEvent::Reapplied {
            at: applied.path().clone(),
        });
        Ok(true)
    }

    /// Defer an edit for the next [`Document::flush`].
    pub fn queue(&mut self, edit: Edit) {
        debug!(%edit, "queued");
        self.history.enqueue(edit);
    }

    /// Apply every queued edit in FIFO order, publishing events as usual.
    /// Stops at the first failure; the failed edit and everything behind
    /// it stay queued.
    pub fn flush(&mut self) -> Result<usize, EditError> {
        let mut count = 0;
        while let Some(edit) = self.history.pop_queued() {
            if let Err(err) = self.apply(edit.clone()) {
                self.history.requeue_front(edit);
                return Err(err);
            }
            count += 1;
        }
        Ok(count)
    }

    /// Open a transaction. Edits applied through it roll back on drop
    /// unless committed.
    pub fn begin(&mut self) -> Transaction<'_> {
        Transaction::new(self)
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    pub fn queued(&self) -> usize {
        self.history.queued()
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Subscribe to change events. Callbacks run synchronously inside the
    /// mutating call, in registration order.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriberId
    where
        F: FnMut(&TreeEvent) + 'static,
    {
        self.hub.subscribe(callback)
    }

    /// Remove a subscriber. `false` when the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.hub.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.hub.subscriber_count()
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.root.serialize(serializer)
    }
}

/// Event for a freshly applied edit. The edit carries the new state, the
/// record carries the prior state.
fn forward_event(edit: &Edit, applied: &AppliedEdit) -> TreeEvent {
    let at = applied.path().clone();
    match (edit, applied) {
        (Edit::SetValue { value, .. }, AppliedEdit::ValueSet { previous, .. }) => {
            TreeEvent::ValueChanged {
                at,
                previous: previous.clone(),
                value: value.clone(),
            }
        }
        (Edit::Rename { label, .. }, AppliedEdit::Renamed { previous, .. }) => TreeEvent::Renamed {
            at,
            previous: previous.clone(),
            label: label.clone(),
        },
        (Edit::Remove { .. }, _) => TreeEvent::Removed { at },
        _ => TreeEvent::Inserted { at },
    }
}

// ============================================================================
// Tests
// ============================================================================
