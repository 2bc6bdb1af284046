//! Edit IR: undoable commands over a tree.
//!
//! An [`Edit`] is a serializable description of one mutation. Applying it
//! captures the inverse as an [`AppliedEdit`] record at execute time, so
//! undo never has to reconstruct prior state from the tree. [`EditStack`]
//! is the invoker: undo/redo stacks plus a deferred queue.
//!
//! The two stacks both hold `AppliedEdit` records and the operations are
//! symmetric: undoing applies the record's inverse and pushes the resulting
//! record on the redo stack, redoing does the mirror image.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crease_tree::{Branch, Node, NodeKind, NodePath, PathError, Value};

/// Error from applying an edit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    /// The target path did not resolve.
    #[error(transparent)]
    Path(#[from] PathError),

    /// The target resolved to the wrong kind of node.
    #[error("expected a {expected} at '{at}', found {found}")]
    KindMismatch {
        at: NodePath,
        expected: &'static str,
        found: NodeKind,
    },

    /// Insert position past the end of the child list.
    #[error("insert index {index} out of range at '{parent}' ({len} children)")]
    InsertOutOfRange {
        parent: NodePath,
        index: usize,
        len: usize,
    },
}

// ============================================================================
// Edits
// ============================================================================

/// One mutation, addressed by path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    /// Insert `node` under `parent`; `index: None` appends.
    Insert {
        parent: NodePath,
        index: Option<usize>,
        node: Node,
    },
    /// Remove the node at `at` (the root branch cannot be removed).
    Remove { at: NodePath },
    /// Replace the value of the leaf at `at`.
    SetValue { at: NodePath, value: Value },
    /// Replace the label of the branch at `at` (the root path renames the
    /// root branch).
    Rename { at: NodePath, label: String },
}

impl Edit {
    /// Apply to `root`, returning the inverse-capturing record.
    ///
    /// Failure leaves the tree untouched: every check runs before the
    /// mutation.
    pub fn apply(&self, root: &mut Branch) -> Result<AppliedEdit, EditError> {
        match self {
            Edit::Insert {
                parent,
                index,
                node,
            } => {
                let target = root.branch_at_mut(parent)?;
                let len = target.len();
                let index = index.unwrap_or(len);
                if index > len {
                    return Err(EditError::InsertOutOfRange {
                        parent: parent.clone(),
                        index,
                        len,
                    });
                }
                target.insert(index, node.clone());
                Ok(AppliedEdit::Inserted {
                    at: parent.child(index),
                })
            }
            Edit::Remove { at } => {
                let parent_path = at.parent().ok_or(PathError::Empty)?;
                let parent = root.branch_at_mut(&parent_path)?;
                let len = parent.len();
                // parent() returned Some, so last() does too
                let index = at.last().unwrap_or(len);
                if index >= len {
                    return Err(EditError::Path(PathError::OutOfRange {
                        at: parent_path,
                        index,
                        len,
                    }));
                }
                let node = parent.remove(index);
                Ok(AppliedEdit::Removed {
                    at: at.clone(),
                    node,
                })
            }
            Edit::SetValue { at, value } => {
                let node = root.node_at_mut(at)?;
                let found = node.kind();
                let leaf = node.as_leaf_mut().ok_or(EditError::KindMismatch {
                    at: at.clone(),
                    expected: "leaf",
                    found,
                })?;
                let previous = leaf.set_value(value.clone());
                Ok(AppliedEdit::ValueSet {
                    at: at.clone(),
                    previous,
                })
            }
            Edit::Rename { at, label } => {
                let previous = if at.is_root() {
                    root.set_label(label.clone())
                } else {
                    let node = root.node_at_mut(at)?;
                    let found = node.kind();
                    let branch = node.as_branch_mut().ok_or(EditError::KindMismatch {
                        at: at.clone(),
                        expected: "branch",
                        found,
                    })?;
                    branch.set_label(label.clone())
                };
                Ok(AppliedEdit::Renamed {
                    at: at.clone(),
                    previous,
                })
            }
        }
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edit::Insert { parent, index, .. } => match index {
                Some(i) => write!(f, "insert at '{}' index {}", parent, i),
                None => write!(f, "insert at '{}' (append)", parent),
            },
            Edit::Remove { at } => write!(f, "remove '{}'", at),
            Edit::SetValue { at, value } => write!(f, "set '{}' = {}", at, value),
            Edit::Rename { at, label } => write!(f, "rename '{}' to '{}'", at, label),
        }
    }
}

// ============================================================================
// Applied records
// ============================================================================

/// Inverse-capturing record of one applied edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "did", rename_all = "snake_case")]
pub enum AppliedEdit {
    /// A node now lives at `at`.
    Inserted { at: NodePath },
    /// `node` was detached from `at`.
    Removed { at: NodePath, node: Node },
    /// The leaf at `at` previously held `previous`.
    ValueSet { at: NodePath, previous: Value },
    /// The branch at `at` was previously labeled `previous`.
    Renamed { at: NodePath, previous: String },
}

impl AppliedEdit {
    /// Path of the affected node.
    pub fn path(&self) -> &NodePath {
        match self {
            AppliedEdit::Inserted { at }
            | AppliedEdit::Removed { at, .. }
            | AppliedEdit::ValueSet { at, .. }
            | AppliedEdit::Renamed { at, .. } => at,
        }
    }

    /// The edit that exactly reverses this record.
    ///
    /// Applying the inverse yields a record whose own inverse re-applies
    /// the original; the undo/redo stacks lean on that symmetry.
    pub fn inverse(&self) -> Edit {
        match self {
            AppliedEdit::Inserted { at } => Edit::Remove { at: at.clone() },
            AppliedEdit::Removed { at, node } => Edit::Insert {
                parent: at.parent().unwrap_or_default(),
                index: at.last(),
                node: node.clone(),
            },
            AppliedEdit::ValueSet { at, previous } => Edit::SetValue {
                at: at.clone(),
                value: previous.clone(),
            },
            AppliedEdit::Renamed { at, previous } => Edit::Rename {
                at: at.clone(),
                label: previous.clone(),
            },
        }
    }
}

// ============================================================================
// Edit stack
// ============================================================================

/// Undo/redo stacks plus a deferred queue.
#[derive(Debug, Default)]
pub struct EditStack {
    undo: Vec<AppliedEdit>,
    redo: Vec<AppliedEdit>,
    queue: VecDeque<Edit>,
}

impl EditStack {
    pub fn new() -> EditStack {
        EditStack::default()
    }

    /// Apply `edit` to `root`, push its record for undo, and clear the redo
    /// stack (a fresh edit invalidates the redone future).
    pub fn apply(&mut self, root: &mut Branch, edit: &Edit) -> Result<AppliedEdit, EditError> {
        let applied = edit.apply(root)?;
        debug!(%edit, "applied");
        self.undo.push(applied.clone());
        self.redo.clear();
        Ok(applied)
    }

    /// Undo the most recent edit. `Ok(None)` when there is nothing to undo.
    ///
    /// On failure the record stays on the undo stack, so history is not
    /// lost when the tree has diverged from it.
    pub fn undo(&mut self, root: &mut Branch) -> Result<Option<AppliedEdit>, EditError> {
        let Some(applied) = self.undo.pop() else {
            return Ok(None);
        };
        match applied.inverse().apply(root) {
            Ok(redo_record) => {
                debug!(at = %applied.path(), "undid");
                self.redo.push(redo_record);
                Ok(Some(applied))
            }
            Err(err) => {
                self.undo.push(applied);
                Err(err)
            }
        }
    }

    /// Redo the most recently undone edit. `Ok(None)` when there is
    /// nothing to redo.
    pub fn redo(&mut self, root: &mut Branch) -> Result<Option<AppliedEdit>, EditError> {
        let Some(record) = self.redo.pop() else {
            return Ok(None);
        };
        match record.inverse().apply(root) {
            Ok(undo_record) => {
                debug!(at = %undo_record.path(), "redid");
                self.undo.push(undo_record.clone());
                Ok(Some(undo_record))
            }
            Err(err) => {
                self.redo.push(record);
                Err(err)
            }
        }
    }

    /// Defer an edit for a later [`EditStack::flush`].
    pub fn enqueue(&mut self, edit: Edit) {
        self.queue.push_back(edit);
    }

    /// Pop the oldest queued edit without applying it.
    pub fn pop_queued(&mut self) -> Option<Edit> {
        self.queue.pop_front()
    }

    /// Put an edit back at the front of the queue (after a failed flush
    /// step, so a retry sees the same order).
    pub fn requeue_front(&mut self, edit: Edit) {
        self.queue.push_front(edit);
    }

    /// Apply every queued edit in FIFO order. Stops at the first failure,
    /// leaving the failed edit and everything behind it queued.
    pub fn flush(&mut self, root: &mut Branch) -> Result<Vec<AppliedEdit>, EditError> {
        let mut applied = Vec::new();
        while let Some(edit) = self.queue.pop_front() {
            match self.apply(root, &edit) {
                Ok(record) => applied.push(record),
                Err(err) => {
                    self.queue.push_front(edit);
                    return Err(err);
                }
            }
        }
        Ok(applied)
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Drop all history and queued edits. The tree is left as-is.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.queue.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================
