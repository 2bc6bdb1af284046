//! Node paths: positional addresses into a tree.
//!
//! A path is a sequence of zero-based child indices, outermost first.
//! `"0/2/1"` means: child 0 of the root, then child 2 of that branch, then
//! child 1 of that. The empty path addresses the root branch itself.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::node::{Branch, Node};

/// Errors from path parsing and resolution.
///
/// Resolution never degrades to a no-op: an index past the end or a descent
/// into a leaf is reported, with the prefix that was valid in `at`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("empty path does not address a node")]
    Empty,

    #[error("index {index} out of range at '{at}' ({len} children)")]
    OutOfRange {
        at: NodePath,
        index: usize,
        len: usize,
    },

    #[error("node at '{at}' is a leaf, cannot descend into it")]
    NotABranch { at: NodePath },

    #[error("cannot parse path '{input}': {reason}")]
    Unparsable { input: String, reason: String },
}

/// Positional address of a node under a root branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// The empty path (the root itself).
    pub fn root() -> NodePath {
        NodePath(Vec::new())
    }

    /// Parse a `/`-separated index path. The empty string is the root path.
    pub fn parse(input: &str) -> Result<NodePath, PathError> {
        if input.is_empty() {
            return Ok(NodePath::root());
        }
        let mut indices = Vec::new();
        for part in input.split('/') {
            let index = part.parse::<usize>().map_err(|_| PathError::Unparsable {
                input: input.to_string(),
                reason: format!("'{}' is not a child index", part),
            })?;
            indices.push(index);
        }
        Ok(NodePath(indices))
    }

    /// Extend with one more index, yielding the child's path.
    pub fn child(&self, index: usize) -> NodePath {
        let mut indices = self.0.clone();
        indices.push(index);
        NodePath(indices)
    }

    /// Path of the addressed node's parent; `None` for the root path.
    pub fn parent(&self) -> Option<NodePath> {
        let (_, prefix) = self.0.split_last()?;
        Some(NodePath(prefix.to_vec()))
    }

    /// Final index (the position within the parent); `None` for the root.
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Number of steps (0 for the root path).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True for the empty path, which addresses the root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        NodePath(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for index in &self.0 {
            if !first {
                f.write_str("/")?;
            }
            write!(f, "{}", index)?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for NodePath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodePath::parse(s)
    }
}

// ============================================================================
// Resolution
// ============================================================================

impl Branch {
    /// Resolve a path to the branch it addresses. The empty path resolves
    /// to `self`; every step must land on a branch.
    pub fn branch_at(&self, path: &NodePath) -> Result<&Branch, PathError> {
        let mut current = self;
        for (pos, &index) in path.0.iter().enumerate() {
            let len = current.len();
            let child = current.child(index).ok_or_else(|| PathError::OutOfRange {
                at: NodePath(path.0[..pos].to_vec()),
                index,
                len,
            })?;
            current = child.as_branch().ok_or_else(|| PathError::NotABranch {
                at: NodePath(path.0[..=pos].to_vec()),
            })?;
        }
        Ok(current)
    }

    /// Mutable variant of [`Branch::branch_at`].
    pub fn branch_at_mut(&mut self, path: &NodePath) -> Result<&mut Branch, PathError> {
        let mut current = self;
        for (pos, &index) in path.0.iter().enumerate() {
            let len = current.len();
            let child = current
                .child_mut(index)
                .ok_or_else(|| PathError::OutOfRange {
                    at: NodePath(path.0[..pos].to_vec()),
                    index,
                    len,
                })?;
            current = child.as_branch_mut().ok_or_else(|| PathError::NotABranch {
                at: NodePath(path.0[..=pos].to_vec()),
            })?;
        }
        Ok(current)
    }

    /// Resolve a path to the node it addresses. The root branch is not a
    /// `Node`, so the empty path is an error here.
    pub fn node_at(&self, path: &NodePath) -> Result<&Node, PathError> {
        let (last, prefix) = path.0.split_last().ok_or(PathError::Empty)?;
        let prefix = NodePath(prefix.to_vec());
        let parent = self.branch_at(&prefix)?;
        let len = parent.len();
        parent.child(*last).ok_or(PathError::OutOfRange {
            at: prefix,
            index: *last,
            len,
        })
    }

    /// Mutable variant of [`Branch::node_at`].
    pub fn node_at_mut(&mut self, path: &NodePath) -> Result<&mut Node, PathError> {
        let (last, prefix) = path.0.split_last().ok_or(PathError::Empty)?;
        let prefix = NodePath(prefix.to_vec());
        let parent = self.branch_at_mut(&prefix)?;
        let len = parent.len();
        parent.child_mut(*last).ok_or(PathError::OutOfRange {
            at: prefix,
            index: *last,
            len,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
